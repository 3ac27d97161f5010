//! REST client for the festival API.
//!
//! Wraps the `/api/v1` endpoints with [`reqwest`], unwraps the `{ "data" }`
//! envelope of successful responses and turns `{ "error", "code" }` bodies
//! into [`ClientError::Api`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use festival_core::session_plan::{Day, Plan, Screen, Slot};
use festival_core::types::DbId;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    Contact, DayInput, Nomination, PlanSummary, Resource, ScreenInput, SlotInput,
};
use crate::service::{
    CollectionService, ContactService, SessionPlanService, UploadRequest, UploadService,
};

/// HTTP client for one festival API server.
#[derive(Debug, Clone)]
pub struct FestivalClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct ContactedBody {
    contacted: bool,
}

impl FestivalClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.api_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Session plans available for editing, without their days.
    pub async fn list_plans(&self) -> ClientResult<Vec<PlanSummary>> {
        let response = self.request(Method::GET, "/session-plans").send().await?;
        Self::parse_data(response).await
    }

    /// Nominations for one award, winners first.
    pub async fn list_nominations(&self, award_id: DbId) -> ClientResult<Vec<Nomination>> {
        let response = self
            .request(Method::GET, &format!("/awards/{award_id}/nominations"))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path).json(body).send().await?;
        Self::parse_data(response).await
    }

    async fn send_delete(&self, path: &str) -> ClientResult<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Return the response unchanged on success, or a
    /// [`ClientError::Api`] carrying the server's message on failure.
    async fn ensure_success(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status.as_u16(), &body))
    }

    /// Parse the `data` field of a successful JSON response.
    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let response = Self::ensure_success(response).await?;
        let envelope = response.json::<DataEnvelope<T>>().await?;
        Ok(envelope.data)
    }
}

/// Build an API error from a failed response's status and body.
fn api_error(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|b| b.error);
    ClientError::Api { status, message }
}

fn multipart_form(request: UploadRequest) -> ClientResult<Form> {
    let mut form = Form::new();
    for (name, value) in request.fields {
        form = form.text(name, value);
    }
    for (name, file) in request.files {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        form = form.part(name, part);
    }
    Ok(form)
}

#[async_trait]
impl SessionPlanService for FestivalClient {
    async fn get_plan(&self, plan_id: DbId) -> ClientResult<Plan> {
        let response = self
            .request(Method::GET, &format!("/session-plans/{plan_id}"))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn create_day(&self, plan_id: DbId, input: &DayInput) -> ClientResult<Day> {
        self.send_json(Method::POST, &format!("/session-plans/{plan_id}/days"), input)
            .await
    }

    async fn update_day(
        &self,
        plan_id: DbId,
        day_id: DbId,
        input: &DayInput,
    ) -> ClientResult<Day> {
        self.send_json(
            Method::PUT,
            &format!("/session-plans/{plan_id}/days/{day_id}"),
            input,
        )
        .await
    }

    async fn delete_day(&self, plan_id: DbId, day_id: DbId) -> ClientResult<()> {
        self.send_delete(&format!("/session-plans/{plan_id}/days/{day_id}"))
            .await
    }

    async fn create_screen(&self, day_id: DbId, input: &ScreenInput) -> ClientResult<Screen> {
        self.send_json(Method::POST, &format!("/days/{day_id}/screens"), input)
            .await
    }

    async fn update_screen(
        &self,
        day_id: DbId,
        screen_id: DbId,
        input: &ScreenInput,
    ) -> ClientResult<Screen> {
        self.send_json(
            Method::PUT,
            &format!("/days/{day_id}/screens/{screen_id}"),
            input,
        )
        .await
    }

    async fn delete_screen(&self, day_id: DbId, screen_id: DbId) -> ClientResult<()> {
        self.send_delete(&format!("/days/{day_id}/screens/{screen_id}"))
            .await
    }

    async fn create_slot(&self, screen_id: DbId, input: &SlotInput) -> ClientResult<Slot> {
        self.send_json(Method::POST, &format!("/screens/{screen_id}/slots"), input)
            .await
    }

    async fn update_slot(
        &self,
        screen_id: DbId,
        slot_id: DbId,
        input: &SlotInput,
    ) -> ClientResult<Slot> {
        self.send_json(
            Method::PUT,
            &format!("/screens/{screen_id}/slots/{slot_id}"),
            input,
        )
        .await
    }

    async fn delete_slot(&self, screen_id: DbId, slot_id: DbId) -> ClientResult<()> {
        self.send_delete(&format!("/screens/{screen_id}/slots/{slot_id}"))
            .await
    }
}

#[async_trait]
impl<T: Resource> CollectionService<T> for FestivalClient {
    async fn list(&self) -> ClientResult<Vec<T>> {
        let response = self
            .request(Method::GET, &format!("/{}", T::PATH))
            .send()
            .await?;
        Self::parse_data(response).await
    }

    async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.send_delete(&format!("/{}/{id}", T::PATH)).await
    }
}

#[async_trait]
impl ContactService for FestivalClient {
    async fn set_contacted(&self, id: DbId, contacted: bool) -> ClientResult<Contact> {
        self.send_json(
            Method::PATCH,
            &format!("/contacts/{id}/contacted"),
            &ContactedBody { contacted },
        )
        .await
    }
}

#[async_trait]
impl UploadService for FestivalClient {
    async fn submit(&self, request: UploadRequest) -> ClientResult<serde_json::Value> {
        let (method, path) = match request.target {
            Some(id) => (Method::PUT, format!("/{}/{id}", request.resource)),
            None => (Method::POST, format!("/{}", request.resource)),
        };
        let form = multipart_form(request)?;
        let response = self.request(method, &path).multipart(form).send().await?;
        Self::parse_data(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn urls_are_rooted_at_api_v1() {
        let client = FestivalClient::new(&ClientConfig::new("http://localhost:3000/", None));
        assert_eq!(
            client.url("/contacts/4/contacted"),
            "http://localhost:3000/api/v1/contacts/4/contacted"
        );
    }

    #[test]
    fn error_body_message_is_extracted() {
        let body = r#"{"error":"Category 'Jury' still has 1 image(s)","code":"CONFLICT"}"#;
        let err = api_error(409, body);
        assert_matches!(
            err,
            ClientError::Api { status: 409, message: Some(ref m) } if m.contains("Jury")
        );
    }

    #[test]
    fn non_json_error_body_has_no_message() {
        let err = api_error(502, "<html>Bad Gateway</html>");
        assert_matches!(err, ClientError::Api { status: 502, message: None });
    }
}
