//! Multipart form parsing for the image-bearing resources.
//!
//! [`MultipartForm::parse`] reads every part up front and validates each
//! file against the shared upload rules, so handlers only ever see a form
//! whose files are acceptable and nothing is written to disk for a request
//! that is going to be rejected.

use std::collections::HashMap;
use std::str::FromStr;

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use chrono::NaiveDate;
use festival_core::error::CoreError;
use festival_core::upload::{
    optional_text, parse_number_or_zero, parse_remove_indices, require_text, validate_image,
};

use crate::error::{AppError, AppResult};

/// A validated image part.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Text fields and files of one multipart request.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Vec<UploadedImage>>,
}

impl MultipartForm {
    /// Read all parts. A file input left empty arrives as a part with a
    /// blank file name and no bytes; such parts are skipped.
    pub async fn parse(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();
            if name.is_empty() {
                continue;
            }

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().unwrap_or("").to_string();
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    validate_image(&content_type, bytes.len()).map_err(|e| match e {
                        CoreError::Validation(msg) => {
                            CoreError::Validation(format!("{file_name}: {msg}"))
                        }
                        other => other,
                    })?;
                    form.files.entry(name).or_default().push(UploadedImage {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
                None => {
                    let text = field.text().await.map_err(multipart_error)?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A trimmed, non-blank text field. `label` names the field in the error.
    pub fn required(&self, name: &str, label: &str) -> Result<String, CoreError> {
        require_text(label, self.text(name).unwrap_or(""))
    }

    /// For partial updates: `None` when the field was not sent, otherwise
    /// the same check as [`required`](Self::required).
    pub fn required_if_present(&self, name: &str, label: &str) -> Result<Option<String>, CoreError> {
        match self.text(name) {
            Some(_) => self.required(name, label).map(Some),
            None => Ok(None),
        }
    }

    /// A trimmed text field, `None` when absent or blank.
    pub fn optional(&self, name: &str) -> Option<String> {
        optional_text(self.text(name))
    }

    /// For partial updates of nullable fields: `None` when not sent,
    /// `Some(None)` when sent blank so the stored value is cleared.
    pub fn optional_if_present(&self, name: &str) -> Option<Option<String>> {
        self.text(name).map(|v| optional_text(Some(v)))
    }

    /// A numeric field, zero when absent or not a number.
    pub fn number_or_zero<T>(&self, name: &str) -> T
    where
        T: FromStr + Default,
    {
        parse_number_or_zero(self.text(name).unwrap_or(""))
    }

    /// A numeric field that must be present and parse.
    pub fn required_number<T: FromStr>(&self, name: &str, label: &str) -> Result<T, CoreError> {
        let raw = self.required(name, label)?;
        raw.parse()
            .map_err(|_| CoreError::Validation(format!("{label} must be a number")))
    }

    /// A `YYYY-MM-DD` date field that must be present.
    pub fn required_date(&self, name: &str, label: &str) -> Result<NaiveDate, CoreError> {
        let raw = self.required(name, label)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| CoreError::Validation(format!("{label} must be a date (YYYY-MM-DD)")))
    }

    /// For partial updates: `None` when the date was not sent.
    pub fn date_if_present(&self, name: &str, label: &str) -> Result<Option<NaiveDate>, CoreError> {
        match self.text(name) {
            Some(_) => self.required_date(name, label).map(Some),
            None => Ok(None),
        }
    }

    /// For partial updates: `None` when the number was not sent, zero when
    /// it was sent but is not a number.
    pub fn number_if_present<T>(&self, name: &str) -> Option<T>
    where
        T: FromStr + Default,
    {
        self.text(name).map(parse_number_or_zero::<T>)
    }

    /// The `remove_indices` JSON array, empty when absent.
    pub fn remove_indices(&self) -> Result<Vec<usize>, CoreError> {
        parse_remove_indices(self.text("remove_indices").unwrap_or(""))
    }

    /// Take the first file sent under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedImage> {
        let files = self.files.get_mut(name)?;
        if files.is_empty() {
            None
        } else {
            Some(files.remove(0))
        }
    }

    /// Take every file sent under `name`, in request order.
    pub fn take_files(&mut self, name: &str) -> Vec<UploadedImage> {
        self.files.remove(name).unwrap_or_default()
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    use super::*;

    const BOUNDARY: &str = "festivalboundary";

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(name: &str, file_name: &str, content_type: &str, data: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
             filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n{data}\r\n"
        )
    }

    async fn parse(parts: &[String]) -> AppResult<MultipartForm> {
        let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
        let request = Request::builder()
            .method("POST")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let multipart = Multipart::from_request(request, &()).await.unwrap();
        MultipartForm::parse(multipart).await
    }

    #[tokio::test]
    async fn fields_and_files_are_collected() {
        let mut form = parse(&[
            text_part("title", "  Opening Night "),
            text_part("seats", "abc"),
            file_part("images", "a.png", "image/png", "AAAA"),
            file_part("images", "b.jpg", "image/jpeg", "BBBB"),
        ])
        .await
        .unwrap();

        assert_eq!(form.required("title", "Title").unwrap(), "Opening Night");
        assert_eq!(form.number_or_zero::<i32>("seats"), 0);
        assert_eq!(form.optional("venue"), None);

        let images = form.take_files("images");
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].file_name, "a.png");
        assert_eq!(&images[1].bytes[..], b"BBBB");
        assert!(form.take_files("images").is_empty());
    }

    #[tokio::test]
    async fn empty_file_input_is_skipped() {
        let mut form = parse(&[
            text_part("name", "Jury"),
            file_part("cover_image", "", "application/octet-stream", ""),
        ])
        .await
        .unwrap();

        assert!(form.take_file("cover_image").is_none());
    }

    #[tokio::test]
    async fn disallowed_file_type_rejected() {
        let result = parse(&[file_part("image", "notes.pdf", "application/pdf", "%PDF")]).await;

        assert_matches!(result, Err(AppError::Core(CoreError::Validation(msg))) if msg.contains("notes.pdf"));
    }

    #[tokio::test]
    async fn missing_required_field_names_label() {
        let form = parse(&[text_part("title", "   ")]).await.unwrap();
        let err = form.required("title", "Title").unwrap_err();
        assert!(err.to_string().contains("Title is required"));
    }

    #[tokio::test]
    async fn dates_must_be_iso() {
        let form = parse(&[
            text_part("event_date", "2025-03-07"),
            text_part("workshop_date", "07/03/2025"),
        ])
        .await
        .unwrap();

        assert_eq!(
            form.required_date("event_date", "Date").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 7).unwrap()
        );
        assert!(form.required_date("workshop_date", "Date").is_err());
        assert_eq!(form.date_if_present("missing", "Date").unwrap(), None);
    }

    #[tokio::test]
    async fn partial_update_fields() {
        let form = parse(&[text_part("title", ""), text_part("year", "2025")]).await.unwrap();

        assert!(form.required_if_present("title", "Title").is_err());
        assert_eq!(form.required_if_present("venue", "Venue").unwrap(), None);
        assert_eq!(form.number_if_present::<i32>("year"), Some(2025));
        assert_eq!(form.number_if_present::<i32>("seats"), None);
    }

    #[tokio::test]
    async fn blank_nullable_field_clears() {
        let form = parse(&[text_part("venue", "  "), text_part("description", " New ")])
            .await
            .unwrap();

        assert_eq!(form.optional_if_present("venue"), Some(None));
        assert_eq!(
            form.optional_if_present("description"),
            Some(Some("New".to_string()))
        );
        assert_eq!(form.optional_if_present("photographer"), None);
    }

    #[tokio::test]
    async fn remove_indices_parsed_from_json() {
        let form = parse(&[text_part("remove_indices", "[1,3]")]).await.unwrap();
        assert_eq!(form.remove_indices().unwrap(), vec![1, 3]);

        let form = parse(&[]).await.unwrap();
        assert!(form.remove_indices().unwrap().is_empty());
    }
}
