/// Connection settings for the festival API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API server, without the `/api/v1` suffix.
    pub api_url: String,
    /// Bearer token sent with every request, when the session has one.
    pub token: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables (and `.env`).
    ///
    /// | Variable             | Default                 |
    /// |----------------------|-------------------------|
    /// | `FESTIVAL_API_URL`   | `http://localhost:3000` |
    /// | `FESTIVAL_API_TOKEN` | none                    |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = std::env::var("FESTIVAL_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into());
        let token = std::env::var("FESTIVAL_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        Self::new(api_url, token)
    }

    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }
}
