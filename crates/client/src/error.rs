//! Errors from the client service layer.

use festival_core::error::CoreError;
use festival_core::notice::Notice;

/// Errors surfaced by [`FestivalClient`](crate::http::FestivalClient) and the
/// admin controllers built on it.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("<no message>"))]
    Api {
        status: u16,
        /// The `error` field of the JSON error body, when the server sent one.
        message: Option<String>,
    },

    /// A response body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The session's role does not allow the action.
    #[error("{0}")]
    Forbidden(String),

    /// A submission from the same form is still in flight.
    #[error("A submission is already in progress")]
    Busy,
}

/// Convenience alias for client results.
pub type ClientResult<T> = Result<T, ClientError>;

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Forbidden(msg) => ClientError::Forbidden(msg),
            CoreError::Validation(msg) => ClientError::Validation(msg),
            other => ClientError::Validation(other.to_string()),
        }
    }
}

impl ClientError {
    /// A message the user can act on, if this error carries one.
    ///
    /// Transport and decoding failures do not; callers fall back to a
    /// generic message for those.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            ClientError::Validation(msg) | ClientError::Forbidden(msg) => Some(msg),
            ClientError::Request(_) | ClientError::Decode(_) | ClientError::Busy => None,
        }
    }

    /// The server's message when present, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.to_notice(fallback).message
    }

    /// Error notice for this failure.
    pub fn to_notice(&self, fallback: &str) -> Notice {
        Notice::from_error_message(self.server_message(), fallback)
    }
}
