//! User-facing notifications ("toasts").
//!
//! Every mutating action reports its outcome as exactly one [`Notice`].
//! Failure notices carry the server's message when it sent one and a
//! generic fallback otherwise, so no error goes unreported.

use serde::{Deserialize, Serialize};

/// Fallback shown when a failure carries no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Error notice using `message` unless it is missing or blank.
    pub fn from_error_message(message: Option<&str>, fallback: &str) -> Self {
        match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(message) => Self::error(message),
            None => Self::error(fallback),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_preferred() {
        let notice = Notice::from_error_message(Some("Category has images"), "Delete failed");
        assert!(notice.is_error());
        assert_eq!(notice.message, "Category has images");
    }

    #[test]
    fn blank_message_falls_back() {
        assert_eq!(
            Notice::from_error_message(Some("  "), "Delete failed").message,
            "Delete failed"
        );
        assert_eq!(
            Notice::from_error_message(None, GENERIC_ERROR_MESSAGE).message,
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn success_is_not_error() {
        assert!(!Notice::success("Saved").is_error());
    }
}
