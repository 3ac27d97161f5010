//! Delivery of user-facing notices.

use std::sync::Arc;

use festival_core::notice::{Notice, NoticeLevel};

/// Receives the one notice each controller action produces.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

/// Writes notices to the log. Used when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(message = %notice.message, "Notice"),
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "Notice"),
        }
    }
}
