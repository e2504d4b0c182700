//! Notification port definition.

use std::fmt;

use crate::domain::AppError;

/// Port for posting operator notifications.
pub trait Notifier: fmt::Debug + Send + Sync {
    /// Post a message with a short title.
    fn notify(&self, title: &str, text: &str) -> Result<(), AppError>;
}

/// Notifier that drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, title: &str, _text: &str) -> Result<(), AppError> {
        tracing::debug!(title, "Dropping notification: no connector configured");
        Ok(())
    }
}
