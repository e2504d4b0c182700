//! Post an operator message through the configured connector.

use crate::domain::{AppError, Settings};

/// Title used for messages sent from the command line.
pub fn message_title(settings: &Settings) -> String {
    format!("Dependency updater ({})", settings.args().branch)
}

pub fn execute(settings: &Settings, message: &str) -> Result<(), AppError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::config_error("Notification message must not be empty"));
    }
    settings.teams_connector().notify(&message_title(settings), message)
}
