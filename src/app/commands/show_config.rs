//! Render resolved settings for the operator.

use crate::domain::{AppError, Settings};

/// Output format for `config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Render the redacted settings summary.
pub fn render(settings: &Settings, format: OutputFormat) -> Result<String, AppError> {
    let summary = settings.summary();
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(&summary)
            .map_err(|e| AppError::config_error(format!("Failed to render settings: {}", e))),
        OutputFormat::Json => serde_json::to_string_pretty(&summary)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| AppError::config_error(format!("Failed to render settings: {}", e))),
    }
}
