//! Raw option mapping as read from the YAML configuration file.

use std::collections::BTreeMap;
use std::path::Path;

use serde_yaml::Value;

use crate::domain::AppError;

/// Top-level option name to raw YAML value.
pub type SettingsMap = BTreeMap<String, Value>;

/// Parse configuration file content into a top-level option mapping.
///
/// An empty document yields an empty mapping. Any other top-level shape is
/// rejected.
pub fn parse_settings_map(content: &str, path: &Path) -> Result<SettingsMap, AppError> {
    let display = path.display().to_string();
    if content.trim().is_empty() {
        return Ok(SettingsMap::new());
    }

    let value: Value =
        serde_yaml::from_str(content).map_err(|e| AppError::parse_error(display.clone(), e))?;

    match value {
        Value::Null => Ok(SettingsMap::new()),
        Value::Mapping(mapping) => mapping
            .into_iter()
            .map(|(key, value)| Ok((option_name(key, &display)?, value)))
            .collect(),
        other => Err(AppError::parse_error(
            display,
            format!("expected a mapping of options at the top level, found {}", value_kind(&other)),
        )),
    }
}

fn option_name(key: Value, path: &str) -> Result<String, AppError> {
    match key {
        Value::String(name) => Ok(name),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(AppError::parse_error(
            path,
            format!("option names must be scalars, found {}", value_kind(&other)),
        )),
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
