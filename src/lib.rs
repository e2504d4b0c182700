//! dependency-updater: settings bootstrap for the Gerrit/Teams dependency-update bot.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use app::commands::{notify as notify_command, show_config as show_config_command};

pub use app::commands::show_config::OutputFormat;
pub use app::config::{ConfigLoader, DEFAULT_CONFIG_FILE, default_base_dir};
pub use domain::{AppError, ConfigSource, RunArgs, Settings, SettingsSummary};

/// Load settings from `config` under `base_dir`, reading the process
/// environment and `~/.ssh/config`.
pub fn load_settings(base_dir: &Path, config: &Path, args: RunArgs) -> Result<Settings, AppError> {
    ConfigLoader::new(base_dir).load(config, args)
}

/// Load settings and render the redacted summary.
pub fn show_config(
    base_dir: &Path,
    config: &Path,
    args: RunArgs,
    format: OutputFormat,
) -> Result<String, AppError> {
    let settings = load_settings(base_dir, config, args)?;
    show_config_command::render(&settings, format)
}

/// Load settings and post `message` through the Teams connector.
pub fn notify(
    base_dir: &Path,
    config: &Path,
    args: RunArgs,
    message: &str,
) -> Result<(), AppError> {
    let settings = load_settings(base_dir, config, args)?;
    notify_command::execute(&settings, message)
}
