pub mod error;
pub mod run_args;
pub mod settings;

pub use error::AppError;
pub use run_args::RunArgs;
pub use settings::{ConfigSource, Settings, SettingsMap, SettingsSummary};
