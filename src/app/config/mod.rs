//! Settings loading for the updater.
//!
//! Reading the YAML file, bootstrapping it from its template and layering
//! environment overrides happens here; the option model and its parsing
//! live in `domain::settings`.

mod load_config;

pub use load_config::{
    ConfigLoader, DEFAULT_CONFIG_FILE, apply_env_overrides, default_base_dir, template_path,
};
