//! Settings loading from the tool directory, environment and SSH config.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_yaml::Value;

use crate::domain::settings::{derive_review_ref, parse_settings_map};
use crate::domain::{AppError, ConfigSource, RunArgs, Settings, SettingsMap};
use crate::ports::{Environment, ProcessEnvironment};
use crate::services::{TeamsConnector, default_ssh_config_path, read_ssh_config};

/// Configuration file name used when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

const TEMPLATE_SUFFIX: &str = ".template";

/// Tool root holding `config.yaml` and its checked-in template.
///
/// Resolved from the running executable: the nearest ancestor of its
/// directory that holds the configuration file or its template, otherwise
/// the executable's own directory.
pub fn default_base_dir() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => base_dir_for_executable(&exe),
        Err(e) => {
            tracing::warn!("Cannot locate the running executable ({}); using ./", e);
            PathBuf::from(".")
        }
    }
}

fn base_dir_for_executable(exe: &Path) -> PathBuf {
    let Some(exe_dir) = exe.parent() else {
        return PathBuf::from(".");
    };
    let config_path = |dir: &Path| dir.join(DEFAULT_CONFIG_FILE);
    exe_dir
        .ancestors()
        .find(|dir| config_path(dir).is_file() || template_path(&config_path(dir)).is_file())
        .unwrap_or(exe_dir)
        .to_path_buf()
}

/// Sibling template path for a configuration file (`<name>.template`).
pub fn template_path(config_path: &Path) -> PathBuf {
    let mut name = config_path.file_name().map(OsString::from).unwrap_or_default();
    name.push(TEMPLATE_SUFFIX);
    config_path.with_file_name(name)
}

/// Builds `Settings` from a YAML file, environment overrides and the
/// operator's SSH client configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader<E: Environment = ProcessEnvironment> {
    base_dir: PathBuf,
    environment: E,
    ssh_config_path: Option<PathBuf>,
}

impl ConfigLoader<ProcessEnvironment> {
    /// Loader reading the process environment and `~/.ssh/config`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            environment: ProcessEnvironment,
            ssh_config_path: default_ssh_config_path(),
        }
    }
}

impl<E: Environment> ConfigLoader<E> {
    /// Replace the environment the overrides are read from.
    pub fn with_environment<F: Environment>(self, environment: F) -> ConfigLoader<F> {
        ConfigLoader { base_dir: self.base_dir, environment, ssh_config_path: self.ssh_config_path }
    }

    /// Replace the SSH client configuration location; `None` skips derivation.
    pub fn with_ssh_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.ssh_config_path = path;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Load settings from `path`, resolved against the base directory.
    ///
    /// A missing file is bootstrapped from its `.template` sibling. When the
    /// template is missing as well the load continues with no options, and
    /// required options fail when first read.
    pub fn load(&self, path: impl AsRef<Path>, args: RunArgs) -> Result<Settings, AppError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(AppError::config_error("Config file path must not be empty"));
        }
        let config_path = self.base_dir.join(path);

        let (mut map, source) = self.read_or_bootstrap(config_path)?;
        apply_env_overrides(&mut map, &self.environment);

        let settings = Settings::from_map(map, self.base_dir.clone(), args, source)?;
        let connector = TeamsConnector::new(&settings);
        let settings = settings.with_teams_connector(Arc::new(connector));

        let state_ref = self.derive_state_ref(&settings);
        Ok(settings.with_state_ref(state_ref))
    }

    fn read_or_bootstrap(
        &self,
        config_path: PathBuf,
    ) -> Result<(SettingsMap, ConfigSource), AppError> {
        if config_path.exists() {
            let map = read_settings_file(&config_path)?;
            return Ok((map, ConfigSource::File(config_path)));
        }

        let template = template_path(&config_path);
        match fs::copy(&template, &config_path) {
            Ok(_) => {
                tracing::info!(
                    "Config file not found, so created {} from the template.",
                    config_path.display()
                );
                let map = read_settings_file(&config_path)?;
                Ok((map, ConfigSource::Template(config_path)))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::error!(
                    "Unable to load config because neither {} nor {} was found on disk. \
                     Restore the template from the repository.",
                    config_path.display(),
                    template.display()
                );
                Ok((SettingsMap::new(), ConfigSource::Missing(config_path)))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn derive_state_ref(&self, settings: &Settings) -> Option<String> {
        let ssh_config = read_ssh_config(self.ssh_config_path.as_deref()?)?;
        let host = settings.gerrit_host().ok()?.host_str()?;

        let state_ref = derive_review_ref(&ssh_config, host, settings.gerrit_username().ok());
        match &state_ref {
            Some(state_ref) => tracing::debug!("Using personal review branch {}", state_ref),
            None => tracing::debug!("No SSH User entry found for {}", host),
        }
        state_ref
    }
}

fn read_settings_file(path: &Path) -> Result<SettingsMap, AppError> {
    let content = fs::read_to_string(path)?;
    parse_settings_map(&content, path)
}

/// Replace options with same-named, non-empty environment variables.
///
/// Only options already present in `map` are considered; the replacement is
/// always a string.
pub fn apply_env_overrides(map: &mut SettingsMap, environment: &impl Environment) {
    for (key, value) in map.iter_mut() {
        if let Some(replacement) = environment.var(key).filter(|v| !v.is_empty()) {
            tracing::info!("Overriding config option {} with environment variable.", key);
            *value = Value::String(replacement);
        }
    }
}
