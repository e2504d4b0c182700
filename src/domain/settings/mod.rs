//! Merged runtime settings for a dependency-update round.

pub mod host;
pub mod map;
pub mod review_ref;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_yaml::Value;
use url::Url;

use crate::domain::{AppError, RunArgs};
use crate::ports::{NoopNotifier, Notifier};

pub use host::normalize_host;
pub use map::{SettingsMap, parse_settings_map};
pub use review_ref::{derive_review_ref, review_ref_for};

pub const GERRIT_HOST: &str = "GERRIT_HOST";
pub const GERRIT_STATE_PATH: &str = "GERRIT_STATE_PATH";
pub const GERRIT_USERNAME: &str = "GERRIT_USERNAME";
pub const GERRIT_PASSWORD: &str = "GERRIT_PASSWORD";
pub const MS_TEAMS_NOTIFY_URL: &str = "MS_TEAMS_NOTIFY_URL";
pub const REPOS: &str = "REPOS";
pub const NON_BLOCKING_REPOS: &str = "NON_BLOCKING_REPOS";
pub const SUPPRESS_WARN: &str = "suppress_warn";

/// Options with a typed field on `Settings`.
pub const RECOGNIZED_KEYS: [&str; 8] = [
    GERRIT_HOST,
    GERRIT_STATE_PATH,
    GERRIT_USERNAME,
    GERRIT_PASSWORD,
    MS_TEAMS_NOTIFY_URL,
    REPOS,
    NON_BLOCKING_REPOS,
    SUPPRESS_WARN,
];

const REDACTED: &str = "********";

/// Where the option mapping came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Existing configuration file.
    File(PathBuf),
    /// Configuration file freshly copied from its template.
    Template(PathBuf),
    /// Neither the file nor its template exists.
    Missing(PathBuf),
}

impl ConfigSource {
    /// Path of the configuration file, whether or not it exists.
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::File(path)
            | ConfigSource::Template(path)
            | ConfigSource::Missing(path) => path,
        }
    }

    /// Whether an option mapping was actually read from disk.
    pub fn is_loaded(&self) -> bool {
        !matches!(self, ConfigSource::Missing(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfigSource::File(_) => "file",
            ConfigSource::Template(_) => "template",
            ConfigSource::Missing(_) => "missing",
        }
    }
}

/// Configuration for one invocation of the updater.
///
/// Built once by `ConfigLoader`; every field is read through accessors.
/// Required options that were never configured surface as
/// `AppError::MissingConfigKey` when read.
#[derive(Clone)]
pub struct Settings {
    cwd: PathBuf,
    args: RunArgs,
    source: ConfigSource,
    gerrit_host: Option<Url>,
    gerrit_state_path: Option<String>,
    gerrit_username: Option<String>,
    gerrit_password: Option<String>,
    ms_teams_notify_url: Option<String>,
    repos: Vec<String>,
    non_blocking_repos: Vec<String>,
    suppress_warn: bool,
    state_ref: Option<String>,
    extra: SettingsMap,
    teams_connector: Arc<dyn Notifier>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("cwd", &self.cwd)
            .field("args", &self.args)
            .field("source", &self.source)
            .field("gerrit_host", &self.gerrit_host.as_ref().map(Url::as_str))
            .field("gerrit_state_path", &self.gerrit_state_path)
            .field("gerrit_username", &self.gerrit_username)
            .field("gerrit_password", &self.gerrit_password.as_ref().map(|_| REDACTED))
            .field("ms_teams_notify_url", &self.ms_teams_notify_url)
            .field("repos", &self.repos)
            .field("non_blocking_repos", &self.non_blocking_repos)
            .field("suppress_warn", &self.suppress_warn)
            .field("state_ref", &self.state_ref)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .field("teams_connector", &self.teams_connector)
            .finish()
    }
}

impl Settings {
    /// Build settings from a merged option mapping.
    ///
    /// `GERRIT_HOST` is normalized here. It is required whenever `source`
    /// was read from disk; with no configuration at all it stays unset.
    /// Other recognized options holding unusable values are logged and left
    /// in `extra`.
    pub fn from_map(
        mut map: SettingsMap,
        cwd: PathBuf,
        args: RunArgs,
        source: ConfigSource,
    ) -> Result<Self, AppError> {
        let raw_host = match map.remove(GERRIT_HOST).map(scalar_string) {
            Some(Err(raw)) => {
                return Err(AppError::InvalidHost(format!(
                    "expected a single value, found {}",
                    map::value_kind(&raw)
                )));
            }
            Some(Ok(host)) => host.filter(|host| !host.trim().is_empty()),
            None => None,
        };
        let gerrit_host = match raw_host {
            Some(raw) => Some(normalize_host(&raw)?),
            None if source.is_loaded() => {
                return Err(AppError::InvalidHost(format!(
                    "{} is missing from {}",
                    GERRIT_HOST,
                    source.path().display()
                )));
            }
            None => None,
        };

        Ok(Self {
            gerrit_host,
            gerrit_state_path: take_string(&mut map, GERRIT_STATE_PATH),
            gerrit_username: take_string(&mut map, GERRIT_USERNAME),
            gerrit_password: take_string(&mut map, GERRIT_PASSWORD),
            ms_teams_notify_url: take_string(&mut map, MS_TEAMS_NOTIFY_URL),
            repos: take_list(&mut map, REPOS),
            non_blocking_repos: take_list(&mut map, NON_BLOCKING_REPOS),
            suppress_warn: take_flag(&mut map, SUPPRESS_WARN),
            state_ref: None,
            extra: map,
            teams_connector: Arc::new(NoopNotifier),
            cwd,
            args,
            source,
        })
    }

    pub(crate) fn with_teams_connector(mut self, connector: Arc<dyn Notifier>) -> Self {
        self.teams_connector = connector;
        self
    }

    pub(crate) fn with_state_ref(mut self, state_ref: Option<String>) -> Self {
        self.state_ref = state_ref;
        self
    }

    /// Base directory the configuration file was resolved against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Normalized Gerrit endpoint.
    pub fn gerrit_host(&self) -> Result<&Url, AppError> {
        self.gerrit_host.as_ref().ok_or(AppError::MissingConfigKey(GERRIT_HOST))
    }

    pub fn gerrit_state_path(&self) -> Result<&str, AppError> {
        require(&self.gerrit_state_path, GERRIT_STATE_PATH)
    }

    pub fn gerrit_username(&self) -> Result<&str, AppError> {
        require(&self.gerrit_username, GERRIT_USERNAME)
    }

    pub fn gerrit_password(&self) -> Result<&str, AppError> {
        require(&self.gerrit_password, GERRIT_PASSWORD)
    }

    /// Teams webhook as configured, before any URL validation.
    pub fn ms_teams_notify_url(&self) -> Option<&str> {
        self.ms_teams_notify_url.as_deref()
    }

    pub fn repos(&self) -> &[String] {
        &self.repos
    }

    pub fn non_blocking_repos(&self) -> &[String] {
        &self.non_blocking_repos
    }

    pub fn suppress_warn(&self) -> bool {
        self.suppress_warn
    }

    /// Personal review-branch reference, when one could be derived.
    pub fn state_ref(&self) -> Option<&str> {
        self.state_ref.as_deref()
    }

    /// Options without a typed field, plus recognized options whose value
    /// could not be used, kept as written.
    pub fn extra(&self) -> &SettingsMap {
        &self.extra
    }

    pub fn teams_connector(&self) -> &dyn Notifier {
        self.teams_connector.as_ref()
    }

    /// Printable view with secrets redacted.
    pub fn summary(&self) -> SettingsSummary {
        SettingsSummary {
            source: self.source.label().to_string(),
            config_path: self.source.path().display().to_string(),
            base_dir: self.cwd.display().to_string(),
            gerrit_host: self.gerrit_host.as_ref().map(|url| url.as_str().to_string()),
            gerrit_state_path: self.gerrit_state_path.clone(),
            gerrit_username: self.gerrit_username.clone(),
            gerrit_password: self.gerrit_password.as_ref().map(|_| REDACTED.to_string()),
            ms_teams_notify_url: self.ms_teams_notify_url.clone(),
            repos: self.repos.clone(),
            non_blocking_repos: self.non_blocking_repos.clone(),
            suppress_warn: self.suppress_warn,
            state_ref: self.state_ref.clone(),
            branch: self.args.branch.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// Serializable snapshot of `Settings` for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsSummary {
    pub source: String,
    pub config_path: String,
    pub base_dir: String,
    pub gerrit_host: Option<String>,
    pub gerrit_state_path: Option<String>,
    pub gerrit_username: Option<String>,
    pub gerrit_password: Option<String>,
    pub ms_teams_notify_url: Option<String>,
    pub repos: Vec<String>,
    pub non_blocking_repos: Vec<String>,
    pub suppress_warn: bool,
    pub state_ref: Option<String>,
    pub branch: String,
    #[serde(skip_serializing_if = "SettingsMap::is_empty")]
    pub extra: SettingsMap,
}

fn require<'a>(value: &'a Option<String>, key: &'static str) -> Result<&'a str, AppError> {
    value.as_deref().ok_or(AppError::MissingConfigKey(key))
}

/// Remove `key` as a string, kept exactly as written. Blank strings count as unset.
///
/// A value of the wrong shape is logged and moved to `extra`.
fn take_string(map: &mut SettingsMap, key: &str) -> Option<String> {
    let value = map.remove(key)?;
    match scalar_string(value) {
        Ok(text) => text.filter(|text| !text.trim().is_empty()),
        Err(raw) => {
            tracing::warn!(
                "Ignoring config option {}: expected a single value, found {}",
                key,
                map::value_kind(&raw)
            );
            map.insert(key.to_string(), raw);
            None
        }
    }
}

/// Remove `key` as a list. A string value is split on commas.
fn take_list(map: &mut SettingsMap, key: &str) -> Vec<String> {
    match map.remove(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Sequence(items)) => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                match scalar_string(item) {
                    Ok(Some(text)) if !text.trim().is_empty() => list.push(text),
                    Ok(_) => {}
                    Err(raw) => tracing::warn!(
                        "Skipping entry in config option {}: expected a single value, found {}",
                        key,
                        map::value_kind(&raw)
                    ),
                }
            }
            list
        }
        Some(value) => match scalar_string(value) {
            Ok(Some(joined)) => joined
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            Ok(None) => Vec::new(),
            Err(raw) => {
                tracing::warn!(
                    "Ignoring config option {}: expected a list, found {}",
                    key,
                    map::value_kind(&raw)
                );
                map.insert(key.to_string(), raw);
                Vec::new()
            }
        },
    }
}

/// Remove `key` as a boolean flag. Environment overrides arrive as strings.
///
/// Values that do not read as a boolean leave the flag off and stay in `extra`.
fn take_flag(map: &mut SettingsMap, key: &str) -> bool {
    let Some(value) = map.remove(key) else {
        return false;
    };
    let flag = match &value {
        Value::Null => Some(false),
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => Some(number.as_f64() != Some(0.0)),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "" | "0" | "false" | "no" | "off" => Some(false),
            "1" | "true" | "yes" | "on" => Some(true),
            _ => None,
        },
        _ => None,
    };
    match flag {
        Some(flag) => flag,
        None => {
            let shown = match &value {
                Value::String(text) => format!("'{}'", text),
                other => map::value_kind(other).to_string(),
            };
            tracing::warn!("Ignoring config option {}: {} is not a boolean", key, shown);
            map.insert(key.to_string(), value);
            false
        }
    }
}

/// Scalar rendered as a string; sequences and mappings are handed back.
fn scalar_string(value: Value) -> Result<Option<String>, Value> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Tagged(tagged) => scalar_string(tagged.value),
        other => Err(other),
    }
}
