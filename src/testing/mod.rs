//! Shared test doubles and fixtures.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::domain::settings::parse_settings_map;
use crate::domain::{ConfigSource, RunArgs, Settings};
use crate::ports::Environment;

/// In-memory environment snapshot.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl Environment for MapEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Restores a process environment variable when dropped.
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    pub fn set<K: Into<String>, V: AsRef<OsStr>>(key: K, value: V) -> Self {
        let key = key.into();
        let original = std::env::var_os(&key);
        unsafe {
            std::env::set_var(&key, value);
        }
        Self { key, original }
    }

    pub fn remove<K: Into<String>>(key: K) -> Self {
        let key = key.into();
        let original = std::env::var_os(&key);
        unsafe {
            std::env::remove_var(&key);
        }
        Self { key, original }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(original) = self.original.as_ref() {
            unsafe {
                std::env::set_var(&self.key, original);
            }
        } else {
            unsafe {
                std::env::remove_var(&self.key);
            }
        }
    }
}

/// Settings parsed from inline YAML as if read from `/opt/updater/config.yaml`.
pub fn settings_from_yaml(yaml: &str, args: RunArgs) -> Settings {
    let path = PathBuf::from("/opt/updater/config.yaml");
    let map = parse_settings_map(yaml, &path).expect("fixture YAML must parse");
    Settings::from_map(map, PathBuf::from("/opt/updater"), args, ConfigSource::File(path))
        .expect("fixture settings must build")
}

/// Write `contents` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture directory");
    }
    std::fs::write(&path, contents).expect("write fixture file");
    path
}
