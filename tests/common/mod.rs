//! Shared testing utilities for dependency-updater CLI tests.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Options the tests write to config files; cleared from the test and child environments.
const CONFIG_KEYS: [&str; 8] = [
    "GERRIT_HOST",
    "GERRIT_STATE_PATH",
    "GERRIT_USERNAME",
    "GERRIT_PASSWORD",
    "MS_TEAMS_NOTIFY_URL",
    "REPOS",
    "NON_BLOCKING_REPOS",
    "suppress_warn",
];

/// Testing harness providing an isolated tool directory, `$HOME` and config environment.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    base_dir: PathBuf,
    home: PathBuf,
    saved_env: Vec<(&'static str, Option<OsString>)>,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        root.child("tool").create_dir_all().expect("Failed to create tool directory");
        root.child("home").create_dir_all().expect("Failed to create home directory");
        let base_dir = root.path().join("tool");
        let home = root.path().join("home");

        let mut saved_env = vec![("HOME", env::var_os("HOME"))];
        unsafe {
            env::set_var("HOME", &home);
        }
        for key in CONFIG_KEYS {
            saved_env.push((key, env::var_os(key)));
            unsafe {
                env::remove_var(key);
            }
        }

        Self { root, base_dir, home, saved_env }
    }

    /// Directory holding `config.yaml` and its template.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join("config.yaml")
    }

    pub fn write_config(&self, contents: &str) {
        self.root.child("tool/config.yaml").write_str(contents).expect("Failed to write config");
    }

    pub fn write_template(&self, contents: &str) {
        self.root
            .child("tool/config.yaml.template")
            .write_str(contents)
            .expect("Failed to write template");
    }

    pub fn write_ssh_config(&self, contents: &str) {
        self.root
            .child("home/.ssh/config")
            .write_str(contents)
            .expect("Failed to write ssh config");
    }

    /// Build a command for the compiled binary pointed at the test tool directory.
    pub fn cli(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("dependency-updater").expect("Failed to locate dependency-updater");
        cmd.env("HOME", self.home())
            .env_remove("RUST_LOG")
            .env_remove("DEPENDENCY_UPDATER_LOG")
            .arg("--base-dir")
            .arg(self.base_dir());
        for key in CONFIG_KEYS {
            cmd.env_remove(key);
        }
        cmd
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        for (key, original) in &self.saved_env {
            match original {
                Some(value) => unsafe {
                    env::set_var(key, value);
                },
                None => unsafe {
                    env::remove_var(key);
                },
            }
        }
    }
}
