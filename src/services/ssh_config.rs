//! SSH client configuration lookup.

use std::fs;
use std::path::{Path, PathBuf};

/// Conventional per-user SSH client configuration path.
pub fn default_ssh_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("config"))
}

/// Read the SSH client configuration at `path`, if it can be read as text.
pub fn read_ssh_config(path: &Path) -> Option<String> {
    if !path.is_file() {
        tracing::debug!("No SSH client config at {}", path.display());
        return None;
    }
    match fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) => {
            tracing::debug!("Skipping unreadable SSH client config {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::EnvVarGuard;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn reads_existing_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config");
        fs::write(&path, "Host example.com\n  User alice\n").unwrap();

        assert_eq!(read_ssh_config(&path).as_deref(), Some("Host example.com\n  User alice\n"));
    }

    #[test]
    fn missing_config_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_ssh_config(&tmp.path().join("config")), None);
    }

    #[test]
    fn directory_in_place_of_config_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_ssh_config(tmp.path()), None);
    }

    #[test]
    fn non_utf8_config_is_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x55]).unwrap();
        assert_eq!(read_ssh_config(&path), None);
    }

    #[test]
    #[serial]
    #[cfg(unix)]
    fn default_path_follows_home() {
        let tmp = TempDir::new().unwrap();
        let _guard = EnvVarGuard::set("HOME", tmp.path());

        assert_eq!(default_ssh_config_path(), Some(tmp.path().join(".ssh").join("config")));
    }
}
