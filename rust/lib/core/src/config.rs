//! Console configuration.
//!
//! Reads/writes `~/.campus/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Console configuration file.
///
/// Holds the backend location plus the credentials saved by `campus login`.
/// The token is only a bootstrap for building a [`Session`](crate::Session);
/// nothing reads it ambiently after startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Backend base URL (e.g. "https://edu.example.com/api").
    #[serde(default = "default_server")]
    pub server: String,

    /// Bearer token (set by `campus login`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,

    /// Id of the logged-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Username of the logged-in user.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// UI locale (e.g. "en", "zh-CN").
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_server() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            token: String::new(),
            user_id: None,
            username: String::new(),
            request_timeout_secs: default_timeout(),
            locale: default_locale(),
        }
    }
}

impl ConsoleConfig {
    /// Default config file path: ~/.campus/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ConsoleConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Backend URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.server.trim_end_matches('/')
    }

    /// Whether a login token has been saved.
    pub fn has_credentials(&self) -> bool {
        !self.token.is_empty() && self.user_id.is_some()
    }

    /// Forget saved credentials (logout).
    pub fn clear_credentials(&mut self) {
        self.token.clear();
        self.username.clear();
        self.user_id = None;
    }
}

/// Return the console config directory (~/.campus).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".campus")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.server, "http://localhost:8080");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConsoleConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = ConsoleConfig {
            server: "https://edu.example.com/api/".to_string(),
            token: "tok-123".to_string(),
            user_id: Some(42),
            username: "registrar".to_string(),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let back = ConsoleConfig::load(&path).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.base_url(), "https://edu.example.com/api");
        assert!(back.has_credentials());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: ConsoleConfig = toml::from_str("server = \"http://10.0.0.5\"").unwrap();
        assert_eq!(config.server, "http://10.0.0.5");
        assert_eq!(config.locale, "en");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_clear_credentials() {
        let mut config = ConsoleConfig {
            token: "t".into(),
            user_id: Some(1),
            username: "u".into(),
            ..Default::default()
        };
        config.clear_credentials();
        assert!(!config.has_credentials());
        assert!(config.username.is_empty());
    }
}
