//! Collector configuration resolution
//!
//! The collector endpoint is resolved once at startup, from two sources in
//! strict precedence order:
//!
//! 1. Environment: `DIOCLES_XHOST` (base URL) and `DIOCLES_AUTHKEY` (shared
//!    secret). When `DIOCLES_XHOST` is set the config file is not consulted
//!    at all.
//! 2. Fallback file: `<install root>/config/diocles.json`, a JSON object with
//!    string fields `deathboard_uri` and `authkey`. The file only fills
//!    values the environment did not set: an env-set `DIOCLES_AUTHKEY` wins
//!    over the file's `authkey` even when the URL falls back to the file.
//!
//! A missing file, malformed JSON, or unreadable path degrades to offline
//! mode (no collector configured); resolution never fails startup.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the collector base URL, e.g. `http://xhost:3000`.
pub const ENV_XHOST: &str = "DIOCLES_XHOST";

/// Environment variable naming the shared secret sent as the `authkey` header.
pub const ENV_AUTHKEY: &str = "DIOCLES_AUTHKEY";

/// Resolved collector configuration
///
/// Both fields absent means offline mode: nothing is ever dispatched and the
/// health prober reports unconfigured.
#[derive(Debug, Clone, Default)]
pub struct CollectorConfig {
    /// Collector base URL, without a trailing slash
    pub base_url: Option<String>,
    /// Shared secret for the `authkey` request header
    pub auth_key: Option<String>,
}

/// Shape of the fallback config file
#[derive(Debug, Deserialize)]
struct ConfigFile {
    deathboard_uri: Option<String>,
    authkey: Option<String>,
}

impl CollectorConfig {
    /// Resolve configuration from the environment, falling back to the
    /// per-install JSON file under `root`.
    pub fn resolve(root: &Path) -> Self {
        let env_url = std::env::var(ENV_XHOST).ok().filter(|v| !v.is_empty());
        let env_key = std::env::var(ENV_AUTHKEY).ok().filter(|v| !v.is_empty());
        Self::resolve_with(env_url, env_key, &Self::config_path(root))
    }

    /// Resolution core, separated from process env for testability.
    fn resolve_with(
        env_url: Option<String>,
        env_key: Option<String>,
        path: &Path,
    ) -> Self {
        // An env-set URL wins outright and the file is never consulted. When
        // the URL falls back to the file, an env-set secret still wins over
        // the file's; the file only fills the gap.
        if env_url.is_some() {
            return Self::normalized(env_url, env_key);
        }

        match Self::read_file(path) {
            Ok(Some(file)) => {
                Self::normalized(file.deathboard_uri, env_key.or(file.authkey))
            }
            Ok(None) => {
                tracing::info!(path = %path.display(), "No collector config file, running offline");
                Self::normalized(None, env_key)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed reading collector config, running offline");
                Self::normalized(None, env_key)
            }
        }
    }

    fn read_file(path: &Path) -> crate::error::Result<Option<ConfigFile>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        let file: ConfigFile = serde_json::from_str(&content)?;
        Ok(Some(file))
    }

    fn normalized(base_url: Option<String>, auth_key: Option<String>) -> Self {
        Self {
            base_url: base_url
                .filter(|u| !u.trim().is_empty())
                .map(|u| u.trim_end_matches('/').to_string()),
            auth_key: auth_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Whether a collector base URL is configured.
    pub fn is_online(&self) -> bool {
        self.base_url.is_some()
    }

    /// Returns the fallback config file path: `<root>/config/diocles.json`.
    pub fn config_path(root: &Path) -> PathBuf {
        root.join("config").join("diocles.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let cfg_dir = dir.path().join("config");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        let path = cfg_dir.join("diocles.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_env_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"deathboard_uri": "http://file:3000", "authkey": "file-key"}"#,
        );

        let config = CollectorConfig::resolve_with(
            Some("http://env:3000".to_string()),
            Some("env-key".to_string()),
            &path,
        );
        assert_eq!(config.base_url.as_deref(), Some("http://env:3000"));
        assert_eq!(config.auth_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_env_url_without_key_skips_file_entirely() {
        // No per-field merging: if the env URL is set, the file's authkey is
        // not consulted either.
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"authkey": "file-key"}"#);

        let config = CollectorConfig::resolve_with(
            Some("http://env:3000".to_string()),
            None,
            &path,
        );
        assert_eq!(config.base_url.as_deref(), Some("http://env:3000"));
        assert!(config.auth_key.is_none());
    }

    #[test]
    fn test_env_authkey_survives_file_url_fallback() {
        // URL comes from the file, but the env-set secret still wins over
        // the file's.
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"deathboard_uri": "http://file:3000", "authkey": "file-key"}"#,
        );

        let config =
            CollectorConfig::resolve_with(None, Some("env-key".to_string()), &path);
        assert_eq!(config.base_url.as_deref(), Some("http://file:3000"));
        assert_eq!(config.auth_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_env_authkey_kept_without_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config").join("diocles.json");

        let config =
            CollectorConfig::resolve_with(None, Some("env-key".to_string()), &path);
        assert!(!config.is_online());
        assert_eq!(config.auth_key.as_deref(), Some("env-key"));
    }

    #[test]
    fn test_file_fallback() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"deathboard_uri": "http://file:3000/", "authkey": "file-key"}"#,
        );

        let config = CollectorConfig::resolve_with(None, None, &path);
        // Trailing slash is trimmed.
        assert_eq!(config.base_url.as_deref(), Some("http://file:3000"));
        assert_eq!(config.auth_key.as_deref(), Some("file-key"));
        assert!(config.is_online());
    }

    #[test]
    fn test_missing_file_is_offline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config").join("diocles.json");

        let config = CollectorConfig::resolve_with(None, None, &path);
        assert!(!config.is_online());
        assert!(config.auth_key.is_none());
    }

    #[test]
    fn test_malformed_file_is_offline() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{not json");

        let config = CollectorConfig::resolve_with(None, None, &path);
        assert!(!config.is_online());
    }

    #[test]
    fn test_empty_values_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"deathboard_uri": "", "authkey": ""}"#);

        let config = CollectorConfig::resolve_with(None, None, &path);
        assert!(!config.is_online());
        assert!(config.auth_key.is_none());
    }

    #[test]
    fn test_config_path() {
        let path = CollectorConfig::config_path(Path::new("/srv/mc"));
        assert_eq!(path, PathBuf::from("/srv/mc/config/diocles.json"));
    }
}
