//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use att_core::AttendancePolicy;
use att_core::classify::DEFAULT_PRESENT_THRESHOLD_MINUTES;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the attendance backend.
    pub api_url: String,
    /// Optional bearer token for the backend.
    pub api_token: Option<String>,
    /// Minutes at or above which a day classifies as present.
    pub present_threshold_minutes: i64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("present_threshold_minutes", &self.present_threshold_minutes)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            api_token: None,
            present_threshold_minutes: DEFAULT_PRESENT_THRESHOLD_MINUTES,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ATT_*)
        figment = figment.merge(Env::prefixed("ATT_"));

        figment.extract()
    }

    /// The attendance policy carried by this configuration.
    #[must_use]
    pub const fn policy(&self) -> AttendancePolicy {
        AttendancePolicy {
            present_threshold_minutes: self.present_threshold_minutes,
        }
    }
}

/// Returns the platform-specific config directory for att.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("att"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_carries_the_stock_policy() {
        let config = Config::default();
        assert_eq!(config.present_threshold_minutes, 420);
        assert_eq!(config.policy().present_threshold_minutes, 420);
        assert!(config.api_token.is_none());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "api_url = \"https://api.example.com\"").unwrap();
        writeln!(file, "present_threshold_minutes = 360").unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.policy().present_threshold_minutes, 360);
    }

    #[test]
    fn debug_redacts_the_token() {
        let config = Config {
            api_token: Some("secret".to_string()),
            ..Config::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
    }
}
