//! # Configuration
//!
//! Loads settings from `<config_dir>/gitstreak/config.toml`. A missing file
//! yields defaults and `GITHUB_TOKEN` in the environment wins over the stored
//! token.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::github::DEFAULT_API_URL;

pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no GitHub token configured; run `gitstreak setup --token <token>` or set GITHUB_TOKEN")]
    MissingToken,

    #[error("could not determine a configuration directory")]
    NoConfigDir,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubSettings,

    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_api_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Upper bound on commits generated for a single date
    #[serde(default = "default_max_daily_commits")]
    pub max_daily_commits: u32,

    /// Trailing window, in days, that `fill` looks back over
    #[serde(default = "default_days_back")]
    pub days_back: u32,

    /// Pause between commits of the same date
    #[serde(default = "default_pacing")]
    pub pacing: bool,
}

fn default_max_daily_commits() -> u32 {
    8
}

fn default_days_back() -> u32 {
    30
}

fn default_pacing() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            max_daily_commits: default_max_daily_commits(),
            days_back: default_days_back(),
            pacing: default_pacing(),
        }
    }
}

impl Config {
    /// `<config_dir>/gitstreak/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("gitstreak").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Read the file at `path`, falling back to defaults when it does not exist.
    ///
    /// The environment token is not applied here; see [`Config::with_env`].
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` (or the default location) and apply `GITHUB_TOKEN`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        let config = Self::load_from(&path)?;
        Ok(config.with_env(std::env::var(TOKEN_ENV).ok()))
    }

    /// Override the stored token with an environment value, ignoring blanks.
    pub fn with_env(mut self, env_token: Option<String>) -> Self {
        if let Some(token) = env_token.filter(|t| !t.trim().is_empty()) {
            self.github.token = Some(token);
        }
        self
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.github
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token().ok_or(ConfigError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.preferences.max_daily_commits, 8);
        assert_eq!(config.preferences.days_back, 30);
        assert!(config.preferences.pacing);
        assert_eq!(config.github.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[preferences]\nmax_daily_commits = 4\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.preferences.max_daily_commits, 4);
        assert_eq!(config.preferences.days_back, 30);
        assert_eq!(config.github.token, None);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.github.token = Some("ghp_saved".to_string());
        config.preferences.pacing = false;

        config.save(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[preferences\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_token_overrides_stored() {
        let mut config = Config::default();
        config.github.token = Some("stored".to_string());

        let config = config.with_env(Some("from-env".to_string()));
        assert_eq!(config.token(), Some("from-env"));

        let config = config.with_env(Some("   ".to_string()));
        assert_eq!(config.token(), Some("from-env"));
    }

    #[test]
    fn test_require_token() {
        let mut config = Config::default();
        assert!(matches!(config.require_token(), Err(ConfigError::MissingToken)));

        config.github.token = Some("  ".to_string());
        assert!(config.require_token().is_err());

        config.github.token = Some("ghp_x".to_string());
        assert_eq!(config.require_token().unwrap(), "ghp_x");
    }
}
