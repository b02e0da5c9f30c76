//! Layered client configuration.
//!
//! Settings are read from `config.toml` in the user config directory
//! (`<config_dir>/taskboard/config.toml`), then overridden by environment
//! variables, then by CLI flags.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//! path_prefix = "/api"
//!
//! [session]
//! store_path = "/home/me/.local/share/taskboard/session.json"
//!
//! [logging]
//! log_to_file = false
//! ```
//!
//! | Setting            | Environment variable    |
//! |--------------------|-------------------------|
//! | `api.base_url`     | `TASKBOARD_API_URL`     |
//! | `api.path_prefix`  | `TASKBOARD_API_PREFIX`  |
//! | `session.store_path` | `TASKBOARD_SESSION_FILE` |

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_API_URL: &str = "TASKBOARD_API_URL";
pub const ENV_API_PREFIX: &str = "TASKBOARD_API_PREFIX";
pub const ENV_SESSION_FILE: &str = "TASKBOARD_SESSION_FILE";

const APP_DIR: &str = "taskboard";
const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.json";

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_path_prefix() -> String {
    "/api".to_string()
}

/// Where the REST service lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path_prefix: default_path_prefix(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSection {
    /// Override for the session file location
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Also write logs to a daily-rolling file under the data directory
    #[serde(default)]
    pub log_to_file: bool,
}

/// The complete config.toml structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskboardToml {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub session: SessionSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl TaskboardToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config.toml")
    }

    /// Returns the default configuration if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return human-readable warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            warnings.push(format!(
                "Invalid api.base_url '{}': should start with http:// or https://",
                self.api.base_url
            ));
        }
        if !self.api.path_prefix.is_empty() && !self.api.path_prefix.starts_with('/') {
            warnings.push(format!(
                "Invalid api.path_prefix '{}': should start with '/'",
                self.api.path_prefix
            ));
        }

        warnings
    }
}

/// Default location of config.toml.
pub fn default_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Directory for the session file and log files.
pub fn default_data_dir() -> Result<PathBuf> {
    let dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dir.join(APP_DIR))
}

/// Fully resolved configuration (file → environment → CLI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub config_path: PathBuf,
    pub base_url: String,
    pub path_prefix: String,
    pub session_path: PathBuf,
    pub data_dir: PathBuf,
    pub log_to_file: bool,
    pub verbose: bool,
    /// The parsed file, kept for `config show`
    pub toml: TaskboardToml,
}

impl ClientConfig {
    /// Resolve configuration from the process environment.
    pub fn load(
        config_path: Option<PathBuf>,
        api_url: Option<String>,
        verbose: bool,
    ) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => default_config_path()?,
        };
        let data_dir = default_data_dir()?;
        Self::resolve(config_path, data_dir, api_url, verbose, |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolve configuration with an explicit environment lookup.
    pub fn resolve<F>(
        config_path: PathBuf,
        data_dir: PathBuf,
        api_url: Option<String>,
        verbose: bool,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let toml = TaskboardToml::load_or_default(&config_path)?;

        let base_url = api_url
            .or_else(|| env(ENV_API_URL))
            .unwrap_or_else(|| toml.api.base_url.clone());
        let path_prefix = env(ENV_API_PREFIX).unwrap_or_else(|| toml.api.path_prefix.clone());
        let session_path = env(ENV_SESSION_FILE)
            .map(PathBuf::from)
            .or_else(|| toml.session.store_path.clone())
            .unwrap_or_else(|| data_dir.join(SESSION_FILE));

        Ok(Self {
            config_path,
            base_url,
            path_prefix,
            session_path,
            data_dir,
            log_to_file: toml.logging.log_to_file,
            verbose,
            toml,
        })
    }

    /// Base URL joined with the API path segment, without a trailing slash.
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.path_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, prefix)
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}
