use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// A single field-level problem found while validating the config.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation. Warnings do not block startup.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigIssue>,
    pub warnings: Vec<ConfigIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(ConfigIssue::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory. Always overwritten with the
    /// directory the file was loaded from.
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Single HTTPS origin all endpoint paths are appended to.
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Allow invalid/self-signed certificates (DEVELOPMENT ONLY)
    ///
    /// WARNING: This is a security risk. Only enable for local
    /// development against a self-signed backend host.
    #[serde(default)]
    pub allow_invalid_certs: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

const DEFAULT_BASE_URL: &str = "https://api.climatewise.app/api/v1";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: default_timeout_secs(),
            allow_invalid_certs: false,
        }
    }
}

impl Config {
    /// Load from `config.toml` in the platform config dir, falling back
    /// to defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        let config_dir = default_config_dir();
        Self::load_from(config_dir)
    }

    pub fn load_from(config_dir: PathBuf) -> Result<Self> {
        let path = config_dir.join("config.toml");
        if !path.exists() {
            return Ok(Self {
                config_dir,
                api: ApiConfig::default(),
            });
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Config =
            toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))?;
        config.config_dir = config_dir;
        Ok(config)
    }

    /// Path of the local preference database.
    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join("climatewise.db")
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        match Url::parse(&self.api.base_url) {
            Ok(url) => {
                if url.scheme() != "https" && url.scheme() != "http" {
                    result.add_error("api.base_url", "must be an http(s) URL");
                } else if url.scheme() == "http" {
                    result.add_warning("api.base_url", "plain http; data is unencrypted");
                }
            }
            Err(e) => result.add_error("api.base_url", format!("invalid URL: {e}")),
        }

        if self.api.timeout_secs == 0 {
            result.add_error("api.timeout_secs", "must be greater than zero");
        }
        if self.api.allow_invalid_certs {
            result.add_warning(
                "api.allow_invalid_certs",
                "TLS certificate verification is disabled",
            );
        }

        result
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("climatewise"))
        .unwrap_or_else(|| PathBuf::from(".climatewise"))
}
