//! Configuration loading for the binaries.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.crude-or-rude/config.toml` (user)
//! 3. `/etc/crude-or-rude/config.toml` (system)
//!
//! Secrets are loaded separately with mandatory permission checks:
//! 1. `~/.crude-or-rude/secrets.toml` (user, must be 0600)
//! 2. `/etc/crude-or-rude/secrets.toml` (system, must be 0600)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::builder::{CrudeOrRude, CrudeOrRudeBuilder};
use crate::providers::RetryConfig;
use crate::providers::anthropic::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::service::DEFAULT_MAX_BATCH_SIZE;
use crate::{CrudeOrRudeError, Result};

const APP_DIR: &str = ".crude-or-rude";
const SYSTEM_DIR: &str = "/etc/crude-or-rude";
const ANTHROPIC_ENV_VAR: &str = "ANTHROPIC_API_KEY";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reasoning: ReasoningConfig,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Reasoning collaborator settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReasoningConfig {
    /// Use the collaborator when a key is available (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_model(),
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    30
}

/// Retry settings for transient collaborator errors.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            jitter: true,
        }
    }
}

fn default_max_attempts() -> u32 {
    2
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        RetryConfig::new()
            .max_attempts(settings.max_attempts)
            .initial_delay(Duration::from_millis(settings.initial_delay_ms))
            .max_delay(Duration::from_millis(settings.max_delay_ms))
            .jitter(settings.jitter)
    }
}

/// Resource limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum headlines per batch call (default: 5).
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
        }
    }
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

/// Secrets configuration (API keys).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub anthropic: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.crude-or-rude/config.toml`
    /// 3. `/etc/crude-or-rude/config.toml`
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        Self::load_from_file(&path)
    }

    /// Like [`load`](Self::load), but built-in defaults when no file exists.
    ///
    /// An explicit path that does not exist is still an error.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Result<Self> {
        if explicit_path.is_some() {
            return Self::load(explicit_path);
        }
        match Self::find_config_path() {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CrudeOrRudeError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            CrudeOrRudeError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(CrudeOrRudeError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        Self::find_config_path().ok_or_else(|| {
            CrudeOrRudeError::Configuration(
                "No config file found. Create ~/.crude-or-rude/config.toml or /etc/crude-or-rude/config.toml"
                    .to_string(),
            )
        })
    }

    fn find_config_path() -> Option<PathBuf> {
        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(APP_DIR).join("config.toml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        // System config
        let system_config = Path::new(SYSTEM_DIR).join("config.toml");
        system_config.exists().then_some(system_config)
    }

    /// Pipeline builder reflecting this configuration.
    ///
    /// The collaborator is wired in only when reasoning is enabled and an
    /// API key is available; otherwise decisions are rule-based.
    pub fn pipeline_builder(&self, api_key: Option<String>) -> CrudeOrRudeBuilder {
        let builder = CrudeOrRude::builder();
        let Some(key) = api_key.filter(|_| self.reasoning.enabled) else {
            return builder;
        };
        builder
            .anthropic(key)
            .base_url(self.reasoning.base_url.clone())
            .model(self.reasoning.model.clone())
            .max_tokens(self.reasoning.max_tokens)
            .temperature(self.reasoning.temperature)
            .timeout(self.reasoning.timeout_secs)
            .retry(RetryConfig::from(&self.retry))
    }
}

impl Secrets {
    /// Load secrets from the standard locations with permission checks.
    ///
    /// Resolution order:
    /// 1. `~/.crude-or-rude/secrets.toml` (if exists, must be 0600)
    /// 2. `/etc/crude-or-rude/secrets.toml` (if exists, must be 0600)
    ///
    /// Returns empty secrets if no file exists (the key may come from the environment).
    pub fn load() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(APP_DIR).join("secrets.toml");
            if user_secrets.exists() {
                return Self::load_checked(&user_secrets);
            }
        }

        let system_secrets = Path::new(SYSTEM_DIR).join("secrets.toml");
        if system_secrets.exists() {
            return Self::load_checked(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// Load one secrets file after checking its permissions.
    pub fn load_checked(path: &Path) -> Result<Self> {
        Self::check_permissions(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            CrudeOrRudeError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            CrudeOrRudeError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            CrudeOrRudeError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        // Reject if group or other bits are set
        if mode & 0o077 != 0 {
            return Err(CrudeOrRudeError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        Ok(())
    }

    /// Anthropic API key, falling back to `ANTHROPIC_API_KEY`.
    ///
    /// A blank key in the secrets file counts as absent.
    pub fn anthropic_api_key(&self) -> Option<String> {
        resolve_api_key(
            self.anthropic.as_ref().map(|s| s.api_key.as_str()),
            || std::env::var(ANTHROPIC_ENV_VAR).ok(),
        )
    }
}

fn resolve_api_key(file_key: Option<&str>, env_key: impl FnOnce() -> Option<String>) -> Option<String> {
    let non_blank = |key: &String| !key.trim().is_empty();
    file_key
        .map(str::to_owned)
        .filter(non_blank)
        .or_else(|| env_key().filter(non_blank))
}
