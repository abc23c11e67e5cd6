//! Pipeline configuration.
//!
//! All tunables load from a TOML file with built-in defaults, so the binary
//! runs with zero configuration. Bearer credentials are never part of the
//! file — they are injected through environment variables at client build
//! time (see [`defaults::STORE_TOKEN_ENV`] / [`defaults::ANALYSIS_TOKEN_ENV`]).
//!
//! ## Loading order
//!
//! 1. `NEUROPULSE_CONFIG` environment variable (path to TOML file)
//! 2. `neuropulse.toml` in the current working directory
//! 3. Built-in defaults

pub mod defaults;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration load / validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Root configuration for one pipeline deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote source payloads to fetch each cycle
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Analysis-service settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Windowing and playback timing
    #[serde(default)]
    pub timing: TimingConfig,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            analysis: AnalysisConfig::default(),
            timing: TimingConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

/// Remote file-store sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// File-store base URL; source ids are appended as path segments
    pub base_url: String,

    /// Content identifiers to fetch, one payload each
    pub ids: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://storage.googleapis.com/neuropulse-recordings".to_string(),
            ids: vec![
                "session-01.csv".to_string(),
                "session-02.csv".to_string(),
                "session-03.csv".to_string(),
                "session-04.csv".to_string(),
            ],
        }
    }
}

/// Remote analysis (language-model) service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Chat-completions endpoint URL
    pub endpoint: String,

    /// Model name sent in the request body
    pub model: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::ANALYSIS_ENDPOINT.to_string(),
            model: defaults::ANALYSIS_MODEL.to_string(),
        }
    }
}

/// Windowing and playback timing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Analysis window duration (seconds)
    pub window_interval_secs: f64,

    /// Live-replay tick period (milliseconds)
    pub playback_tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            window_interval_secs: defaults::WINDOW_INTERVAL_SECS,
            playback_tick_ms: defaults::PLAYBACK_TICK_MS,
        }
    }
}

/// HTTP transport settings shared by both remote collaborators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::HTTP_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load configuration using the standard search order:
    /// 1. `$NEUROPULSE_CONFIG` environment variable
    /// 2. `./neuropulse.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("NEUROPULSE_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from NEUROPULSE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from NEUROPULSE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "NEUROPULSE_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("neuropulse.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./neuropulse.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./neuropulse.toml, using defaults");
                }
            }
        }

        info!("No neuropulse.toml found — using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.ids.is_empty() {
            return Err(ConfigError::Invalid(
                "sources.ids must list at least one source".to_string(),
            ));
        }
        if self.sources.base_url.is_empty() {
            return Err(ConfigError::Invalid(
                "sources.base_url must not be empty".to_string(),
            ));
        }
        if self.timing.window_interval_secs <= 0.0
            || !self.timing.window_interval_secs.is_finite()
        {
            return Err(ConfigError::Invalid(format!(
                "timing.window_interval_secs must be positive and finite (got {})",
                self.timing.window_interval_secs
            )));
        }
        if self.timing.playback_tick_ms == 0 {
            return Err(ConfigError::Invalid(
                "timing.playback_tick_ms must be positive".to_string(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Descriptors for every configured source, base URL already resolved.
    pub fn source_descriptors(&self) -> Vec<crate::types::SourceDescriptor> {
        self.sources
            .ids
            .iter()
            .map(|id| crate::types::SourceDescriptor::new(&self.sources.base_url, id))
            .collect()
    }
}

/// Read a bearer token from the given environment variable.
///
/// Returns `None` when unset or empty — callers degrade to unauthenticated
/// requests rather than failing startup, since some deployments front the
/// store with a proxy that injects credentials.
pub fn bearer_token_from_env(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(token) if !token.trim().is_empty() => Some(token),
        _ => None,
    }
}
