use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty `config.toml` (or none at all)
/// yields a working local setup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Rejects settings that would only fail later at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "backend.base_url must not be empty".to_string(),
            ));
        }
        if self.dashboard.max_insights == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.max_insights must be at least 1".to_string(),
            ));
        }
        if self.analysis.interpreter.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "analysis.interpreter must not be empty".to_string(),
            ));
        }
        self.server.socket_addr()?;
        Ok(())
    }
}

/// Where the dashboard HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, in megabytes.
    pub body_limit_mb: usize,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            body_limit_mb: 50,
        }
    }
}

/// The backend that serves the analysis JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Scheme, host and port, without a trailing path (e.g. "http://localhost:5000").
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
        }
    }
}

/// How to invoke the external analysis script that regenerates the JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub interpreter: String,
    pub script: PathBuf,
    /// Directory the script is run from. Defaults to the current directory.
    pub working_dir: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            script: PathBuf::from("python_processing/trade_analytics_pipeline.py"),
            working_dir: None,
        }
    }
}

/// Tuning for the normalizer and cache.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Upper bound on the accumulated insight list.
    pub max_insights: usize,
    /// Substitute the built-in partner lists on first load when upstream has none.
    pub use_fallback_lists: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            max_insights: 24,
            use_fallback_lists: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            directory: None,
            file_prefix: "tradescope.log".to_string(),
        }
    }
}
