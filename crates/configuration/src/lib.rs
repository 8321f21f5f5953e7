use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_tracing;
pub use settings::{
    AnalysisConfig, Config, BackendConfig, DashboardConfig, LogFormat, LoggingConfig, ServerConfig,
};

/// Prefix for environment overrides, e.g. `TRADESCOPE__BACKEND__BASE_URL`.
const ENV_PREFIX: &str = "TRADESCOPE";

/// Loads the application configuration from `config.toml` in the working directory.
///
/// The file is optional; every section falls back to its defaults. Environment
/// variables override file values, and the merged result is validated.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Same as [`load_config`] but reads the given file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(environment());
    finish(builder)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));
        finish(builder)
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.dashboard.max_insights, 24);
        assert!(config.dashboard.use_fallback_lists);
        assert_eq!(config.logging.format, LogFormat::Full);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = parse(
            r#"
            [server]
            port = 8080

            [dashboard]
            max_insights = 5

            [logging]
            format = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.dashboard.max_insights, 5);
        assert!(config.dashboard.use_fallback_lists);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_zero_insight_cap_is_rejected() {
        let err = parse("[dashboard]\nmax_insights = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_empty_backend_url_is_rejected() {
        let err = parse("[backend]\nbase_url = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_bad_host_is_rejected() {
        let err = parse("[server]\nhost = \"not a host\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress(_)));
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let vars: config::Map<String, String> = [
            ("TRADESCOPE__SERVER__PORT", "8080"),
            ("TRADESCOPE__BACKEND__BASE_URL", "http://analysis:5000"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let builder = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 9000\nbody_limit_mb = 10",
                config::FileFormat::Toml,
            ))
            .add_source(environment().source(Some(vars)));
        let config = finish(builder).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.body_limit_mb, 10);
        assert_eq!(config.backend.base_url, "http://analysis:5000");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config = load_config_from(Path::new("definitely-not-here.toml")).unwrap();
        assert_eq!(config.server.body_limit_mb, 50);
    }
}
