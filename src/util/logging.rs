//! Structured logging setup
//!
//! Logs go to stderr so that detection output on stdout stays machine
//! readable. The subscriber can only be installed once per process.
//!
//! # Example
//!
//! ```no_run
//! use zerodeploy::util::logging;
//! use tracing::{debug, info};
//!
//! logging::init_from_env();
//!
//! info!("Application started");
//! debug!(path = "api/users.js", "Classifying file");
//! ```

use std::env;
use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

pub const LOG_LEVEL_ENV: &str = "ZERODEPLOY_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "ZERODEPLOY_LOG_JSON";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for the `zerodeploy` target
    pub level: Level,

    /// Emit one JSON object per event instead of formatted lines
    pub use_json: bool,

    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with source locations, for log collectors.
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
        }
    }
}

/// Parses a log level, falling back to WARN on anything unknown.
///
/// ```
/// use zerodeploy::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("invalid"), Level::WARN);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to WARN. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::WARN
        }
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = format!("zerodeploy={}", config.level).parse() {
            filter = filter.add_directive(directive);
        }

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Reads `ZERODEPLOY_LOG_LEVEL` and `ZERODEPLOY_LOG_JSON`; `RUST_LOG`
/// directives are honored on top.
pub fn init_from_env() {
    init_logging(config_from_env());
}

pub fn config_from_env() -> LoggingConfig {
    let level = env::var(LOG_LEVEL_ENV)
        .map(|v| parse_level(&v))
        .unwrap_or(Level::WARN);

    let use_json = env::var(LOG_JSON_ENV)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    LoggingConfig {
        level,
        use_json,
        ..Default::default()
    }
}

pub fn with_level(level_str: &str) {
    init_logging(LoggingConfig::with_level(parse_level(level_str)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), Level::WARN);
        assert_eq!(parse_level(""), Level::WARN);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }

    #[test]
    fn test_production_config() {
        let config = LoggingConfig::production();
        assert_eq!(config.level, Level::INFO);
        assert!(config.use_json);
        assert!(config.include_location);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        env::set_var(LOG_LEVEL_ENV, "debug");
        env::set_var(LOG_JSON_ENV, "true");
        let config = config_from_env();
        env::remove_var(LOG_LEVEL_ENV);
        env::remove_var(LOG_JSON_ENV);

        assert_eq!(config.level, Level::DEBUG);
        assert!(config.use_json);
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        env::remove_var(LOG_LEVEL_ENV);
        env::set_var(LOG_JSON_ENV, "not-a-bool");
        let config = config_from_env();
        env::remove_var(LOG_JSON_ENV);

        assert_eq!(config.level, Level::WARN);
        assert!(!config.use_json);
    }
}
