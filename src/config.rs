//! Configuration management for zerodeploy
//!
//! Settings are loaded from environment variables with defaults; command-line
//! flags override them.
//!
//! # Environment Variables
//!
//! - `ZERODEPLOY_TAG`: release tag appended to every builder, e.g. `canary` - default: none
//! - `ZERODEPLOY_LOG_LEVEL`: logging level - default: "warn"
//! - `ZERODEPLOY_LOG_JSON`: JSON log output (true|false) - default: "false"
//! - `ZERODEPLOY_MAX_FILES`: scanner file cap - default: "10000"
//!
//! # Example
//!
//! ```no_run
//! use zerodeploy::ZeroDeployConfig;
//!
//! let config = ZeroDeployConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use crate::detection::DetectorOptions;
use crate::fs::scanner::DEFAULT_MAX_FILES;
use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "warn";
const MAX_FILES_LIMIT: usize = 1_000_000;

pub const TAG_ENV: &str = "ZERODEPLOY_TAG";
pub const LOG_LEVEL_ENV: &str = "ZERODEPLOY_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "ZERODEPLOY_LOG_JSON";
pub const MAX_FILES_ENV: &str = "ZERODEPLOY_MAX_FILES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZeroDeployConfig {
    /// Release tag for synthesized builders
    pub tag: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub log_json: bool,

    /// Upper bound on files collected by the scanner
    pub max_files: usize,
}

impl Default for ZeroDeployConfig {
    /// Loads `ZERODEPLOY_*` variables, falling back to defaults.
    fn default() -> Self {
        let tag = env::var(TAG_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let log_level = env::var(LOG_LEVEL_ENV)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let max_files = env::var(MAX_FILES_ENV)
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_FILES);

        Self {
            tag,
            log_level,
            log_json,
            max_files,
        }
    }
}

impl ZeroDeployConfig {
    /// Like `default()`, but reports unparsable numeric values instead of
    /// silently falling back.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = env::var(MAX_FILES_ENV) {
            config.max_files = raw.parse::<usize>().map_err(|e| ConfigError::ParseError {
                field: MAX_FILES_ENV.to_string(),
                error: e.to_string(),
            })?;
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_files == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max files must be at least 1".to_string(),
            ));
        }
        if self.max_files > MAX_FILES_LIMIT {
            return Err(ConfigError::ValidationFailed(format!(
                "Max files cannot exceed {}",
                MAX_FILES_LIMIT
            )));
        }

        if let Some(tag) = &self.tag {
            if tag.contains(char::is_whitespace) || tag.contains('@') {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid tag: {:?}. Tags may not contain whitespace or '@'",
                    tag
                )));
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn detector_options(&self) -> DetectorOptions {
        match &self.tag {
            Some(tag) => DetectorOptions::with_tag(tag.clone()),
            None => DetectorOptions::default(),
        }
    }
}

impl fmt::Display for ZeroDeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ZeroDeploy Configuration:")?;
        writeln!(f, "  Tag: {}", self.tag.as_deref().unwrap_or("(none)"))?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        writeln!(f, "  Max Files: {}", self.max_files)?;
        Ok(())
    }
}
