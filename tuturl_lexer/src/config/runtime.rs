//! Runtime preferences for file reading, tokenizing and logging
//!
//! Every field defaults from a `TUTURL_*` environment variable and can be
//! overridden from a TOML file passed with `--config`.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Names recognised as functions when nothing else is configured
pub const DEFAULT_KNOWN_FUNCTIONS: &[&str] = &["print"];

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Reject files that do not end in .tuturl
    pub require_tuturl_extension: bool,

    /// Echo every source line at debug level while reading
    pub log_source_lines: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_tuturl_extension: env_flag(env_vars::REQUIRE_TUTURL_EXTENSION, false),
            log_source_lines: env_flag(env_vars::LOG_SOURCE_LINES, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Identifiers promoted to Function tokens
    pub known_functions: Vec<String>,

    /// Log one debug line per token after a successful run
    pub log_token_listing: bool,

    /// Collect per-type token counts
    pub collect_detailed_metrics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            known_functions: env::var(env_vars::LEXICAL_KNOWN_FUNCTIONS)
                .ok()
                .map(|v| parse_name_list(&v))
                .unwrap_or_else(|| {
                    DEFAULT_KNOWN_FUNCTIONS
                        .iter()
                        .map(|name| name.to_string())
                        .collect()
                }),
            log_token_listing: env_flag(env_vars::LEXICAL_LOG_TOKENS, true),
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
        }
    }
}

/// Split a comma-separated list, dropping blanks
pub fn parse_name_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// JSON lines instead of human-readable output
    pub use_structured_logging: bool,

    pub enable_console_logging: bool,

    /// Diagnostics are always errors, so the default level shows only them
    pub min_log_level: LogLevel,

    /// Print the per-file summary after a failed run
    pub enable_cargo_style_output: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or_else(|| {
                    if env_flag(env_vars::DEBUG, false) {
                        LogLevel::Debug
                    } else {
                        LogLevel::Error
                    }
                }),
            enable_cargo_style_output: env_flag(env_vars::LOGGING_CARGO_STYLE, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse a log level from an environment value
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        crate::logging::codes::system::CONFIGURATION_ERROR
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; omitted sections and fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // Only identifier-shaped names can ever be scanned as one token
        if let Some(bad) = self
            .lexical
            .known_functions
            .iter()
            .find(|name| name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(ConfigError::InvalidValue {
                field: "lexical.known_functions",
                reason: format!("'{}' is not made of ASCII letters", bad),
            });
        }
        Ok(())
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_TUTURL_EXTENSION: &str = "TUTURL_REQUIRE_EXTENSION";
    pub const LOG_SOURCE_LINES: &str = "TUTURL_LOG_SOURCE_LINES";

    // Lexical
    pub const LEXICAL_KNOWN_FUNCTIONS: &str = "TUTURL_LEXICAL_KNOWN_FUNCTIONS";
    pub const LEXICAL_LOG_TOKENS: &str = "TUTURL_LEXICAL_LOG_TOKENS";
    pub const LEXICAL_DETAILED_METRICS: &str = "TUTURL_LEXICAL_DETAILED_METRICS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "TUTURL_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "TUTURL_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "TUTURL_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "TUTURL_LOGGING_CARGO_STYLE";

    /// `DEBUG=true` turns on trace output when no explicit level is set
    pub const DEBUG: &str = "DEBUG";
}
