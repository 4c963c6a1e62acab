//! Environment variable validation and configuration module for routedoc
//!
//! This module provides centralized validation and configuration management
//! for all environment variables read by the `routedoc` command line.
//!
//! # Supported Environment Variables
//!
//! ## Logging Configuration
//! - `RUST_LOG`: Standard Rust logging configuration
//! - `ROUTEDOC_LOG_LEVEL`: Application-specific log level override
//!
//! ## Route Table Configuration
//! - `ROUTEDOC_CACHE_ENABLED`: Reuse the route table between lookups (default: "true")
//! - `ROUTEDOC_RESPONDER_MODULE`: Module whose responders are framework defaults
//!   (default: "routedoc::responders")
//!
//! ## Output Configuration
//! - `ROUTEDOC_OPENAPI_VERSION`: OpenAPI version written into documents (default: "3.0.2")
//! - `ROUTEDOC_OUTPUT_FORMAT`: `yaml` or `json` (default: "yaml")
//!
//! # Usage
//!
//! ```rust
//! use routedoc::env::validate_environment;
//!
//! match validate_environment() {
//!     Ok(config) => println!("Writing OpenAPI {}", config.openapi_version),
//!     Err(errors) => {
//!         for error in errors {
//!             eprintln!("{}: {}", error.variable, error.message);
//!         }
//!     }
//! }
//! ```

use crate::routing::responders::DEFAULT_RESPONDER_MODULE;
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

pub const DEFAULT_LOG_LEVEL: &str = "routedoc=info";
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.2";

/// Environment validation errors
#[derive(Debug, Clone, PartialEq)]
pub struct EnvValidationError {
    pub variable: String,
    pub message: String,
    pub severity: ErrorSeverity,
}

/// Severity level for environment validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    /// Critical errors that prevent application startup
    Critical,
    /// Warnings about invalid values replaced by defaults
    Warning,
    /// Informational messages about default values being used
    Info,
}

/// Serialization used when writing a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Validated application configuration derived from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // Logging
    pub log_level: String,

    // Route table
    pub cache_enabled: bool,
    pub responder_module: String,

    // Output
    pub openapi_version: String,
    pub output_format: OutputFormat,

    /// Non-critical findings, logged once tracing is installed
    pub notices: Vec<EnvValidationError>,
}

impl AppConfig {
    /// Log the non-critical validation findings
    pub fn log_notices(&self) {
        for notice in &self.notices {
            match notice.severity {
                ErrorSeverity::Warning => warn!("{}: {}", notice.variable, notice.message),
                ErrorSeverity::Info => info!("{}: {}", notice.variable, notice.message),
                ErrorSeverity::Critical => {}
            }
        }
    }
}

/// Validate all environment variables and return configuration or errors
pub fn validate_environment() -> Result<AppConfig, Vec<EnvValidationError>> {
    validate_with(|name| env::var(name).ok())
}

/// Validate configuration read through `lookup` instead of the process environment
pub fn validate_with<F>(lookup: F) -> Result<AppConfig, Vec<EnvValidationError>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Logging configuration
    let log_level = lookup("ROUTEDOC_LOG_LEVEL")
        .or_else(|| lookup("RUST_LOG"))
        .unwrap_or_else(|| {
            warnings.push(EnvValidationError {
                variable: "RUST_LOG/ROUTEDOC_LOG_LEVEL".to_string(),
                message: format!("Using default log level '{}'", DEFAULT_LOG_LEVEL),
                severity: ErrorSeverity::Info,
            });
            DEFAULT_LOG_LEVEL.to_string()
        });

    // Route table configuration
    let cache_enabled =
        parse_bool_var_with_default(&lookup, "ROUTEDOC_CACHE_ENABLED", true, &mut warnings);

    let responder_module = lookup("ROUTEDOC_RESPONDER_MODULE").unwrap_or_else(|| {
        warnings.push(EnvValidationError {
            variable: "ROUTEDOC_RESPONDER_MODULE".to_string(),
            message: format!("Using default responder module '{}'", DEFAULT_RESPONDER_MODULE),
            severity: ErrorSeverity::Info,
        });
        DEFAULT_RESPONDER_MODULE.to_string()
    });

    if responder_module.trim().is_empty() {
        errors.push(EnvValidationError {
            variable: "ROUTEDOC_RESPONDER_MODULE".to_string(),
            message: "Responder module must not be empty".to_string(),
            severity: ErrorSeverity::Critical,
        });
    }

    // Output configuration
    let openapi_version = lookup("ROUTEDOC_OPENAPI_VERSION").unwrap_or_else(|| {
        warnings.push(EnvValidationError {
            variable: "ROUTEDOC_OPENAPI_VERSION".to_string(),
            message: format!("Using default OpenAPI version '{}'", DEFAULT_OPENAPI_VERSION),
            severity: ErrorSeverity::Info,
        });
        DEFAULT_OPENAPI_VERSION.to_string()
    });

    if !openapi_version.starts_with("3.") {
        errors.push(EnvValidationError {
            variable: "ROUTEDOC_OPENAPI_VERSION".to_string(),
            message: format!(
                "Unsupported OpenAPI version: {}. Only version 3.x is supported.",
                openapi_version
            ),
            severity: ErrorSeverity::Critical,
        });
    }

    let output_format = parse_var_with_default(
        &lookup,
        "ROUTEDOC_OUTPUT_FORMAT",
        OutputFormat::Yaml,
        &mut warnings,
    );

    if !errors.is_empty() {
        errors.extend(warnings);
        return Err(errors);
    }

    Ok(AppConfig {
        log_level,
        cache_enabled,
        responder_module,
        openapi_version,
        output_format,
        notices: warnings,
    })
}

/// Print environment validation failures in a user-friendly format
pub fn print_validation_errors(errors: &[EnvValidationError]) {
    let critical_count = errors
        .iter()
        .filter(|e| e.severity == ErrorSeverity::Critical)
        .count();
    eprintln!(
        "Environment validation failed with {} critical error(s):",
        critical_count
    );

    for error in errors {
        let prefix = match error.severity {
            ErrorSeverity::Critical => "CRITICAL",
            ErrorSeverity::Warning => "WARNING",
            ErrorSeverity::Info => "INFO",
        };
        eprintln!("  {} - {}: {}", prefix, error.variable, error.message);
    }
}

/// Helper function to parse a variable with default value
fn parse_var_with_default<T, F>(
    lookup: &F,
    var_name: &str,
    default: T,
    warnings: &mut Vec<EnvValidationError>,
) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + fmt::Display,
    T::Err: fmt::Display,
{
    match lookup(var_name) {
        Some(value_str) => match value_str.parse::<T>() {
            Ok(value) => value,
            Err(e) => {
                warnings.push(EnvValidationError {
                    variable: var_name.to_string(),
                    message: format!(
                        "Invalid value '{}': {}. Using default: {}",
                        value_str, e, default
                    ),
                    severity: ErrorSeverity::Warning,
                });
                default
            }
        },
        None => {
            warnings.push(EnvValidationError {
                variable: var_name.to_string(),
                message: format!("Using default value: {}", default),
                severity: ErrorSeverity::Info,
            });
            default
        }
    }
}

/// Helper function to parse a boolean variable with default value
fn parse_bool_var_with_default<F>(
    lookup: &F,
    var_name: &str,
    default: bool,
    warnings: &mut Vec<EnvValidationError>,
) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        Some(value_str) => match value_str.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => {
                warnings.push(EnvValidationError {
                    variable: var_name.to_string(),
                    message: format!(
                        "Invalid boolean value '{}'. Using default: {}",
                        value_str, default
                    ),
                    severity: ErrorSeverity::Warning,
                });
                default
            }
        },
        None => {
            warnings.push(EnvValidationError {
                variable: var_name.to_string(),
                message: format!("Using default value: {}", default),
                severity: ErrorSeverity::Info,
            });
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_configuration() {
        let config = validate_with(lookup_from(&[])).unwrap();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.cache_enabled);
        assert_eq!(config.responder_module, DEFAULT_RESPONDER_MODULE);
        assert_eq!(config.openapi_version, "3.0.2");
        assert_eq!(config.output_format, OutputFormat::Yaml);
    }

    #[test]
    fn test_custom_configuration() {
        let config = validate_with(lookup_from(&[
            ("ROUTEDOC_LOG_LEVEL", "routedoc=debug"),
            ("RUST_LOG", "warn"),
            ("ROUTEDOC_CACHE_ENABLED", "off"),
            ("ROUTEDOC_RESPONDER_MODULE", "webfw.responders"),
            ("ROUTEDOC_OPENAPI_VERSION", "3.1.0"),
            ("ROUTEDOC_OUTPUT_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "routedoc=debug");
        assert!(!config.cache_enabled);
        assert_eq!(config.responder_module, "webfw.responders");
        assert_eq!(config.openapi_version, "3.1.0");
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_rust_log_is_fallback() {
        let config = validate_with(lookup_from(&[("RUST_LOG", "trace")])).unwrap();
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_invalid_openapi_version() {
        let errors = validate_with(lookup_from(&[("ROUTEDOC_OPENAPI_VERSION", "2.0")])).unwrap_err();
        assert!(errors.iter().any(|e| e.variable == "ROUTEDOC_OPENAPI_VERSION"
            && e.severity == ErrorSeverity::Critical));
    }

    #[test]
    fn test_empty_responder_module() {
        let errors = validate_with(lookup_from(&[("ROUTEDOC_RESPONDER_MODULE", " ")])).unwrap_err();
        assert!(errors.iter().any(|e| e.variable == "ROUTEDOC_RESPONDER_MODULE"
            && e.severity == ErrorSeverity::Critical));
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let config = validate_with(lookup_from(&[
            ("ROUTEDOC_CACHE_ENABLED", "maybe"),
            ("ROUTEDOC_OUTPUT_FORMAT", "toml"),
        ]))
        .unwrap();
        assert!(config.cache_enabled);
        assert_eq!(config.output_format, OutputFormat::Yaml);
        assert!(config.notices.iter().any(|n| n.variable == "ROUTEDOC_CACHE_ENABLED"
            && n.severity == ErrorSeverity::Warning));
        assert!(config.notices.iter().any(|n| n.variable == "ROUTEDOC_OUTPUT_FORMAT"
            && n.severity == ErrorSeverity::Warning));
    }

    #[test]
    fn test_defaults_are_reported_as_info_notices() {
        let config = validate_with(lookup_from(&[("ROUTEDOC_LOG_LEVEL", "debug")])).unwrap();
        assert!(config.notices.iter().all(|n| n.severity == ErrorSeverity::Info));
        assert!(config.notices.iter().all(|n| n.variable != "RUST_LOG/ROUTEDOC_LOG_LEVEL"));
        assert!(config.notices.iter().any(|n| n.variable == "ROUTEDOC_OPENAPI_VERSION"));
    }
}
