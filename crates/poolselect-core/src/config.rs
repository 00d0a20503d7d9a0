//! Configuration for pool selection.
//!
//! ```toml
//! [labels]
//! anti_affinity = "openebs.io/replica-anti-affinity"
//! pool_uid = "cstorpool.openebs.io/uid"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [[rules]]
//! function = "cspPreferAntiAffinity"
//! label = "vol-1"
//! ```

use serde::{Deserialize, Serialize};

use crate::types::LabelKeys;

/// Main configuration for pool selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Label keys used to read placement records.
    pub labels: LabelKeys,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Declarative policy rules, applied in order.
    pub rules: Vec<RuleSpec>,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(crate::Error::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed.
    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

/// A declarative policy rule: a registered template function applied to a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Name of the template function, e.g. `cspAntiAffinity`.
    pub function: String,
    /// Affinity label the function is invoked with.
    pub label: String,
}

impl RuleSpec {
    /// Creates a rule.
    #[must_use]
    pub fn new(function: impl Into<String>, label: impl Into<String>) -> Self {
        Self { function: function.into(), label: label.into() }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format.
    #[default]
    Pretty,
    /// JSON format.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
    /// Log output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Pretty }
    }
}
