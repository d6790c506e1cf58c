//! Configuration types for ng-forever.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scanner configuration.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Per-rule toggles, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleToggle>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |t| t.enabled.unwrap_or(true))
    }
}

/// Scanner-level configuration.
///
/// Every recognized option is enumerated here with its type and default;
/// unknown keys in the TOML are rejected at parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScannerConfig {
    /// Root directory to scan (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Skip lines inside comments instead of flagging them.
    #[serde(default)]
    pub skip_commented: bool,

    /// Print fix suggestions for rules that found issues.
    #[serde(default = "default_true")]
    pub show_fix_suggestions: bool,

    /// Write an HTML report into the scanned directory.
    #[serde(default)]
    pub export_report: bool,

    /// Glob patterns to exclude from the walk, in addition to the fixed
    /// exclusion set.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Framework version override. When absent, the version is detected
    /// from the project manifest.
    #[serde(default)]
    pub framework_version: Option<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            skip_commented: false,
            show_fix_suggestions: true,
            export_report: false,
            exclude: Vec::new(),
            framework_version: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Per-rule toggle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleToggle {
    /// Whether this rule is enabled (default: true).
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
