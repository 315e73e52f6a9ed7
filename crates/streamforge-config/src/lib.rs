//! Configuration system for StreamForge.
//!
//! Load scoring configuration from TOML or YAML files to control
//! corruption assertions, constraint match tracking and constraint
//! weights without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use streamforge_config::{EnvironmentMode, ScoringConfig};
//!
//! let config = ScoringConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!
//!     [score_director]
//!     constraint_match_enabled = true
//!     assertion_interval = 10
//!
//!     [score_director.constraint_weights]
//!     "Row conflict" = "-2"
//! "#).unwrap();
//!
//! assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
//! assert_eq!(config.score_director.assertion_interval, 10);
//! assert_eq!(config.constraint_weight("Row conflict"), Some("-2"));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use streamforge_config::ScoringConfig;
//!
//! let config = ScoringConfig::load("scoring.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main scoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringConfig {
    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible runs.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Score director configuration.
    #[serde(default)]
    pub score_director: ScoreDirectorConfig,
}

impl ScoringConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.score_director.assertion_interval == 0 {
            return Err(ConfigError::Invalid(
                "score_director.assertion_interval must be at least 1".to_string(),
            ));
        }
        if let Some(name) = self
            .score_director
            .constraint_weights
            .keys()
            .find(|name| name.trim().is_empty())
        {
            return Err(ConfigError::Invalid(format!(
                "constraint weight key ({:?}) is not a constraint name",
                name
            )));
        }
        Ok(())
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Enables or disables constraint match tracking.
    pub fn with_constraint_match_enabled(mut self, enabled: bool) -> Self {
        self.score_director.constraint_match_enabled = enabled;
        self
    }

    /// Sets the number of score calculations between two corruption checks.
    pub fn with_assertion_interval(mut self, interval: u64) -> Self {
        self.score_director.assertion_interval = interval;
        self
    }

    /// Overrides the weight of a constraint, given as a score string.
    pub fn with_constraint_weight(mut self, name: impl Into<String>, weight: impl Into<String>) -> Self {
        self.score_director
            .constraint_weights
            .insert(name.into(), weight.into());
        self
    }

    /// Returns the configured weight string for a constraint, if any.
    pub fn constraint_weight(&self, name: &str) -> Option<&str> {
        self.score_director
            .constraint_weights
            .get(name)
            .map(String::as_str)
    }

    /// Returns true when score directors must track constraint matches.
    ///
    /// Asserted environment modes need the matches to report corruption.
    pub fn constraint_match_required(&self) -> bool {
        self.score_director.constraint_match_enabled || self.environment_mode.is_asserted()
    }
}

/// Environment mode affecting scoring behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    #[default]
    NonReproducible,

    /// Reproducible mode with deterministic behavior.
    Reproducible,

    /// Fast assert mode: compares the incremental score with a
    /// from-scratch calculation every `assertion_interval` calculations.
    FastAssert,

    /// Full assert mode: like `FastAssert`, on every calculation.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true if score corruption checks are enabled.
    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }

    /// Returns true if runs must be repeatable with the same seed.
    pub fn is_reproducible(&self) -> bool {
        !matches!(self, EnvironmentMode::NonReproducible)
    }
}

/// Score director configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoreDirectorConfig {
    /// Whether to track constraint matches for explanation.
    #[serde(default)]
    pub constraint_match_enabled: bool,

    /// Score calculations between two corruption checks in asserted modes.
    #[serde(default = "default_assertion_interval")]
    pub assertion_interval: u64,

    /// Constraint weights by constraint name, as score strings.
    #[serde(default)]
    pub constraint_weights: HashMap<String, String>,
}

fn default_assertion_interval() -> u64 {
    1
}

impl Default for ScoreDirectorConfig {
    fn default() -> Self {
        Self {
            constraint_match_enabled: false,
            assertion_interval: default_assertion_interval(),
            constraint_weights: HashMap::new(),
        }
    }
}

impl ScoreDirectorConfig {
    /// Returns the effective interval between corruption checks.
    ///
    /// `FullAssert` checks every calculation regardless of the interval.
    pub fn effective_assertion_interval(&self, mode: EnvironmentMode) -> Option<u64> {
        match mode {
            EnvironmentMode::FullAssert => Some(1),
            EnvironmentMode::FastAssert => Some(self.assertion_interval.max(1)),
            _ => None,
        }
    }
}
