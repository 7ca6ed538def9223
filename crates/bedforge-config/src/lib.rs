//! Configuration system for BedForge.
//!
//! Load solver configuration from TOML or YAML to control penalty weights,
//! construction retries, tabu parameters and termination without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use bedforge_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [penalty_weights]
//!     transfer = 250
//!
//!     [tabu]
//!     tenure = 15
//!
//!     [termination]
//!     iteration_limit = 5000
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.penalty_weights.transfer, 250);
//! assert_eq!(config.penalty_weights.gender, 50);
//! assert_eq!(config.tabu.tenure, 15);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use bedforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("bedforge.toml").unwrap_or_default();
//! assert_eq!(config.construction.retry_budget, 10_000);
//! ```

use std::path::Path;
use std::time::Duration;

use bedforge_core::PenaltyWeights;
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

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Runtime assertion level.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results. `None` draws from OS entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of independent restarts run by `solve_parallel`.
    #[serde(default = "default_parallel_runs")]
    pub parallel_runs: usize,

    /// Soft-constraint penalty weights.
    #[serde(default)]
    pub penalty_weights: PenaltyWeights,

    /// Constructive builder configuration.
    #[serde(default)]
    pub construction: ConstructionConfig,

    /// Tabu search configuration.
    #[serde(default)]
    pub tabu: TabuConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: TerminationConfig,
}

fn default_parallel_runs() -> usize {
    1
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            parallel_runs: default_parallel_runs(),
            penalty_weights: PenaltyWeights::default(),
            construction: ConstructionConfig::default(),
            tabu: TabuConfig::default(),
            termination: TerminationConfig::default(),
        }
    }
}

impl SolverConfig {
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
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Checks that every budget and size is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("construction.retry_budget", self.construction.retry_budget),
            ("tabu.tenure", self.tabu.tenure as u64),
            ("tabu.move_sample_size", self.tabu.move_sample_size as u64),
            ("parallel_runs", self.parallel_runs as u64),
        ];
        match checks.iter().find(|(_, value)| *value == 0) {
            Some((key, _)) => Err(ConfigError::Invalid(format!("{key} must be positive"))),
            None => Ok(()),
        }
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination.seconds_spent_limit = Some(seconds);
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination.millis_spent_limit = Some(millis);
        self
    }

    /// Sets the search iteration cap.
    pub fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.termination.iteration_limit = limit;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn with_penalty_weights(mut self, weights: PenaltyWeights) -> Self {
        self.penalty_weights = weights;
        self
    }

    /// Sets the number of whole construction attempts.
    pub fn with_retry_budget(mut self, budget: u64) -> Self {
        self.construction.retry_budget = budget;
        self
    }

    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu.tenure = tenure;
        self
    }

    pub fn with_move_sample_size(mut self, size: usize) -> Self {
        self.tabu.move_sample_size = size;
        self
    }

    pub fn with_parallel_runs(mut self, runs: usize) -> Self {
        self.parallel_runs = runs;
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.time_limit()
    }
}

/// How much self-checking the solver does while it runs.
///
/// Reproducibility is governed by `random_seed` alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// No runtime checks.
    #[default]
    NoAssert,

    /// Checks every constructed schedule against the capacity calendar.
    FastAssert,

    /// Full assert mode: recomputes cost and checks the calendar after
    /// every step.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_full_assert(self) -> bool {
        self == EnvironmentMode::FullAssert
    }

    pub fn is_asserted(self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }
}

/// Constructive builder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ConstructionConfig {
    /// Whole attempts before giving up.
    pub retry_budget: u64,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            retry_budget: 10_000,
        }
    }
}

/// Tabu search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TabuConfig {
    /// Iterations an attribute stays tabu.
    pub tenure: usize,

    /// Admissible candidates sampled per step.
    pub move_sample_size: usize,

    /// Whether a tabu move that beats the best cost is admitted.
    pub aspiration_enabled: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tenure: 10,
            move_sample_size: 256,
            aspiration_enabled: true,
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of search iterations.
    pub iteration_limit: u64,

    /// Maximum seconds to spend searching.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend searching.
    pub millis_spent_limit: Option<u64>,

    /// Maximum iterations without improving the best cost.
    pub unimproved_iteration_limit: Option<u64>,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            iteration_limit: 1000,
            seconds_spent_limit: None,
            millis_spent_limit: None,
            unimproved_iteration_limit: None,
        }
    }
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    ///
    /// Seconds and milliseconds add up when both are set.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
