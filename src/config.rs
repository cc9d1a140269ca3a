//! Optimizer configuration.
//!
//! Defaults cover everything; a host process can override them through
//! environment variables or by deserializing its own config file section.

use serde::Deserialize;
use thiserror::Error;

use crate::local_search::{TwoOptParams, DEFAULT_EPSILON};
use crate::request::Algorithm;

/// Environment variable overriding [`OptimizerConfig::default_average_speed_kmh`].
pub const ENV_AVERAGE_SPEED: &str = "ROUTE_OPT_AVERAGE_SPEED_KMH";
/// Environment variable overriding [`OptimizerConfig::default_algorithm`].
pub const ENV_ALGORITHM: &str = "ROUTE_OPT_ALGORITHM";
/// Environment variable overriding [`OptimizerConfig::max_two_opt_passes`].
pub const ENV_MAX_PASSES: &str = "ROUTE_OPT_MAX_PASSES";

/// A configuration value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The variable was set but could not be parsed or was out of range.
    #[error("{key} has invalid value {value:?}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// What was expected.
        reason: &'static str,
    },
}

/// Tunables and request defaults for [`RouteOptimizer`](crate::RouteOptimizer).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptimizerConfig {
    /// Speed used when a request does not give one.
    pub default_average_speed_kmh: f64,
    /// Algorithm used when a request does not name one.
    pub default_algorithm: Algorithm,
    /// Upper bound on 2-opt reversals per request.
    pub max_two_opt_passes: usize,
    /// Minimum gain, in kilometers, for a 2-opt reversal to count.
    pub improvement_epsilon: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            default_average_speed_kmh: 30.0,
            default_algorithm: Algorithm::TwoOpt,
            max_two_opt_passes: 10_000,
            improvement_epsilon: DEFAULT_EPSILON,
        }
    }
}

impl OptimizerConfig {
    /// Loads the defaults, then applies any environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_opt::config::{OptimizerConfig, ENV_AVERAGE_SPEED};
    ///
    /// let config = OptimizerConfig::from_lookup(|key| {
    ///     (key == ENV_AVERAGE_SPEED).then(|| "42".to_string())
    /// })
    /// .unwrap();
    /// assert_eq!(config.default_average_speed_kmh, 42.0);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_AVERAGE_SPEED) {
            let speed = raw.trim().parse::<f64>().ok().filter(|s| s.is_finite() && *s > 0.0);
            config.default_average_speed_kmh = speed.ok_or(ConfigError::InvalidValue {
                key: ENV_AVERAGE_SPEED,
                value: raw.clone(),
                reason: "expected a positive number",
            })?;
        }

        if let Some(raw) = lookup(ENV_ALGORITHM) {
            config.default_algorithm =
                raw.trim().parse::<Algorithm>().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_ALGORITHM,
                    value: raw.clone(),
                    reason: "expected \"2opt\" or \"nearest-neighbor\"",
                })?;
        }

        if let Some(raw) = lookup(ENV_MAX_PASSES) {
            config.max_two_opt_passes =
                raw.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                    key: ENV_MAX_PASSES,
                    value: raw.clone(),
                    reason: "expected a non-negative integer",
                })?;
        }

        tracing::debug!(?config, "optimizer configuration loaded");
        Ok(config)
    }

    /// 2-opt limits derived from this configuration.
    pub fn two_opt_params(&self) -> TwoOptParams {
        TwoOptParams {
            max_passes: self.max_two_opt_passes,
            epsilon: self.improvement_epsilon,
        }
    }
}
