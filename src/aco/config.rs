//! ACO configuration.
//!
//! [`AcoConfig`] holds the parameters that control one colony run.

use super::error::{AcoError, AcoResult};

/// Configuration for the ant colony.
///
/// # Defaults
///
/// ```
/// use u_antcolony::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.num_ants, 50);
/// assert!((config.evaporation_rate - 0.5).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_antcolony::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_num_ants(10)
///     .with_evaporation_rate(0.3)
///     .with_alpha(1.0)
///     .with_beta(5.0)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcoConfig {
    /// Number of ants simulated per call to [`AcoEngine::run`](super::AcoEngine::run).
    pub num_ants: usize,

    /// Fraction of pheromone lost per update cycle, in `[0, 1)`.
    ///
    /// Evaporation is applied after every ant, not once per run.
    pub evaporation_rate: f64,

    /// Exponent weighting pheromone strength. Must be `>= 0`.
    pub alpha: f64,

    /// Exponent weighting inverse distance. Must be `>= 0`.
    pub beta: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            num_ants: 50,
            evaporation_rate: 0.5,
            alpha: 1.0,
            beta: 2.0,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per run.
    pub fn with_num_ants(mut self, n: usize) -> Self {
        self.num_ants = n;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_evaporation_rate(mut self, rate: f64) -> Self {
        self.evaporation_rate = rate;
        self
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the distance exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Out-of-range values are rejected, never clamped. NaN fails every check.
    pub fn validate(&self) -> AcoResult<()> {
        if self.num_ants == 0 {
            return Err(AcoError::config("num_ants must be at least 1"));
        }
        if !(self.evaporation_rate >= 0.0 && self.evaporation_rate < 1.0) {
            return Err(AcoError::config(format!(
                "evaporation_rate must be in [0, 1), got {}",
                self.evaporation_rate
            )));
        }
        if !(self.alpha >= 0.0 && self.alpha.is_finite()) {
            return Err(AcoError::config(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        if !(self.beta >= 0.0 && self.beta.is_finite()) {
            return Err(AcoError::config(format!(
                "beta must be finite and non-negative, got {}",
                self.beta
            )));
        }
        Ok(())
    }
}
