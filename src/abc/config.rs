//! ABC configuration.
//!
//! [`AbcConfig`] holds the colony size, abandonment limit, budget, and the
//! elite-opposition parameters used by the EOBL variant.

use crate::error::AssignError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which ABC loop to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AbcVariant {
    /// Employed → onlooker → scout for a fixed number of iterations.
    #[default]
    Standard,

    /// Elite-opposition-based learning: each iteration either runs an
    /// elite-opposition regeneration or the standard phases, until a
    /// function-evaluation budget of `iterations × population_size` is spent.
    EliteOpposition,
}

/// Configuration for the Artificial Bee Colony optimizer.
///
/// # Defaults
///
/// ```
/// use u_assign::abc::AbcConfig;
///
/// let config = AbcConfig::default();
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.employed_count(), 15);
/// assert_eq!(config.onlooker_count(), 15);
/// assert_eq!(config.limit, 9);
/// assert_eq!(config.iterations, 15);
/// assert_eq!(config.max_evaluations(), 450);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbcConfig {
    /// Number of food sources (colony size).
    pub population_size: usize,

    /// Iteration budget for the standard variant; the EOBL variant derives
    /// its evaluation budget from it.
    pub iterations: usize,

    /// Failed improvement attempts after which an employed bee's source is
    /// abandoned. Scouting triggers when a counter strictly exceeds it.
    pub limit: usize,

    pub variant: AbcVariant,

    /// Probability `Pe` of running the elite-opposition phase in an EOBL
    /// iteration.
    pub opposition_probability: f64,

    /// Elite influence coefficient `d` in
    /// `floor((1 - d) * opposite + d * elite)`.
    pub elite_coefficient: f64,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AbcConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            iterations: 15,
            limit: 9,
            variant: AbcVariant::Standard,
            opposition_probability: 0.5,
            elite_coefficient: 0.9,
            seed: None,
        }
    }
}

impl AbcConfig {
    /// Default configuration for the EOBL variant.
    pub fn elite_opposition() -> Self {
        Self::default().with_variant(AbcVariant::EliteOpposition)
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_variant(mut self, variant: AbcVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_opposition_probability(mut self, p: f64) -> Self {
        self.opposition_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_elite_coefficient(mut self, d: f64) -> Self {
        self.elite_coefficient = d.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Employed bees: the first half of the colony.
    pub fn employed_count(&self) -> usize {
        self.population_size / 2
    }

    /// Onlooker bees: the rest of the colony.
    pub fn onlooker_count(&self) -> usize {
        self.population_size - self.employed_count()
    }

    /// Elite pool size for the opposition phase: 10% of the colony, at
    /// least 2.
    pub fn elite_count(&self) -> usize {
        (self.population_size / 10).max(2)
    }

    /// Function-evaluation budget of the EOBL variant.
    pub fn max_evaluations(&self) -> usize {
        self.iterations * self.population_size
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AssignError> {
        if self.population_size < 4 {
            return Err(AssignError::InvalidConfig(
                "population_size must be at least 4 (two employed bees)".into(),
            ));
        }
        if self.iterations == 0 {
            return Err(AssignError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.opposition_probability) {
            return Err(AssignError::InvalidConfig(
                "opposition_probability must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.elite_coefficient) {
            return Err(AssignError::InvalidConfig(
                "elite_coefficient must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AbcConfig::default();
        assert_eq!(config.population_size, 30);
        assert_eq!(config.iterations, 15);
        assert_eq!(config.limit, 9);
        assert_eq!(config.variant, AbcVariant::Standard);
        assert!((config.opposition_probability - 0.5).abs() < 1e-12);
        assert!((config.elite_coefficient - 0.9).abs() < 1e-12);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_counts() {
        let config = AbcConfig::default().with_population_size(31);
        assert_eq!(config.employed_count(), 15);
        assert_eq!(config.onlooker_count(), 16);
        assert_eq!(config.elite_count(), 3);

        let small = AbcConfig::default().with_population_size(8);
        assert_eq!(small.elite_count(), 2);
    }

    #[test]
    fn test_eobl_preset() {
        let config = AbcConfig::elite_opposition().with_seed(9);
        assert_eq!(config.variant, AbcVariant::EliteOpposition);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_evaluations(), 450);
    }

    #[test]
    fn test_clamp_rates() {
        let config = AbcConfig::default()
            .with_opposition_probability(1.7)
            .with_elite_coefficient(-0.2);
        assert!((config.opposition_probability - 1.0).abs() < 1e-12);
        assert!(config.elite_coefficient.abs() < 1e-12);
    }

    #[test]
    fn test_validate_small_population() {
        let config = AbcConfig::default().with_population_size(3);
        assert!(matches!(
            config.validate(),
            Err(AssignError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_zero_iterations() {
        assert!(AbcConfig::default().with_iterations(0).validate().is_err());
    }
}
