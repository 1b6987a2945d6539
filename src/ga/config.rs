//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::Selection;
use crate::error::AssignError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_assign::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 30);
/// assert_eq!(config.max_generations, 15);
/// assert_eq!(config.selection, Selection::Tournament(3));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_assign::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_selection(Selection::Rank)
///     .with_mutation_rate(0.05)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of chromosomes in the population.
    pub population_size: usize,

    /// Number of generations to run. There is no early termination.
    pub max_generations: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Number of best chromosomes copied unchanged into the next generation.
    pub elite_count: usize,

    /// Probability of applying single-point crossover to a pair of parents.
    ///
    /// When crossover is not applied, both parents are copied verbatim.
    pub crossover_rate: f64,

    /// Per-gene probability of replacing a gene with a random resource index.
    pub mutation_rate: f64,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            max_generations: 15,
            selection: Selection::default(),
            elite_count: 1,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AssignError> {
        if self.population_size < 2 {
            return Err(AssignError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(AssignError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.elite_count >= self.population_size {
            return Err(AssignError::InvalidConfig(
                "elite_count too high: elites fill entire population".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) || !(0.0..=1.0).contains(&self.mutation_rate)
        {
            return Err(AssignError::InvalidConfig(
                "crossover_rate and mutation_rate must be within [0, 1]".into(),
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
        let config = GaConfig::default();
        assert_eq!(config.population_size, 30);
        assert_eq!(config.max_generations, 15);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert_eq!(config.elite_count, 1);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(40)
            .with_tournament_size(5)
            .with_elite_count(2)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_seed(42);

        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 40);
        assert_eq!(config.selection, Selection::Tournament(5));
        assert_eq!(config.elite_count, 2);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elite_too_high() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_count(10);
        assert!(matches!(
            config.validate(),
            Err(AssignError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0);

        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
    }
}
