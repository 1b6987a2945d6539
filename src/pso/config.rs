//! PSO configuration.

use crate::error::AssignError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the Particle Swarm Optimizer.
///
/// # Defaults
///
/// ```
/// use u_assign::pso::PsoConfig;
///
/// let config = PsoConfig::default();
/// assert_eq!(config.swarm_size, 30);
/// assert_eq!(config.iterations, 15);
/// assert!((config.inertia - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PsoConfig {
    /// Number of particles.
    pub swarm_size: usize,

    /// Update iterations after the initial evaluation pass.
    pub iterations: usize,

    /// Inertia weight `w` (momentum).
    pub inertia: f64,

    /// Cognitive coefficient `l1` (attraction to personal best).
    pub cognitive: f64,

    /// Social coefficient `l2` (attraction to global best).
    pub social: f64,

    /// Velocity bound as a fraction of the resource count: each component is
    /// clamped to `±velocity_factor · resource_count`. Initial velocities are
    /// drawn from the same range.
    pub velocity_factor: f64,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 30,
            iterations: 15,
            inertia: 0.5,
            cognitive: 1.5,
            social: 1.5,
            velocity_factor: 0.5,
            seed: None,
        }
    }
}

impl PsoConfig {
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = w;
        self
    }

    /// Sets the cognitive and social coefficients.
    pub fn with_coefficients(mut self, cognitive: f64, social: f64) -> Self {
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    pub fn with_velocity_factor(mut self, factor: f64) -> Self {
        self.velocity_factor = factor;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Largest absolute velocity component for `resource_count` resources.
    pub fn max_velocity(&self, resource_count: usize) -> f64 {
        self.velocity_factor * resource_count as f64
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AssignError> {
        if self.swarm_size == 0 {
            return Err(AssignError::InvalidConfig(
                "swarm_size must be at least 1".into(),
            ));
        }
        if self.iterations == 0 {
            return Err(AssignError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }
        let coefficients = [self.inertia, self.cognitive, self.social, self.velocity_factor];
        if coefficients.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(AssignError::InvalidConfig(
                "inertia, coefficients and velocity_factor must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}
