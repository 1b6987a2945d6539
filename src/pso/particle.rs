//! Particle state for the discrete swarm.

use super::config::PsoConfig;
use crate::model::FitnessModel;
use crate::population::{clamp_position, UNEVALUATED};
use crate::random::random_assignment;
use rand::Rng;

/// One particle: an integer position (the assignment), a real velocity per
/// task, and its personal best.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec<usize>,
    pub velocity: Vec<f64>,
    pub fitness: f64,
    pub best_position: Vec<usize>,
    pub best_fitness: f64,
}

impl Particle {
    /// Random position; velocities uniform in `±max_velocity`. Unevaluated.
    pub fn random<R: Rng>(
        task_count: usize,
        resource_count: usize,
        max_velocity: f64,
        rng: &mut R,
    ) -> Self {
        let position = random_assignment(task_count, resource_count, rng);
        let velocity = (0..task_count)
            .map(|_| (rng.random::<f64>() * 2.0 - 1.0) * max_velocity)
            .collect();
        Self {
            best_position: position.clone(),
            position,
            velocity,
            fitness: UNEVALUATED,
            best_fitness: UNEVALUATED,
        }
    }

    /// Scores the current position and refreshes the personal best when it
    /// strictly improves. Returns the new fitness.
    pub fn evaluate(&mut self, model: &mut FitnessModel) -> f64 {
        self.fitness = model.evaluate(&self.position);
        if self.fitness > self.best_fitness {
            self.best_fitness = self.fitness;
            self.best_position.clone_from(&self.position);
        }
        self.fitness
    }

    /// Velocity and position update toward the personal best and `global`.
    ///
    /// ```text
    /// v[j] = w·v[j] + l1·r1·(pbest[j] − x[j]) + l2·r2·(gbest[j] − x[j])
    /// v[j] = clamp(v[j], −vmax, vmax)
    /// x[j] = clamp(round(x[j] + v[j]), 0, max_index)
    /// ```
    pub fn step<R: Rng>(
        &mut self,
        global: &[usize],
        config: &PsoConfig,
        max_velocity: f64,
        max_index: usize,
        rng: &mut R,
    ) {
        for j in 0..self.position.len() {
            let x = self.position[j] as f64;
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();

            let v = config.inertia * self.velocity[j]
                + config.cognitive * r1 * (self.best_position[j] as f64 - x)
                + config.social * r2 * (global[j] as f64 - x);
            let v = v.clamp(-max_velocity, max_velocity);

            self.velocity[j] = v;
            self.position[j] = clamp_position(x + v, max_index);
        }
        self.fitness = UNEVALUATED;
    }
}
