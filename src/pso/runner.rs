//! PSO execution loop.

use super::config::PsoConfig;
use super::particle::Particle;
use crate::error::AssignError;
use crate::model::FitnessModel;
use crate::population::BestTracker;
use crate::random::rng_from_seed;
use rand::Rng;
use tracing::{debug, info};

/// Result of a PSO run.
#[derive(Debug, Clone)]
pub struct PsoResult {
    /// Global best assignment.
    pub best: Vec<usize>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Update iterations executed.
    pub iterations: usize,

    /// Fitness lookups performed, cached or not.
    pub evaluations: usize,

    /// Global best fitness after the initial pass, then after each iteration.
    pub fitness_history: Vec<f64>,
}

/// Executes the Particle Swarm Optimizer.
///
/// # Usage
///
/// ```
/// use u_assign::pso::{PsoConfig, PsoRunner};
/// use u_assign::model::{FitnessModel, Task, TaskWeight};
///
/// let tasks = vec![Task::new("a", 350.0, TaskWeight::Light); 6];
/// let mut model = FitnessModel::new(tasks, vec![500.0, 1000.0]);
/// let result = PsoRunner::run(&mut model, &PsoConfig::default().with_seed(1)).unwrap();
/// assert_eq!(result.best.len(), 6);
/// ```
pub struct PsoRunner;

impl PsoRunner {
    /// Runs PSO with a generator seeded from `config.seed`.
    pub fn run(model: &mut FitnessModel, config: &PsoConfig) -> Result<PsoResult, AssignError> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(model, config, &mut rng)
    }

    /// Runs PSO with a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(
        model: &mut FitnessModel,
        config: &PsoConfig,
        rng: &mut R,
    ) -> Result<PsoResult, AssignError> {
        config.validate()?;
        let resource_count = model.resource_count();
        if resource_count == 0 {
            return Err(AssignError::NoResources);
        }
        let task_count = model.task_count();
        if task_count == 0 {
            return Ok(PsoResult {
                best: Vec::new(),
                best_fitness: crate::model::fitness::DEGENERATE_FITNESS,
                iterations: 0,
                evaluations: 0,
                fitness_history: Vec::new(),
            });
        }

        let max_velocity = config.max_velocity(resource_count);
        let max_index = resource_count - 1;

        // Initial evaluation pass
        let mut swarm: Vec<Particle> = (0..config.swarm_size)
            .map(|_| Particle::random(task_count, resource_count, max_velocity, rng))
            .collect();
        let mut best = BestTracker::new();
        for particle in swarm.iter_mut() {
            let fitness = particle.evaluate(model);
            best.offer(&particle.position, fitness);
        }
        best.record();
        let mut evaluations = swarm.len();

        for iteration in 0..config.iterations {
            let global = best.assignment_or_zeros(task_count);

            for particle in swarm.iter_mut() {
                particle.step(&global, config, max_velocity, max_index, rng);
            }
            for particle in swarm.iter_mut() {
                let fitness = particle.evaluate(model);
                best.offer(&particle.position, fitness);
            }
            evaluations += swarm.len();
            best.record();

            debug!(
                iteration = iteration + 1,
                best_fitness = best.fitness(),
                "pso iteration"
            );
        }

        info!(
            iterations = config.iterations,
            evaluations,
            best_fitness = best.fitness(),
            "pso run complete"
        );

        let (best, best_fitness, fitness_history) = best.into_parts(task_count);
        Ok(PsoResult {
            best,
            best_fitness,
            iterations: config.iterations,
            evaluations,
            fitness_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, TaskWeight};

    fn scenario_model() -> FitnessModel {
        let tasks = vec![
            Task::new("a", 1000.0, TaskWeight::Medium),
            Task::new("b", 45.0, TaskWeight::Light),
            Task::new("c", 1150.0, TaskWeight::Heavy),
        ];
        FitnessModel::new(tasks, vec![500.0, 1000.0])
    }

    fn larger_model() -> FitnessModel {
        let tasks = (0..30)
            .map(|i| Task::new(format!("t{i}"), 150.0 + 20.0 * i as f64, TaskWeight::Heavy))
            .collect();
        FitnessModel::new(tasks, vec![400.0, 1200.0, 800.0, 2500.0, 300.0])
    }

    #[test]
    fn test_scenario() {
        let mut model = scenario_model();
        let result = PsoRunner::run(&mut model, &PsoConfig::default().with_seed(42)).unwrap();
        assert_eq!(result.best.len(), 3);
        assert!(result.best.iter().all(|&r| r < 2));
        assert_eq!(result.iterations, 15);
        assert_eq!(result.evaluations, 30 * 16);
        assert_eq!(result.fitness_history.len(), 16);
        assert!(result.best_fitness >= result.fitness_history[0]);
    }

    #[test]
    fn test_history_monotone() {
        let mut model = larger_model();
        let config = PsoConfig::default().with_iterations(40).with_seed(6);
        let result = PsoRunner::run(&mut model, &config).unwrap();
        for w in result.fitness_history.windows(2) {
            assert!(w[1] >= w[0]);
        }
        assert!(result.best.iter().all(|&r| r < 5));
        assert_eq!(result.best_fitness, model.compute(&result.best));
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = PsoConfig::default().with_seed(13);
        let a = PsoRunner::run(&mut larger_model(), &config).unwrap();
        let b = PsoRunner::run(&mut larger_model(), &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_single_resource() {
        let mut model = FitnessModel::new(vec![Task::new("a", 10.0, TaskWeight::Light); 4], vec![900.0]);
        let result = PsoRunner::run(&mut model, &PsoConfig::default().with_seed(2)).unwrap();
        assert_eq!(result.best, vec![0; 4]);
    }

    #[test]
    fn test_empty_and_no_resources() {
        let mut empty = FitnessModel::new(Vec::new(), vec![500.0]);
        assert!(PsoRunner::run(&mut empty, &PsoConfig::default())
            .unwrap()
            .best
            .is_empty());

        let mut none = FitnessModel::new(vec![Task::new("a", 1.0, TaskWeight::Light)], Vec::new());
        assert_eq!(
            PsoRunner::run(&mut none, &PsoConfig::default()).unwrap_err(),
            AssignError::NoResources
        );
    }
}
