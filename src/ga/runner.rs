//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → elitism → selection → crossover →
//! mutation → re-evaluation → repeat, for a fixed number of generations.

use super::config::GaConfig;
use super::operators::{single_point_crossover, uniform_reset_mutation};
use crate::error::AssignError;
use crate::model::FitnessModel;
use crate::population::{sort_descending, BestTracker, Candidate};
use crate::random::rng_from_seed;
use rand::Rng;
use tracing::{debug, info};

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best assignment found during the entire run.
    pub best: Vec<usize>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Fitness lookups performed, cached or not.
    pub evaluations: usize,

    /// Best fitness after initialization, then at the end of each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_assign::ga::{GaConfig, GaRunner};
/// use u_assign::model::{FitnessModel, Task, TaskWeight};
///
/// let tasks = vec![Task::new("a", 1000.0, TaskWeight::Heavy); 4];
/// let mut model = FitnessModel::new(tasks, vec![500.0, 1000.0, 1500.0]);
/// let result = GaRunner::run(&mut model, &GaConfig::default().with_seed(42)).unwrap();
/// assert_eq!(result.best.len(), 4);
/// assert!(result.best.iter().all(|&r| r < 3));
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    pub fn run(model: &mut FitnessModel, config: &GaConfig) -> Result<GaResult, AssignError> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(model, config, &mut rng)
    }

    /// Runs the GA with a caller-supplied generator.
    pub fn run_with_rng<R: Rng>(
        model: &mut FitnessModel,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult, AssignError> {
        config.validate()?;
        let resource_count = model.resource_count();
        if resource_count == 0 {
            return Err(AssignError::NoResources);
        }
        let task_count = model.task_count();
        if task_count == 0 {
            return Ok(GaResult {
                best: Vec::new(),
                best_fitness: crate::model::fitness::DEGENERATE_FITNESS,
                generations: 0,
                evaluations: 0,
                fitness_history: Vec::new(),
            });
        }

        // 1. Initialize and evaluate
        let mut population: Vec<Candidate> = (0..config.population_size)
            .map(|_| Candidate::random(task_count, resource_count, rng))
            .collect();
        let mut evaluations = evaluate_population(model, &mut population);

        let mut best = BestTracker::new();
        best.offer_population(&population);
        best.record();

        // 2. Evolutionary loop
        for gen in 0..config.max_generations {
            sort_descending(&mut population);

            // Elite preservation
            let mut next_gen: Vec<Candidate> = population[..config.elite_count].to_vec();

            // Generate offspring
            while next_gen.len() < config.population_size {
                let p1 = &population[config.selection.select(&population, rng)];
                let p2 = &population[config.selection.select(&population, rng)];

                let (mut child1, mut child2) = if rng.random::<f64>() < config.crossover_rate {
                    single_point_crossover(&p1.assignment, &p2.assignment, rng)
                } else {
                    (p1.assignment.clone(), p2.assignment.clone())
                };

                for child in [&mut child1, &mut child2] {
                    uniform_reset_mutation(child, resource_count, config.mutation_rate, rng);
                }

                next_gen.push(Candidate::new(child1));
                if next_gen.len() < config.population_size {
                    next_gen.push(Candidate::new(child2));
                }
            }

            // 3. Re-evaluate the full generation; elites hit the cache
            evaluations += evaluate_population(model, &mut next_gen);
            population = next_gen;

            best.offer_population(&population);
            best.record();

            debug!(
                generation = gen + 1,
                best_fitness = best.fitness(),
                cache_entries = model.cache().len(),
                "ga generation"
            );
        }

        info!(
            generations = config.max_generations,
            evaluations,
            best_fitness = best.fitness(),
            "ga run complete"
        );

        let (best, best_fitness, fitness_history) = best.into_parts(task_count);
        Ok(GaResult {
            best,
            best_fitness,
            generations: config.max_generations,
            evaluations,
            fitness_history,
        })
    }
}

/// Evaluates every chromosome; returns the number of lookups.
fn evaluate_population(model: &mut FitnessModel, population: &mut [Candidate]) -> usize {
    for candidate in population.iter_mut() {
        candidate.evaluate(model);
    }
    population.len()
}

// ============================================================================
// Tests
// ============================================================================
