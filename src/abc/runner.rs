//! ABC execution loops.
//!
//! [`AbcRunner`] drives a [`Colony`] under one of two budget policies:
//!
//! - **Standard**: employed → onlooker → scout for a fixed iteration count.
//! - **EOBL**: until the function-evaluation budget is spent, each iteration
//!   draws `Pr ~ U(0, 1)` and runs the elite-opposition phase when
//!   `Pr < Pe`, the standard phases otherwise. A failed iteration is logged
//!   and skipped; the best-ever snapshot is kept.

use super::colony::{Colony, EvaluationBudget};
use super::config::{AbcConfig, AbcVariant};
use crate::error::AssignError;
use crate::model::FitnessModel;
use crate::random::rng_from_seed;
use rand::Rng;
use tracing::{debug, info, warn};

/// Result of an ABC optimization run.
#[derive(Debug, Clone)]
pub struct AbcResult {
    /// The best assignment found during the entire run.
    pub best: Vec<usize>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Loop iterations executed.
    pub iterations: usize,

    /// Fitness evaluations charged, including initialization.
    pub evaluations: usize,

    /// Number of food sources abandoned to scouts.
    pub scouts: usize,

    /// Iterations that failed and were skipped (EOBL only).
    pub recovered_failures: usize,

    /// Best fitness after initialization, then after each iteration.
    pub fitness_history: Vec<f64>,
}

impl AbcResult {
    fn empty() -> Self {
        Self {
            best: Vec::new(),
            best_fitness: crate::model::fitness::DEGENERATE_FITNESS,
            iterations: 0,
            evaluations: 0,
            scouts: 0,
            recovered_failures: 0,
            fitness_history: Vec::new(),
        }
    }

    fn from_colony(
        colony: Colony,
        task_count: usize,
        iterations: usize,
        scouts: usize,
        recovered_failures: usize,
    ) -> Self {
        let evaluations = colony.budget().evaluations();
        let (best, best_fitness, fitness_history) = colony.into_best().into_parts(task_count);
        Self {
            best,
            best_fitness,
            iterations,
            evaluations,
            scouts,
            recovered_failures,
            fitness_history,
        }
    }
}

/// Outcome of one EOBL iteration body.
#[derive(Debug)]
enum IterationOutcome {
    Completed { scouted: Option<usize> },
    Recovered(AssignError),
}

impl From<Result<Option<usize>, AssignError>> for IterationOutcome {
    fn from(result: Result<Option<usize>, AssignError>) -> Self {
        match result {
            Ok(scouted) => IterationOutcome::Completed { scouted },
            Err(err) => IterationOutcome::Recovered(err),
        }
    }
}

/// Executes the Artificial Bee Colony optimizer.
///
/// # Usage
///
/// ```
/// use u_assign::abc::{AbcConfig, AbcRunner};
/// use u_assign::model::{FitnessModel, Task, TaskWeight};
///
/// let tasks = vec![
///     Task::new("a", 1000.0, TaskWeight::Medium),
///     Task::new("b", 45.0, TaskWeight::Light),
/// ];
/// let mut model = FitnessModel::new(tasks, vec![500.0, 1000.0]);
/// let result = AbcRunner::run(&mut model, &AbcConfig::default().with_seed(42)).unwrap();
/// assert_eq!(result.best.len(), 2);
/// ```
pub struct AbcRunner;

impl AbcRunner {
    /// Runs the configured variant with a generator seeded from
    /// `config.seed`.
    pub fn run(model: &mut FitnessModel, config: &AbcConfig) -> Result<AbcResult, AssignError> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(model, config, &mut rng)
    }

    /// Runs the configured variant with a caller-supplied generator.
    ///
    /// The standard variant returns the first evaluation error; the EOBL
    /// variant skips failed iterations instead.
    pub fn run_with_rng<R: Rng>(
        model: &mut FitnessModel,
        config: &AbcConfig,
        rng: &mut R,
    ) -> Result<AbcResult, AssignError> {
        config.validate()?;
        if model.resource_count() == 0 {
            return Err(AssignError::NoResources);
        }
        if model.task_count() == 0 {
            return Ok(AbcResult::empty());
        }

        match config.variant {
            AbcVariant::Standard => run_standard(model, config, rng),
            AbcVariant::EliteOpposition => Ok(run_elite_opposition(model, config, rng)),
        }
    }
}

fn run_standard<R: Rng>(
    model: &mut FitnessModel,
    config: &AbcConfig,
    rng: &mut R,
) -> Result<AbcResult, AssignError> {
    let budget = EvaluationBudget::iterations(config.iterations);
    let mut colony = Colony::initialize(config, budget, model, rng);
    let mut iterations = 0usize;
    let mut scouts = 0usize;

    while !colony.budget().exhausted() {
        if colony.forage(model, rng)?.is_some() {
            scouts += 1;
        }
        colony.finish_iteration();
        iterations += 1;

        debug!(
            iteration = iterations,
            best_fitness = colony.best().fitness(),
            evaluations = colony.budget().evaluations(),
            "abc iteration"
        );
    }

    info!(
        iterations,
        scouts,
        best_fitness = colony.best().fitness(),
        "abc run complete"
    );
    Ok(AbcResult::from_colony(colony, model.task_count(), iterations, scouts, 0))
}

fn run_elite_opposition<R: Rng>(
    model: &mut FitnessModel,
    config: &AbcConfig,
    rng: &mut R,
) -> AbcResult {
    let budget = EvaluationBudget::function_evaluations(config.max_evaluations());
    let mut colony = Colony::initialize(config, budget, model, rng);
    let mut iterations = 0usize;
    let mut scouts = 0usize;
    let mut failures = 0usize;

    while !colony.budget().exhausted() {
        let spent_before = colony.budget().evaluations();
        let pr: f64 = rng.random();

        let result = if pr < config.opposition_probability {
            colony.elite_opposition_phase(model, rng).map(|()| None)
        } else {
            colony.forage(model, rng)
        };

        match IterationOutcome::from(result) {
            IterationOutcome::Completed { scouted } => {
                if scouted.is_some() {
                    scouts += 1;
                }
            }
            IterationOutcome::Recovered(err) => {
                failures += 1;
                warn!(
                    iteration = iterations + 1,
                    error = %err,
                    "eobl iteration failed, continuing with best-so-far"
                );
                if colony.budget().evaluations() == spent_before {
                    colony.charge_budget();
                }
            }
        }

        colony.finish_iteration();
        iterations += 1;

        debug!(
            iteration = iterations,
            opposition = pr < config.opposition_probability,
            best_fitness = colony.best().fitness(),
            evaluations = colony.budget().evaluations(),
            "eobl iteration"
        );
    }

    info!(
        iterations,
        scouts,
        failures,
        best_fitness = colony.best().fitness(),
        "eobl run complete"
    );
    AbcResult::from_colony(colony, model.task_count(), iterations, scouts, failures)
}

// ============================================================================
// Tests
// ============================================================================
