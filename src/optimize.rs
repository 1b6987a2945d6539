//! Request-level entry points.
//!
//! [`optimize()`] is the one call external collaborators make: validate and
//! normalize the request, run the chosen optimizer on a fresh
//! [`FitnessModel`], and repair the output to the requested length. It never
//! fails; every error path degrades to the all-zero assignment and is
//! logged with `tracing::warn!`.
//!
//! [`optimize_with`] takes per-algorithm configuration and returns an
//! [`Optimization`] report. [`validate_request`] exposes the input checks on
//! their own for callers that want the reason a request would fall back.

use crate::abc::{AbcConfig, AbcRunner, AbcVariant};
use crate::error::AssignError;
use crate::ga::{GaConfig, GaRunner};
use crate::model::fitness::DEGENERATE_FITNESS;
use crate::model::{normalize_tasks, FitnessModel, RawTask, ScheduleEstimate, Task};
use crate::pso::{PsoConfig, PsoRunner};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optimizer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// Artificial Bee Colony with a fixed iteration budget.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "abc"))]
    AbcStandard,

    /// Artificial Bee Colony with elite opposition-based learning.
    #[cfg_attr(feature = "serde", serde(rename = "abc-eobl"))]
    AbcEobl,

    #[cfg_attr(feature = "serde", serde(rename = "ga"))]
    Genetic,

    #[cfg_attr(feature = "serde", serde(rename = "pso"))]
    ParticleSwarm,
}

impl Algorithm {
    /// Every variant, in report order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AbcStandard,
        Algorithm::AbcEobl,
        Algorithm::Genetic,
        Algorithm::ParticleSwarm,
    ];

    /// Short name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::AbcStandard => "abc",
            Algorithm::AbcEobl => "abc-eobl",
            Algorithm::Genetic => "ga",
            Algorithm::ParticleSwarm => "pso",
        }
    }
}

impl FromStr for Algorithm {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abc" | "abc-standard" => Ok(Algorithm::AbcStandard),
            "abc-eobl" | "eobl" => Ok(Algorithm::AbcEobl),
            "ga" | "genetic" => Ok(Algorithm::Genetic),
            "pso" | "particle-swarm" => Ok(Algorithm::ParticleSwarm),
            other => Err(AssignError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Algorithm choice plus the configuration of every optimizer.
///
/// Only the configuration matching `algorithm` is used by
/// [`optimize_with`]; [`optimize_all`] uses all of them. A `seed` here
/// overrides the per-algorithm seeds.
///
/// ```
/// use u_assign::{Algorithm, OptimizeOptions};
///
/// let options = OptimizeOptions::new(Algorithm::Genetic).with_seed(42);
/// assert_eq!(options.algorithm, Algorithm::Genetic);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizeOptions {
    pub algorithm: Algorithm,
    pub seed: Option<u64>,
    /// Used for both ABC variants; `variant` is set from `algorithm`.
    pub abc: AbcConfig,
    pub ga: GaConfig,
    pub pso: PsoConfig,
}

impl OptimizeOptions {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_abc(mut self, config: AbcConfig) -> Self {
        self.abc = config;
        self
    }

    pub fn with_ga(mut self, config: GaConfig) -> Self {
        self.ga = config;
        self
    }

    pub fn with_pso(mut self, config: PsoConfig) -> Self {
        self.pso = config;
        self
    }
}

/// Outcome of one optimization request.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Optimization {
    /// Resource index per task; always `task_count` long.
    pub assignment: Vec<usize>,

    /// Fitness of the optimizer's best assignment, before length repair.
    pub fitness: f64,

    pub algorithm: Algorithm,

    /// Fitness evaluations the optimizer performed.
    pub evaluations: usize,

    /// Best fitness after initialization and after each iteration.
    pub fitness_history: Vec<f64>,

    /// Predicted schedule figures; `None` when the request was rejected.
    pub estimate: Option<ScheduleEstimate>,

    /// Why the request fell back to the all-zero assignment, if it did.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub fallback: Option<AssignError>,
}

impl Optimization {
    /// `true` if the assignment is the all-zero fallback.
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    fn rejected(task_count: usize, algorithm: Algorithm, err: AssignError) -> Self {
        Self {
            assignment: vec![0; task_count],
            fitness: DEGENERATE_FITNESS,
            algorithm,
            evaluations: 0,
            fitness_history: Vec::new(),
            estimate: None,
            fallback: Some(err),
        }
    }
}

/// Best assignment and statistics common to every runner's result.
struct RunSummary {
    best: Vec<usize>,
    fitness: f64,
    evaluations: usize,
    fitness_history: Vec<f64>,
}

/// Checks a request and normalizes its tasks.
///
/// Rejects an empty task list, zero resources, a capacity list whose length
/// differs from `resource_count`, and malformed task records.
pub fn validate_request(
    resource_count: usize,
    tasks: &[RawTask],
    capacities: &[f64],
) -> Result<Vec<Task>, AssignError> {
    if tasks.is_empty() {
        return Err(AssignError::EmptyTasks);
    }
    if resource_count == 0 {
        return Err(AssignError::NoResources);
    }
    if capacities.len() != resource_count {
        return Err(AssignError::CapacityMismatch {
            expected: resource_count,
            actual: capacities.len(),
        });
    }
    normalize_tasks(tasks)
}

/// Forces `assignment` to exactly `task_count` entries in
/// `[0, resource_count)`: pads with zeros, truncates, and maps out-of-range
/// entries to 0.
pub fn repair(mut assignment: Vec<usize>, task_count: usize, resource_count: usize) -> Vec<usize> {
    assignment.resize(task_count, 0);
    for r in assignment.iter_mut() {
        if *r >= resource_count {
            *r = 0;
        }
    }
    assignment
}

/// Assigns each task to a resource.
///
/// Always returns `task_count` indices in `[0, resource_count)`; invalid
/// requests get the all-zero assignment.
///
/// ```
/// use u_assign::{optimize, Algorithm, RawTask};
///
/// let tasks = vec![
///     RawTask::new().with_length(1000.0).with_weight("medium"),
///     RawTask::new().with_length(45.0).with_weight("light"),
///     RawTask::new().with_length(1150.0).with_weight("heavy"),
/// ];
/// let assignment = optimize(3, 2, &tasks, &[500.0, 1000.0], Algorithm::AbcEobl);
/// assert_eq!(assignment.len(), 3);
/// assert!(assignment.iter().all(|&r| r < 2));
///
/// // Capacity count mismatch fails closed.
/// assert_eq!(optimize(3, 2, &tasks, &[500.0], Algorithm::Genetic), vec![0, 0, 0]);
/// ```
pub fn optimize(
    task_count: usize,
    resource_count: usize,
    tasks: &[RawTask],
    capacities: &[f64],
    algorithm: Algorithm,
) -> Vec<usize> {
    optimize_with(
        task_count,
        resource_count,
        tasks,
        capacities,
        &OptimizeOptions::new(algorithm),
    )
    .assignment
}

/// Like [`optimize()`], with explicit configuration and a full report.
pub fn optimize_with(
    task_count: usize,
    resource_count: usize,
    tasks: &[RawTask],
    capacities: &[f64],
    options: &OptimizeOptions,
) -> Optimization {
    let algorithm = options.algorithm;
    let normalized = match validate_request(resource_count, tasks, capacities) {
        Ok(normalized) => normalized,
        Err(err) => {
            warn!(
                %algorithm,
                error = %err,
                task_count,
                "rejected request, assigning every task to resource 0"
            );
            return Optimization::rejected(task_count, algorithm, err);
        }
    };

    let mut model = FitnessModel::new(normalized, capacities.to_vec());
    let (summary, fallback) = match run_algorithm(&mut model, options) {
        Ok(summary) => (summary, None),
        Err(err) => {
            warn!(
                %algorithm,
                error = %err,
                "optimizer failed, assigning every task to resource 0"
            );
            let best = vec![0; model.task_count()];
            let summary = RunSummary {
                fitness: model.compute(&best),
                best,
                evaluations: 0,
                fitness_history: Vec::new(),
            };
            (summary, Some(err))
        }
    };

    let estimate = ScheduleEstimate::from_assignment(&model, &summary.best);
    if summary.best.len() != task_count {
        warn!(
            %algorithm,
            produced = summary.best.len(),
            task_count,
            "repairing assignment length"
        );
    }

    info!(
        %algorithm,
        fitness = summary.fitness,
        evaluations = summary.evaluations,
        cache_hits = model.cache().hits(),
        makespan = estimate.makespan,
        "optimization complete"
    );

    Optimization {
        assignment: repair(summary.best, task_count, resource_count),
        fitness: summary.fitness,
        algorithm,
        evaluations: summary.evaluations,
        fitness_history: summary.fitness_history,
        estimate: Some(estimate),
        fallback,
    }
}

/// Runs every algorithm on the same request, each with its own model and
/// cache. Results follow [`Algorithm::ALL`]. With the `parallel` feature
/// the runs execute on the rayon pool.
pub fn optimize_all(
    task_count: usize,
    resource_count: usize,
    tasks: &[RawTask],
    capacities: &[f64],
    options: &OptimizeOptions,
) -> Vec<Optimization> {
    let run = |algorithm: &Algorithm| {
        let options = options.clone().with_algorithm(*algorithm);
        optimize_with(task_count, resource_count, tasks, capacities, &options)
    };

    #[cfg(feature = "parallel")]
    {
        Algorithm::ALL.par_iter().map(run).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        Algorithm::ALL.iter().map(run).collect()
    }
}

fn run_algorithm(
    model: &mut FitnessModel,
    options: &OptimizeOptions,
) -> Result<RunSummary, AssignError> {
    match options.algorithm {
        Algorithm::AbcStandard | Algorithm::AbcEobl => {
            let variant = if options.algorithm == Algorithm::AbcEobl {
                AbcVariant::EliteOpposition
            } else {
                AbcVariant::Standard
            };
            let mut config = options.abc.clone().with_variant(variant);
            config.seed = options.seed.or(config.seed);
            let result = AbcRunner::run(model, &config)?;
            if result.recovered_failures > 0 {
                warn!(
                    failures = result.recovered_failures,
                    iterations = result.iterations,
                    "abc-eobl skipped failed iterations"
                );
            }
            Ok(RunSummary {
                best: result.best,
                fitness: result.best_fitness,
                evaluations: result.evaluations,
                fitness_history: result.fitness_history,
            })
        }
        Algorithm::Genetic => {
            let mut config = options.ga.clone();
            config.seed = options.seed.or(config.seed);
            let result = GaRunner::run(model, &config)?;
            Ok(RunSummary {
                best: result.best,
                fitness: result.best_fitness,
                evaluations: result.evaluations,
                fitness_history: result.fitness_history,
            })
        }
        Algorithm::ParticleSwarm => {
            let mut config = options.pso.clone();
            config.seed = options.seed.or(config.seed);
            let result = PsoRunner::run(model, &config)?;
            Ok(RunSummary {
                best: result.best,
                fitness: result.best_fitness,
                evaluations: result.evaluations,
                fitness_history: result.fitness_history,
            })
        }
    }
}
