//! Shared fitness model with a per-run memoization cache.
//!
//! For an assignment `a` of tasks to resources:
//!
//! ```text
//! exec_i  = length_i / capacity[a_i]
//! cost_i  = exec_i * COST_PER_THROUGHPUT + weight_length_i * COST_PER_WEIGHT_UNIT
//! fitness = 1 / Σ exec_i + 1 / Σ cost_i
//! ```
//!
//! Higher fitness is better. The two reciprocals are summed unweighted.
//!
//! A [`FitnessModel`] owns its [`FitnessCache`]. Tasks and capacities are
//! fixed for the lifetime of the model, so entries are keyed by the
//! assignment alone. Build a new model for every run.

use super::task::Task;
use crate::error::AssignError;
use std::collections::HashMap;

/// Cost per unit of execution time.
pub const COST_PER_THROUGHPUT: f64 = 0.5;

/// Cost per unit of nominal weight length.
pub const COST_PER_WEIGHT_UNIT: f64 = 0.1;

/// Capacity substituted for an out-of-range or non-positive resource.
pub const FALLBACK_CAPACITY: f64 = 500.0;

/// Fitness returned when total execution time or total cost is zero.
pub const DEGENERATE_FITNESS: f64 = 0.0;

/// Memoized fitness values keyed by the exact assignment vector.
#[derive(Debug, Clone, Default)]
pub struct FitnessCache {
    entries: HashMap<Vec<usize>, f64>,
    hits: usize,
    misses: usize,
}

impl FitnessCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an assignment, recording a hit or a miss.
    pub fn get(&mut self, assignment: &[usize]) -> Option<f64> {
        match self.entries.get(assignment) {
            Some(&f) => {
                self.hits += 1;
                Some(f)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, assignment: &[usize], fitness: f64) {
        self.entries.insert(assignment.to_vec(), fitness);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Per-task breakdown of an assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskCost {
    pub exec_time: f64,
    pub cost: f64,
}

/// The fitness function for one assignment problem.
#[derive(Debug, Clone)]
pub struct FitnessModel {
    tasks: Vec<Task>,
    capacities: Vec<f64>,
    cache: FitnessCache,
}

impl FitnessModel {
    /// Creates a model with an empty cache.
    pub fn new(tasks: Vec<Task>, capacities: Vec<f64>) -> Self {
        Self {
            tasks,
            capacities,
            cache: FitnessCache::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn capacities(&self) -> &[f64] {
        &self.capacities
    }

    /// Number of tasks, i.e. the length of every assignment.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of resources; assignments draw indices from `0..resource_count`.
    pub fn resource_count(&self) -> usize {
        self.capacities.len()
    }

    pub fn cache(&self) -> &FitnessCache {
        &self.cache
    }

    /// Effective capacity of resource `r`, substituting
    /// [`FALLBACK_CAPACITY`] for missing or unusable values.
    pub fn capacity_of(&self, r: usize) -> f64 {
        match self.capacities.get(r) {
            Some(&c) if c > 0.0 && c.is_finite() => c,
            _ => FALLBACK_CAPACITY,
        }
    }

    /// Execution time and cost of task `i` on resource `r`.
    pub fn task_cost(&self, i: usize, r: usize) -> TaskCost {
        let task = &self.tasks[i];
        let exec_time = task.length / self.capacity_of(r);
        let cost = exec_time * COST_PER_THROUGHPUT
            + task.weight.weight_length() * COST_PER_WEIGHT_UNIT;
        TaskCost { exec_time, cost }
    }

    /// Total execution time and total cost of an assignment.
    ///
    /// Positions beyond the task list are ignored.
    pub fn totals(&self, assignment: &[usize]) -> (f64, f64) {
        assignment
            .iter()
            .take(self.tasks.len())
            .enumerate()
            .fold((0.0, 0.0), |(exec, cost), (i, &r)| {
                let tc = self.task_cost(i, r);
                (exec + tc.exec_time, cost + tc.cost)
            })
    }

    /// Computes fitness without touching the cache.
    pub fn compute(&self, assignment: &[usize]) -> f64 {
        let (total_exec, total_cost) = self.totals(assignment);
        if total_exec == 0.0 || total_cost == 0.0 {
            return DEGENERATE_FITNESS;
        }
        1.0 / total_exec + 1.0 / total_cost
    }

    /// Cached fitness of an assignment.
    pub fn evaluate(&mut self, assignment: &[usize]) -> f64 {
        if let Some(f) = self.cache.get(assignment) {
            return f;
        }
        let f = self.compute(assignment);
        self.cache.insert(assignment, f);
        f
    }

    /// Cached fitness of an assignment, rejecting an assignment of the wrong
    /// length and a fitness that is not finite.
    pub fn try_evaluate(&mut self, assignment: &[usize]) -> Result<f64, AssignError> {
        if assignment.len() != self.tasks.len() {
            return Err(AssignError::Evaluation(format!(
                "assignment has {} entries for {} tasks",
                assignment.len(),
                self.tasks.len()
            )));
        }
        let f = self.evaluate(assignment);
        if f.is_finite() {
            Ok(f)
        } else {
            Err(AssignError::Evaluation(format!(
                "non-finite fitness {f} for assignment {assignment:?}"
            )))
        }
    }
}
