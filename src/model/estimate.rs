//! Static schedule estimate for an assignment.
//!
//! Predicts the figures a dispatcher reports after running a schedule
//! (makespan, throughput, imbalance degree) from the fitness model alone,
//! assuming each resource runs its tasks back to back.

use super::fitness::FitnessModel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Predicted figures for one assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleEstimate {
    /// Busy time of each resource (sum of its tasks' execution times).
    pub resource_busy: Vec<f64>,

    /// Number of tasks placed on each resource.
    pub resource_tasks: Vec<usize>,

    /// Finish time of the busiest resource.
    pub makespan: f64,

    /// Tasks completed per unit time over the makespan.
    pub throughput: f64,

    /// `(max - min) / mean` of the per-task execution times.
    pub imbalance_degree: f64,

    /// Sum of all execution times.
    pub total_exec: f64,

    /// Sum of all task costs.
    pub total_cost: f64,
}

impl ScheduleEstimate {
    /// Computes the estimate. Entries of `assignment` outside the resource
    /// range are charged at the fallback capacity but not attributed to any
    /// resource's busy time.
    pub fn from_assignment(model: &FitnessModel, assignment: &[usize]) -> Self {
        let m = model.resource_count();
        let mut resource_busy = vec![0.0; m];
        let mut resource_tasks = vec![0usize; m];
        let mut exec_times = Vec::with_capacity(assignment.len());
        let mut total_cost = 0.0;

        for (i, &r) in assignment.iter().take(model.task_count()).enumerate() {
            let tc = model.task_cost(i, r);
            if r < m {
                resource_busy[r] += tc.exec_time;
                resource_tasks[r] += 1;
            }
            exec_times.push(tc.exec_time);
            total_cost += tc.cost;
        }

        let total_exec: f64 = exec_times.iter().sum();
        let makespan = resource_busy.iter().copied().fold(0.0, f64::max);
        let throughput = if makespan > 0.0 {
            exec_times.len() as f64 / makespan
        } else {
            0.0
        };

        let imbalance_degree = if exec_times.is_empty() {
            0.0
        } else {
            let max = exec_times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = exec_times.iter().copied().fold(f64::INFINITY, f64::min);
            let mean = total_exec / exec_times.len() as f64;
            if mean > 0.0 {
                (max - min) / mean
            } else {
                0.0
            }
        };

        Self {
            resource_busy,
            resource_tasks,
            makespan,
            throughput,
            imbalance_degree,
            total_exec,
            total_cost,
        }
    }
}
