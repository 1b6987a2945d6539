//! Problem model: tasks, the fitness function, and schedule estimates.
//!
//! # Submodules
//!
//! - [`task`]: Canonical [`Task`] records and boundary normalization
//! - [`fitness`]: The time/cost [`FitnessModel`] and its per-run cache
//! - [`estimate`]: Predicted makespan, throughput and imbalance of an assignment

pub mod estimate;
pub mod fitness;
pub mod task;

pub use estimate::ScheduleEstimate;
pub use fitness::{FitnessCache, FitnessModel};
pub use task::{normalize_tasks, RawTask, Task, TaskWeight};
