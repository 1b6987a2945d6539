//! Error taxonomy for assignment requests and optimizer runs.
//!
//! None of these errors reach the caller of [`crate::optimize()`]: the facade
//! degrades every failure to a schedulable assignment. They surface through
//! the checked entry points ([`crate::validate_request`], the runners'
//! `run` functions) for callers that want the reason.

/// Errors raised while validating inputs or evaluating assignments.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssignError {
    /// The task list is empty.
    #[error("task list is empty")]
    EmptyTasks,

    /// No resources are available to receive tasks.
    #[error("resource count must be at least 1")]
    NoResources,

    /// The number of capacities differs from the declared resource count.
    #[error("expected {expected} resource capacities, got {actual}")]
    CapacityMismatch {
        /// Declared resource count.
        expected: usize,
        /// Length of the capacity list.
        actual: usize,
    },

    /// A task record could not be normalized.
    #[error("task {index} is malformed: {reason}")]
    MalformedTask {
        /// Position of the record in the input list.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A weight label did not match any weight class.
    #[error("unknown task weight `{0}`")]
    UnknownWeight(String),

    /// A checked fitness evaluation rejected its input.
    #[error("fitness evaluation failed: {0}")]
    Evaluation(String),

    /// An optimizer configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An algorithm name did not match any known variant.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

impl AssignError {
    /// Returns `true` for errors caused by the caller's request rather than
    /// by the optimizer itself.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            AssignError::EmptyTasks
                | AssignError::NoResources
                | AssignError::CapacityMismatch { .. }
                | AssignError::MalformedTask { .. }
        )
    }
}
