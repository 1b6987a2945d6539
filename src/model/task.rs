//! Task records and input normalization.
//!
//! Callers hand over loosely-typed [`RawTask`] records; [`normalize_tasks`]
//! turns them into canonical [`Task`] values once, at the boundary. The
//! optimizers only ever see [`Task`].

use crate::error::AssignError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length used when a record carries no (or a zero) length.
pub const DEFAULT_TASK_LENGTH: f64 = 1000.0;

/// Weight class of a task. Selects a fixed cost modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TaskWeight {
    Light,
    #[default]
    Medium,
    Heavy,
}

impl TaskWeight {
    /// Nominal work length attached to the weight class, used by the cost
    /// term of the fitness model.
    pub fn weight_length(self) -> f64 {
        match self {
            TaskWeight::Light => 45.0,
            TaskWeight::Medium => 350.0,
            TaskWeight::Heavy => 1150.0,
        }
    }

    /// Parses a weight label, falling back to [`TaskWeight::Medium`] for
    /// anything unrecognized.
    pub fn parse_or_default(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl FromStr for TaskWeight {
    type Err = AssignError;

    /// Accepts `light`/`medium`/`heavy` and the legacy labels
    /// `ringan`/`sedang`/`berat`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "ringan" => Ok(TaskWeight::Light),
            "medium" | "sedang" => Ok(TaskWeight::Medium),
            "heavy" | "berat" => Ok(TaskWeight::Heavy),
            other => Err(AssignError::UnknownWeight(other.to_string())),
        }
    }
}

impl fmt::Display for TaskWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskWeight::Light => "light",
            TaskWeight::Medium => "medium",
            TaskWeight::Heavy => "heavy",
        };
        f.write_str(label)
    }
}

/// A normalized task.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Task {
    pub name: String,
    /// Work units; positive and finite after normalization.
    pub length: f64,
    pub weight: TaskWeight,
}

impl Task {
    pub fn new(name: impl Into<String>, length: f64, weight: TaskWeight) -> Self {
        Self {
            name: name.into(),
            length,
            weight,
        }
    }
}

/// A task record as received from the outside world.
///
/// Every field is optional. With the `serde` feature enabled, `mi` and `MI`
/// are accepted as aliases of `length`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawTask {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,

    #[cfg_attr(feature = "serde", serde(default, alias = "mi", alias = "MI"))]
    pub length: Option<f64>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub weight: Option<String>,
}

impl RawTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// Normalizes this record, using `index` for the default name and for
    /// error reporting.
    ///
    /// A missing or zero length becomes [`DEFAULT_TASK_LENGTH`]; a negative
    /// or non-finite length is rejected.
    pub fn normalize(&self, index: usize) -> Result<Task, AssignError> {
        let length = match self.length {
            None => DEFAULT_TASK_LENGTH,
            Some(l) if l == 0.0 => DEFAULT_TASK_LENGTH,
            Some(l) if !l.is_finite() => {
                return Err(AssignError::MalformedTask {
                    index,
                    reason: format!("length {l} is not finite"),
                })
            }
            Some(l) if l < 0.0 => {
                return Err(AssignError::MalformedTask {
                    index,
                    reason: format!("length {l} is negative"),
                })
            }
            Some(l) => l,
        };

        let name = match &self.name {
            Some(n) if !n.is_empty() => n.clone(),
            _ => format!("Task-{index}"),
        };

        let weight = self
            .weight
            .as_deref()
            .map(TaskWeight::parse_or_default)
            .unwrap_or_default();

        Ok(Task {
            name,
            length,
            weight,
        })
    }
}

impl From<&Task> for RawTask {
    fn from(task: &Task) -> Self {
        RawTask {
            name: Some(task.name.clone()),
            length: Some(task.length),
            weight: Some(task.weight.to_string()),
        }
    }
}

/// Normalizes a whole request. Fails on an empty list or on the first
/// malformed record.
pub fn normalize_tasks(raw: &[RawTask]) -> Result<Vec<Task>, AssignError> {
    if raw.is_empty() {
        return Err(AssignError::EmptyTasks);
    }
    raw.iter()
        .enumerate()
        .map(|(i, r)| r.normalize(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_lengths() {
        assert_eq!(TaskWeight::Light.weight_length(), 45.0);
        assert_eq!(TaskWeight::Medium.weight_length(), 350.0);
        assert_eq!(TaskWeight::Heavy.weight_length(), 1150.0);
    }

    #[test]
    fn test_weight_parsing() {
        assert_eq!("light".parse::<TaskWeight>(), Ok(TaskWeight::Light));
        assert_eq!("HEAVY".parse::<TaskWeight>(), Ok(TaskWeight::Heavy));
        assert_eq!("sedang".parse::<TaskWeight>(), Ok(TaskWeight::Medium));
        assert_eq!("berat".parse::<TaskWeight>(), Ok(TaskWeight::Heavy));
        assert_eq!(" ringan ".parse::<TaskWeight>(), Ok(TaskWeight::Light));
        assert!("enormous".parse::<TaskWeight>().is_err());
        assert_eq!(TaskWeight::parse_or_default("enormous"), TaskWeight::Medium);
    }

    #[test]
    fn test_weight_display_roundtrips_through_parse() {
        for w in [TaskWeight::Light, TaskWeight::Medium, TaskWeight::Heavy] {
            assert_eq!(w.to_string().parse::<TaskWeight>(), Ok(w));
        }
    }

    #[test]
    fn test_normalize_defaults() {
        let task = RawTask::new().normalize(3).unwrap();
        assert_eq!(task.name, "Task-3");
        assert_eq!(task.length, DEFAULT_TASK_LENGTH);
        assert_eq!(task.weight, TaskWeight::Medium);
    }

    #[test]
    fn test_normalize_zero_length_uses_default() {
        let task = RawTask::new().with_length(0.0).normalize(0).unwrap();
        assert_eq!(task.length, DEFAULT_TASK_LENGTH);
    }

    #[test]
    fn test_normalize_keeps_fields() {
        let task = RawTask::new()
            .with_name("render")
            .with_length(1150.0)
            .with_weight("heavy")
            .normalize(0)
            .unwrap();
        assert_eq!(task, Task::new("render", 1150.0, TaskWeight::Heavy));
    }

    #[test]
    fn test_normalize_rejects_bad_lengths() {
        let err = RawTask::new().with_length(-5.0).normalize(2).unwrap_err();
        assert!(matches!(err, AssignError::MalformedTask { index: 2, .. }));

        let err = RawTask::new().with_length(f64::NAN).normalize(1).unwrap_err();
        assert!(matches!(err, AssignError::MalformedTask { index: 1, .. }));

        let err = RawTask::new()
            .with_length(f64::INFINITY)
            .normalize(0)
            .unwrap_err();
        assert!(matches!(err, AssignError::MalformedTask { .. }));
    }

    #[test]
    fn test_normalize_tasks_empty() {
        assert_eq!(normalize_tasks(&[]), Err(AssignError::EmptyTasks));
    }

    #[test]
    fn test_normalize_tasks_reports_first_bad_index() {
        let raw = vec![
            RawTask::new().with_length(10.0),
            RawTask::new().with_length(20.0),
            RawTask::new().with_length(-1.0),
            RawTask::new().with_length(f64::NAN),
        ];
        let err = normalize_tasks(&raw).unwrap_err();
        assert!(matches!(err, AssignError::MalformedTask { index: 2, .. }));
    }

    #[test]
    fn test_raw_from_task() {
        let task = Task::new("a", 45.0, TaskWeight::Light);
        let raw = RawTask::from(&task);
        assert_eq!(raw.normalize(0).unwrap(), task);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_aliases() {
        let raw: Vec<RawTask> = serde_json::from_str(
            r#"[{"name":"a","length":100},{"mi":200,"weight":"berat"},{"MI":300},{}]"#,
        )
        .unwrap();
        let tasks = normalize_tasks(&raw).unwrap();
        assert_eq!(tasks[0].length, 100.0);
        assert_eq!(tasks[1].length, 200.0);
        assert_eq!(tasks[1].weight, TaskWeight::Heavy);
        assert_eq!(tasks[2].length, 300.0);
        assert_eq!(tasks[3].length, DEFAULT_TASK_LENGTH);
        assert_eq!(tasks[3].name, "Task-3");
    }
}
