use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A checklist item owned by exactly one task. The owning task holds the
/// collection; `task_id` is a back-reference for API calls only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: i64,
    pub task_id: i64,
    pub name: String,
    pub completed: bool,
    /// Stable sort key, ascending, unique within a task
    pub position: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Number of completed subtasks
pub fn completed_count(subtasks: &[Subtask]) -> usize {
    subtasks.iter().filter(|s| s.completed).count()
}

/// Checklist progress string, `"1/3 completadas"` style. `0/0` when empty.
pub fn progress_label(subtasks: &[Subtask]) -> String {
    format!("{}/{} completadas", completed_count(subtasks), subtasks.len())
}

/// Progress bar percentage; zero when there are no subtasks.
pub fn progress_percent(subtasks: &[Subtask]) -> u16 {
    if subtasks.is_empty() {
        return 0;
    }
    (completed_count(subtasks) * 100 / subtasks.len()) as u16
}
