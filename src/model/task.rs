use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::subtask::Subtask;

/// Kanban column a task currently occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Backlog,
    Doing,
    Done,
}

impl Status {
    /// Columns in board order
    pub const ALL: [Status; 3] = [Status::Backlog, Status::Doing, Status::Done];

    /// Wire value, as used in the `new_status` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Backlog => "backlog",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    /// Column header shown on the board
    pub fn column_title(self) -> &'static str {
        match self {
            Status::Backlog => "Backlog",
            Status::Doing => "En Progreso",
            Status::Done => "Completado",
        }
    }

    /// The column to the left, if any
    pub fn prev(self) -> Option<Status> {
        match self {
            Status::Backlog => None,
            Status::Doing => Some(Status::Backlog),
            Status::Done => Some(Status::Doing),
        }
    }

    /// The column to the right, if any
    pub fn next(self) -> Option<Status> {
        match self {
            Status::Backlog => Some(Status::Doing),
            Status::Doing => Some(Status::Done),
            Status::Done => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(Status::Backlog),
            "doing" => Ok(Status::Doing),
            "done" => Ok(Status::Done),
            other => Err(format!(
                "invalid status '{other}' (expected backlog, doing or done)"
            )),
        }
    }
}

/// A task as the API represents it. The server owns every field; the client
/// never fabricates ids or timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(default)]
    pub project_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub status: Status,
    /// Present in list payloads; single-task payloads may omit it
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Check the completion triplet: `completed`, `status == done` and a
    /// non-null `completed_at` move together.
    pub fn completion_consistent(&self) -> bool {
        self.completed == (self.status == Status::Done)
            && self.completed == self.completed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>(), Ok(status));
        }
        assert!("urgent".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_neighbors() {
        assert_eq!(Status::Backlog.prev(), None);
        assert_eq!(Status::Backlog.next(), Some(Status::Doing));
        assert_eq!(Status::Done.next(), None);
        assert_eq!(Status::Done.prev(), Some(Status::Doing));
    }

    #[test]
    fn test_deserialize_list_payload() {
        let json = r#"{
            "id": 7,
            "name": "Diseñar el tablero",
            "description": null,
            "completed": false,
            "project_id": 2,
            "created_at": "2025-03-01T10:00:00Z",
            "completed_at": null,
            "status": "doing",
            "subtasks": []
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.status, Status::Doing);
        assert_eq!(task.project_id, Some(2));
        assert!(task.completion_consistent());
    }

    #[test]
    fn test_deserialize_without_subtasks_field() {
        // Single-task responses omit the subtasks collection
        let json = r#"{
            "id": 1,
            "name": "Foo",
            "completed": true,
            "created_at": "2025-03-01T10:00:00Z",
            "completed_at": "2025-03-02T09:30:00Z",
            "status": "done"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.subtasks.is_empty());
        assert!(task.completion_consistent());
    }

    #[test]
    fn test_completion_consistent_detects_mismatch() {
        let mut task: Task = serde_json::from_str(
            r#"{"id":1,"name":"x","completed":false,
                "created_at":"2025-03-01T10:00:00Z","status":"backlog"}"#,
        )
        .unwrap();
        assert!(task.completion_consistent());
        task.status = Status::Done;
        assert!(!task.completion_consistent());
    }
}
