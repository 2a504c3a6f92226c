//! In-memory gateway mirroring the server's observable behavior, for tests.
//!
//! The client never recomputes server-side rules (completion timestamps, the
//! subtask auto-completion cascade); it re-fetches and reconciles. Tests that
//! exercise the reconciliation therefore need a collaborator that actually
//! implements those rules, the same way the real backend does.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use reqwest::StatusCode;

use crate::model::{Project, Status, Subtask, Task};

use super::gateway::{ApiError, Gateway, TaskDraft};

struct State {
    tasks: Vec<Task>,
    subtasks: Vec<Subtask>,
    projects: Vec<Project>,
    next_task_id: i64,
    next_subtask_id: i64,
    next_project_id: i64,
    /// Number of upcoming requests that fail with a 500
    fail_next: u32,
    requests: u32,
}

impl State {
    fn new() -> Self {
        State {
            tasks: Vec::new(),
            subtasks: Vec::new(),
            projects: Vec::new(),
            next_task_id: 1,
            next_subtask_id: 1,
            next_project_id: 1,
            fail_next: 0,
            requests: 0,
        }
    }

    fn task_mut(&mut self, id: i64) -> Result<&mut Task, ApiError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::Status {
                method: "FAKE",
                path: format!("/tasks/{id}"),
                status: StatusCode::NOT_FOUND,
            })
    }

    fn subtasks_of(&self, task_id: i64) -> Vec<Subtask> {
        let mut subs: Vec<Subtask> = self
            .subtasks
            .iter()
            .filter(|s| s.task_id == task_id)
            .cloned()
            .collect();
        subs.sort_by_key(|s| s.position);
        subs
    }

    /// The server's auto-completion rule: all subtasks complete → done;
    /// any incomplete → backlog and not completed; no subtasks → untouched.
    fn cascade(&mut self, task_id: i64) {
        let subs = self.subtasks_of(task_id);
        if subs.is_empty() {
            return;
        }
        let all_completed = subs.iter().all(|s| s.completed);
        let Ok(task) = self.task_mut(task_id) else {
            return;
        };
        if all_completed {
            task.completed = true;
            task.status = Status::Done;
            if task.completed_at.is_none() {
                task.completed_at = Some(Utc::now());
            }
        } else {
            task.completed = false;
            task.status = Status::Backlog;
            task.completed_at = None;
        }
    }
}

/// Cheap-clone handle; tests keep a clone after boxing one into the store.
#[derive(Clone)]
pub struct FakeGateway {
    state: Rc<RefCell<State>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        FakeGateway {
            state: Rc::new(RefCell::new(State::new())),
        }
    }

    pub fn seed_project(&self, name: &str) -> i64 {
        let mut state = self.state.borrow_mut();
        let id = state.next_project_id;
        state.next_project_id += 1;
        state.projects.push(Project {
            id,
            name: name.to_string(),
            description: None,
            color: None,
        });
        id
    }

    pub fn seed_task(&self, name: &str, status: Status) -> i64 {
        let mut state = self.state.borrow_mut();
        let id = state.next_task_id;
        state.next_task_id += 1;
        let completed = status == Status::Done;
        state.tasks.push(Task {
            id,
            name: name.to_string(),
            description: None,
            completed,
            project_id: None,
            created_at: Utc::now(),
            completed_at: completed.then(Utc::now),
            status,
            subtasks: Vec::new(),
        });
        id
    }

    /// Make the next `n` requests fail with a 500.
    pub fn fail_next_requests(&self, n: u32) {
        self.state.borrow_mut().fail_next = n;
    }

    pub fn request_count(&self) -> u32 {
        self.state.borrow().requests
    }

    /// Count a request and apply injected failures.
    fn begin(&self, path: &str) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        state.requests += 1;
        if state.fail_next > 0 {
            state.fail_next -= 1;
            return Err(ApiError::Status {
                method: "FAKE",
                path: path.to_string(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(())
    }

    /// Single-task responses carry no subtasks, like the real API.
    fn bare(task: &Task) -> Task {
        let mut task = task.clone();
        task.subtasks = Vec::new();
        task
    }
}

impl Gateway for FakeGateway {
    fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.begin("/tasks")?;
        let state = self.state.borrow();
        let tasks = state
            .tasks
            .iter()
            .map(|t| {
                let mut task = t.clone();
                task.subtasks = state.subtasks_of(t.id);
                task
            })
            .collect();
        Ok(tasks)
    }

    fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.begin("/projects")?;
        Ok(self.state.borrow().projects.clone())
    }

    fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        self.begin("/tasks")?;
        let mut state = self.state.borrow_mut();
        let id = state.next_task_id;
        state.next_task_id += 1;
        let task = Task {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            completed: false,
            project_id: draft.project_id,
            created_at: Utc::now(),
            completed_at: None,
            status: Status::Backlog,
            subtasks: Vec::new(),
        };
        state.tasks.push(task.clone());
        Ok(task)
    }

    fn update_task(&self, id: i64, draft: &TaskDraft) -> Result<Task, ApiError> {
        self.begin(&format!("/tasks/{id}"))?;
        let mut state = self.state.borrow_mut();
        let task = state.task_mut(id)?;
        task.name = draft.name.clone();
        task.description = draft.description.clone();
        task.project_id = draft.project_id;
        Ok(Self::bare(task))
    }

    fn toggle_task(&self, id: i64) -> Result<Task, ApiError> {
        self.begin(&format!("/tasks/{id}/toggle"))?;
        let mut state = self.state.borrow_mut();
        let task = state.task_mut(id)?;
        task.completed = !task.completed;
        if task.completed {
            task.status = Status::Done;
            task.completed_at = Some(Utc::now());
        } else {
            task.status = Status::Backlog;
            task.completed_at = None;
        }
        Ok(Self::bare(task))
    }

    fn change_status(&self, id: i64, status: Status) -> Result<Task, ApiError> {
        self.begin(&format!("/tasks/{id}/status"))?;
        let mut state = self.state.borrow_mut();
        let task = state.task_mut(id)?;
        task.status = status;
        if status == Status::Done {
            task.completed = true;
            if task.completed_at.is_none() {
                task.completed_at = Some(Utc::now());
            }
        } else {
            task.completed = false;
            task.completed_at = None;
        }
        Ok(Self::bare(task))
    }

    fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        self.begin(&format!("/tasks/{id}"))?;
        let mut state = self.state.borrow_mut();
        state.task_mut(id)?;
        state.tasks.retain(|t| t.id != id);
        state.subtasks.retain(|s| s.task_id != id);
        Ok(())
    }

    fn list_subtasks(&self, task_id: i64) -> Result<Vec<Subtask>, ApiError> {
        self.begin(&format!("/tasks/{task_id}/subtasks"))?;
        let mut state = self.state.borrow_mut();
        state.task_mut(task_id)?;
        Ok(state.subtasks_of(task_id))
    }

    fn add_subtask(&self, task_id: i64, name: &str) -> Result<Subtask, ApiError> {
        self.begin(&format!("/tasks/{task_id}/subtasks"))?;
        let mut state = self.state.borrow_mut();
        state.task_mut(task_id)?;
        let id = state.next_subtask_id;
        state.next_subtask_id += 1;
        let position = state
            .subtasks
            .iter()
            .filter(|s| s.task_id == task_id)
            .map(|s| s.position)
            .max()
            .unwrap_or(0)
            + 1;
        let subtask = Subtask {
            id,
            task_id,
            name: name.to_string(),
            completed: false,
            position,
            created_at: Utc::now(),
            completed_at: None,
        };
        state.subtasks.push(subtask.clone());
        state.cascade(task_id);
        Ok(subtask)
    }

    fn toggle_subtask(&self, task_id: i64, subtask_id: i64) -> Result<Subtask, ApiError> {
        self.begin(&format!("/tasks/{task_id}/subtasks/{subtask_id}/toggle"))?;
        let mut state = self.state.borrow_mut();
        state.task_mut(task_id)?;
        let subtask = state
            .subtasks
            .iter_mut()
            .find(|s| s.id == subtask_id && s.task_id == task_id)
            .ok_or(ApiError::Status {
                method: "FAKE",
                path: format!("/tasks/{task_id}/subtasks/{subtask_id}"),
                status: StatusCode::NOT_FOUND,
            })?;
        subtask.completed = !subtask.completed;
        subtask.completed_at = subtask.completed.then(Utc::now);
        let updated = subtask.clone();
        state.cascade(task_id);
        Ok(updated)
    }

    fn delete_subtask(&self, task_id: i64, subtask_id: i64) -> Result<(), ApiError> {
        self.begin(&format!("/tasks/{task_id}/subtasks/{subtask_id}"))?;
        let mut state = self.state.borrow_mut();
        state.task_mut(task_id)?;
        let before = state.subtasks.len();
        state
            .subtasks
            .retain(|s| !(s.id == subtask_id && s.task_id == task_id));
        if state.subtasks.len() == before {
            return Err(ApiError::Status {
                method: "FAKE",
                path: format!("/tasks/{task_id}/subtasks/{subtask_id}"),
                status: StatusCode::NOT_FOUND,
            });
        }
        state.cascade(task_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_moves_between_backlog_and_done() {
        let fake = FakeGateway::new();
        let id = fake.seed_task("Foo", Status::Doing);

        let toggled = fake.toggle_task(id).unwrap();
        assert!(toggled.completed);
        assert_eq!(toggled.status, Status::Done);
        assert!(toggled.completed_at.is_some());

        let back = fake.toggle_task(id).unwrap();
        assert!(!back.completed);
        assert_eq!(back.status, Status::Backlog);
        assert!(back.completed_at.is_none());
    }

    #[test]
    fn test_change_status_done_implies_completed() {
        let fake = FakeGateway::new();
        let id = fake.seed_task("Foo", Status::Backlog);

        let done = fake.change_status(id, Status::Done).unwrap();
        assert!(done.completed && done.completed_at.is_some());

        let out = fake.change_status(id, Status::Doing).unwrap();
        assert!(!out.completed && out.completed_at.is_none());
        assert_eq!(out.status, Status::Doing);
    }

    #[test]
    fn test_subtask_positions_ascend() {
        let fake = FakeGateway::new();
        let id = fake.seed_task("Foo", Status::Backlog);
        let a = fake.add_subtask(id, "a").unwrap();
        let b = fake.add_subtask(id, "b").unwrap();
        assert!(a.position < b.position);
    }

    #[test]
    fn test_cascade_completes_and_reverts_parent() {
        let fake = FakeGateway::new();
        let id = fake.seed_task("Foo", Status::Backlog);
        let a = fake.add_subtask(id, "a").unwrap();
        let b = fake.add_subtask(id, "b").unwrap();

        fake.toggle_subtask(id, a.id).unwrap();
        let tasks = fake.list_tasks().unwrap();
        assert_eq!(tasks[0].status, Status::Backlog);

        fake.toggle_subtask(id, b.id).unwrap();
        let tasks = fake.list_tasks().unwrap();
        assert_eq!(tasks[0].status, Status::Done);
        assert!(tasks[0].completed);

        // Un-completing one subtask reverts the parent
        fake.toggle_subtask(id, a.id).unwrap();
        let tasks = fake.list_tasks().unwrap();
        assert_eq!(tasks[0].status, Status::Backlog);
        assert!(!tasks[0].completed && tasks[0].completed_at.is_none());
    }

    #[test]
    fn test_deleting_last_incomplete_subtask_cascades() {
        let fake = FakeGateway::new();
        let id = fake.seed_task("Foo", Status::Backlog);
        let a = fake.add_subtask(id, "a").unwrap();
        let b = fake.add_subtask(id, "b").unwrap();
        fake.toggle_subtask(id, a.id).unwrap();

        fake.delete_subtask(id, b.id).unwrap();
        let tasks = fake.list_tasks().unwrap();
        assert_eq!(tasks[0].status, Status::Done);
    }

    #[test]
    fn test_second_delete_fails() {
        let fake = FakeGateway::new();
        let id = fake.seed_task("Foo", Status::Backlog);
        fake.delete_task(id).unwrap();
        assert!(fake.delete_task(id).is_err());
    }

    #[test]
    fn test_failure_injection() {
        let fake = FakeGateway::new();
        fake.seed_task("Foo", Status::Backlog);
        fake.fail_next_requests(1);
        assert!(fake.list_tasks().is_err());
        assert!(fake.list_tasks().is_ok());
    }
}
