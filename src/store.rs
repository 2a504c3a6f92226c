use tracing::{debug, warn};

use crate::api::{ApiError, Gateway, TaskDraft};
use crate::model::{Project, Status, Task};

// User-facing messages, verbatim from the UI copy
pub const LOAD_ERROR: &str =
    "No se pudo conectar con el servidor. Asegura que el backend esta corriendo.";
pub const CREATE_ERROR: &str = "Error al crear la tarea";
pub const UPDATE_ERROR: &str = "Error al actualizar la tarea";
pub const STATUS_ERROR: &str = "Error al cambiar el estado de la tarea";
pub const DELETE_ERROR: &str = "Error al eliminar la tarea";
pub const SUBTASK_ADD_ERROR: &str = "Error al crear la subtarea";
pub const SUBTASK_UPDATE_ERROR: &str = "Error al actualizar la subtarea";
pub const SUBTASK_DELETE_ERROR: &str = "Error al eliminar la subtarea";

/// Single source of truth for tasks and projects. Every mutation goes
/// through the gateway and reconciles the authoritative response back in;
/// nothing is applied optimistically, so a failed call leaves the
/// pre-operation snapshot intact.
pub struct Store {
    gateway: Box<dyn Gateway>,
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    /// Most recent error message, if any. At most one at a time.
    pub error: Option<String>,
    /// Whether the first task load ever succeeded
    pub loaded: bool,
}

impl Store {
    pub fn new(gateway: Box<dyn Gateway>) -> Self {
        Store {
            gateway,
            tasks: Vec::new(),
            projects: Vec::new(),
            error: None,
            loaded: false,
        }
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn project(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Tasks in one board column, a pure partition by status.
    pub fn tasks_with_status(&self, status: Status) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    // -----------------------------------------------------------------------
    // Loads
    // -----------------------------------------------------------------------

    /// Fetch the full task collection. Success replaces local state wholesale
    /// and clears any prior error; failure keeps whatever was loaded before
    /// (stale-but-visible beats blank, except on a first load which stays
    /// empty).
    pub fn load_tasks(&mut self) {
        match self.gateway.list_tasks() {
            Ok(tasks) => {
                debug!(count = tasks.len(), "tasks loaded");
                self.tasks = tasks;
                self.loaded = true;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "task load failed");
                self.error = Some(LOAD_ERROR.to_string());
            }
        }
    }

    /// Fetch projects. Independent of `load_tasks`; failure is logged and
    /// otherwise silent, the picker just stays empty.
    pub fn load_projects(&mut self) {
        match self.gateway.list_projects() {
            Ok(projects) => self.projects = projects,
            Err(e) => warn!(error = %e, "project load failed"),
        }
    }

    // -----------------------------------------------------------------------
    // Task mutations
    // -----------------------------------------------------------------------

    /// Create a task. A blank or whitespace-only name is a no-op: the
    /// gateway is not called and nothing changes. Returns true on success.
    pub fn create_task(
        &mut self,
        name: &str,
        description: Option<&str>,
        project_id: Option<i64>,
    ) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let draft = TaskDraft {
            name: name.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
            project_id,
        };
        match self.gateway.create_task(&draft) {
            Ok(task) => {
                self.tasks.push(task);
                true
            }
            Err(e) => {
                warn!(error = %e, "create failed");
                self.error = Some(CREATE_ERROR.to_string());
                false
            }
        }
    }

    /// Flip one task's completion flag.
    pub fn toggle_task(&mut self, id: i64) -> bool {
        match self.gateway.toggle_task(id) {
            Ok(task) => {
                self.replace_task(task);
                true
            }
            Err(e) => {
                warn!(error = %e, id, "toggle failed");
                self.error = Some(UPDATE_ERROR.to_string());
                false
            }
        }
    }

    /// Move a task to another column. The view shows no movement until the
    /// server answers; on failure the task stays in its prior column.
    pub fn change_status(&mut self, id: i64, status: Status) -> bool {
        match self.gateway.change_status(id, status) {
            Ok(task) => {
                self.replace_task(task);
                true
            }
            Err(e) => {
                warn!(error = %e, id, "status change failed");
                self.error = Some(STATUS_ERROR.to_string());
                false
            }
        }
    }

    pub fn delete_task(&mut self, id: i64) -> bool {
        match self.gateway.delete_task(id) {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                true
            }
            Err(e) => {
                warn!(error = %e, id, "delete failed");
                self.error = Some(DELETE_ERROR.to_string());
                false
            }
        }
    }

    /// Full-field edit from the panel. Trims the name and refuses to call
    /// the gateway when it ends up empty. The caller keeps the panel open
    /// when this returns false, so a failed save can be retried.
    pub fn save_task_edit(
        &mut self,
        id: i64,
        name: &str,
        description: Option<&str>,
        project_id: Option<i64>,
    ) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let draft = TaskDraft {
            name: name.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
            project_id,
        };
        match self.gateway.update_task(id, &draft) {
            Ok(task) => {
                self.replace_task(task);
                true
            }
            Err(e) => {
                warn!(error = %e, id, "edit save failed");
                self.error = Some(UPDATE_ERROR.to_string());
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Subtask mutations
    // -----------------------------------------------------------------------
    //
    // The parent's auto-completion lives server-side. After each call the
    // store re-fetches both the task collection (to observe the cascade on
    // the parent) and the task's subtask list (server-assigned ids and
    // positions) instead of guessing locally.

    pub fn add_subtask(&mut self, task_id: i64, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let result = self
            .gateway
            .add_subtask(task_id, name)
            .and_then(|_| self.resync_after_subtask_change(task_id));
        self.finish_subtask_op(result, SUBTASK_ADD_ERROR)
    }

    pub fn toggle_subtask(&mut self, task_id: i64, subtask_id: i64) -> bool {
        let result = self
            .gateway
            .toggle_subtask(task_id, subtask_id)
            .and_then(|_| self.resync_after_subtask_change(task_id));
        self.finish_subtask_op(result, SUBTASK_UPDATE_ERROR)
    }

    pub fn delete_subtask(&mut self, task_id: i64, subtask_id: i64) -> bool {
        let result = self
            .gateway
            .delete_subtask(task_id, subtask_id)
            .and_then(|_| self.resync_after_subtask_change(task_id));
        self.finish_subtask_op(result, SUBTASK_DELETE_ERROR)
    }

    fn finish_subtask_op(&mut self, result: Result<(), ApiError>, message: &str) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "subtask operation failed");
                self.error = Some(message.to_string());
                false
            }
        }
    }

    fn resync_after_subtask_change(&mut self, task_id: i64) -> Result<(), ApiError> {
        let fresh = self.gateway.list_tasks()?;
        let subtasks = self.gateway.list_subtasks(task_id)?;
        self.adopt_tasks(fresh);
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.subtasks = subtasks;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reconciliation helpers
    // -----------------------------------------------------------------------

    /// Replace one task entry with the server's representation. Single-task
    /// payloads carry no subtasks; the previously known checklist is kept in
    /// that case so board cards don't lose their progress display.
    fn replace_task(&mut self, updated: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            let mut updated = updated;
            if updated.subtasks.is_empty() {
                updated.subtasks = std::mem::take(&mut slot.subtasks);
            }
            *slot = updated;
        } else {
            self.tasks.push(updated);
        }
    }

    /// Wholesale replacement with the same empty-checklist preservation rule
    /// applied per entry.
    fn adopt_tasks(&mut self, fresh: Vec<Task>) {
        let old = std::mem::replace(&mut self.tasks, fresh);
        for task in &mut self.tasks {
            if task.subtasks.is_empty()
                && let Some(prev) = old.iter().find(|t| t.id == task.id)
                && !prev.subtasks.is_empty()
            {
                task.subtasks = prev.subtasks.clone();
            }
        }
    }
}
