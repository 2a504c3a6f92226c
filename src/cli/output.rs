use serde::Serialize;

use crate::model::{Project, Status, Subtask, Task, subtask};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: i64,
    pub name: String,
    pub status: Status,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<SubtaskJson>,
}

#[derive(Serialize)]
pub struct SubtaskJson {
    pub id: i64,
    pub name: String,
    pub completed: bool,
    pub position: i32,
}

#[derive(Serialize)]
pub struct ProjectJson {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        name: task.name.clone(),
        status: task.status,
        completed: task.completed,
        description: task.description.clone(),
        project_id: task.project_id,
        created_at: task.created_at.to_rfc3339(),
        completed_at: task.completed_at.map(|t| t.to_rfc3339()),
        subtasks: task.subtasks.iter().map(subtask_to_json).collect(),
    }
}

pub fn subtask_to_json(sub: &Subtask) -> SubtaskJson {
    SubtaskJson {
        id: sub.id,
        name: sub.name.clone(),
        completed: sub.completed,
        position: sub.position,
    }
}

pub fn project_to_json(project: &Project) -> ProjectJson {
    ProjectJson {
        id: project.id,
        name: project.name.clone(),
        description: project.description.clone(),
        color: project.color.clone(),
    }
}

// ---------------------------------------------------------------------------
// Human output
// ---------------------------------------------------------------------------

pub fn print_task_line(task: &Task) {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{checkbox} #{} {} ({})", task.id, task.name, task.status);
    if let Some(project_id) = task.project_id {
        line.push_str(&format!(" p{project_id}"));
    }
    if !task.subtasks.is_empty() {
        line.push_str(&format!("  {}", subtask::progress_label(&task.subtasks)));
    }
    println!("{line}");
}

pub fn print_task_detail(task: &Task) {
    print_task_line(task);
    if let Some(description) = &task.description {
        println!("    {description}");
    }
    for sub in &task.subtasks {
        print_subtask_line(sub);
    }
}

pub fn print_subtask_line(sub: &Subtask) {
    let checkbox = if sub.completed { "[x]" } else { "[ ]" };
    println!("    {checkbox} #{} {}", sub.id, sub.name);
}

pub fn print_project_line(project: &Project) {
    let mut line = format!("#{} {}", project.id, project.name);
    if let Some(description) = &project.description {
        line.push_str(&format!(" - {description}"));
    }
    println!("{line}");
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
