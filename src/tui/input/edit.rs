use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{AddState, App, EditField};

use super::form::cycle_project;

/// Keys while the edit panel is open
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let composing = app
        .edit
        .as_ref()
        .is_some_and(|e| matches!(e.add, AddState::Composing(_)));
    if composing {
        handle_compose(app, key);
        return;
    }

    let project_count = app.store.projects.len();
    let Some(edit) = &mut app.edit else {
        return;
    };

    match key.code {
        // Closing discards drafts; a failed save keeps the panel open so
        // the drafts survive for a retry.
        KeyCode::Esc => app.close_edit(),
        KeyCode::Tab | KeyCode::Down if edit.field != EditField::Subtasks => {
            edit.field = match edit.field {
                EditField::Name => EditField::Description,
                EditField::Description => EditField::Project,
                EditField::Project => EditField::Subtasks,
                EditField::Subtasks => EditField::Name,
            };
        }
        KeyCode::Tab if edit.field == EditField::Subtasks => edit.field = EditField::Name,
        KeyCode::BackTab => {
            edit.field = match edit.field {
                EditField::Name => EditField::Subtasks,
                EditField::Description => EditField::Name,
                EditField::Project => EditField::Description,
                EditField::Subtasks => EditField::Project,
            };
        }
        KeyCode::Enter if edit.field != EditField::Subtasks => save(app),
        KeyCode::Backspace => match edit.field {
            EditField::Name => {
                edit.name.pop();
            }
            EditField::Description => {
                edit.description.pop();
            }
            EditField::Project => edit.project_idx = None,
            EditField::Subtasks => {}
        },
        KeyCode::Left | KeyCode::Right if edit.field == EditField::Project => {
            edit.project_idx = cycle_project(
                edit.project_idx,
                project_count,
                key.code == KeyCode::Right,
            );
        }
        _ if edit.field == EditField::Subtasks => handle_subtasks(app, key),
        KeyCode::Char(c) => match edit.field {
            EditField::Name => edit.name.push(c),
            EditField::Description => edit.description.push(c),
            EditField::Project => {
                if c == 'j' || c == 'l' {
                    edit.project_idx = cycle_project(edit.project_idx, project_count, true);
                } else if c == 'k' || c == 'h' {
                    edit.project_idx = cycle_project(edit.project_idx, project_count, false);
                }
            }
            EditField::Subtasks => {}
        },
        _ => {}
    }
}

/// Keys inside the checklist region
fn handle_subtasks(app: &mut App, key: KeyEvent) {
    let Some(edit) = &app.edit else {
        return;
    };
    let task_id = edit.task_id;
    let cursor = edit.subtask_cursor;
    let subtask_ids: Vec<i64> = app
        .store
        .task(task_id)
        .map(|t| t.subtasks.iter().map(|s| s.id).collect())
        .unwrap_or_default();

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(edit) = &mut app.edit {
                edit.subtask_cursor = cursor.saturating_sub(1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(edit) = &mut app.edit
                && cursor + 1 < subtask_ids.len()
            {
                edit.subtask_cursor = cursor + 1;
            }
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(&id) = subtask_ids.get(cursor) {
                app.store.toggle_subtask(task_id, id);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(&id) = subtask_ids.get(cursor) {
                app.store.delete_subtask(task_id, id);
                app.clamp_cursors();
            }
        }
        KeyCode::Char('a') => {
            if let Some(edit) = &mut app.edit {
                edit.add = AddState::Composing(String::new());
            }
        }
        _ => {}
    }
}

/// Keys while composing a new subtask name
fn handle_compose(app: &mut App, key: KeyEvent) {
    let Some(edit) = &mut app.edit else {
        return;
    };
    let AddState::Composing(draft) = &mut edit.add else {
        return;
    };

    match key.code {
        // Confirm emits only a non-empty trimmed name; an empty draft keeps
        // composing, mirroring the disabled confirm affordance.
        KeyCode::Enter => {
            let name = draft.trim().to_string();
            if !name.is_empty() {
                let task_id = edit.task_id;
                edit.add = AddState::Idle;
                app.store.add_subtask(task_id, &name);
            }
        }
        KeyCode::Esc => edit.add = AddState::Idle,
        KeyCode::Backspace => {
            draft.pop();
        }
        KeyCode::Char(c) => draft.push(c),
        _ => {}
    }
}

/// Submit the edit form; the panel closes only when the server accepted it.
fn save(app: &mut App) {
    let Some(edit) = &app.edit else {
        return;
    };
    let task_id = edit.task_id;
    let name = edit.name.clone();
    let description = edit.description.clone();
    let project_id = app.project_id_at(edit.project_idx);

    let description = (!description.trim().is_empty()).then_some(description);
    if app
        .store
        .save_task_edit(task_id, &name, description.as_deref(), project_id)
    {
        app.close_edit();
    }
}
