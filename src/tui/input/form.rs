use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, FormField};

/// Keys while the new-task form is open
pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let project_count = app.store.projects.len();
    let Some(form) = &mut app.form else {
        return;
    };

    match key.code {
        KeyCode::Esc => app.close_new_task_form(),
        KeyCode::Tab | KeyCode::Down => {
            form.field = match form.field {
                FormField::Name => FormField::Description,
                FormField::Description => FormField::Project,
                FormField::Project => FormField::Name,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.field = match form.field {
                FormField::Name => FormField::Project,
                FormField::Description => FormField::Name,
                FormField::Project => FormField::Description,
            };
        }
        KeyCode::Enter => submit(app),
        KeyCode::Backspace => match form.field {
            FormField::Name => {
                form.name.pop();
            }
            FormField::Description => {
                form.description.pop();
            }
            FormField::Project => form.project_idx = None,
        },
        KeyCode::Left | KeyCode::Right if form.field == FormField::Project => {
            form.project_idx = cycle_project(
                form.project_idx,
                project_count,
                key.code == KeyCode::Right,
            );
        }
        KeyCode::Char(c) => match form.field {
            FormField::Name => form.name.push(c),
            FormField::Description => form.description.push(c),
            FormField::Project => {
                // j/k also cycle the picker
                if c == 'j' || c == 'l' {
                    form.project_idx = cycle_project(form.project_idx, project_count, true);
                } else if c == 'k' || c == 'h' {
                    form.project_idx = cycle_project(form.project_idx, project_count, false);
                }
            }
        },
        _ => {}
    }
}

/// Cycle the project picker: None ("Sin proyecto") sits before the first
/// project, wrapping at both ends.
pub(super) fn cycle_project(
    current: Option<usize>,
    count: usize,
    forward: bool,
) -> Option<usize> {
    if count == 0 {
        return None;
    }
    if forward {
        match current {
            None => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
        }
    } else {
        match current {
            None => Some(count - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        }
    }
}

/// Submit the form. A blank name is a no-op and keeps the form open; the
/// form clears only after the server accepted the task.
fn submit(app: &mut App) {
    let Some(form) = &app.form else {
        return;
    };
    let name = form.name.clone();
    let description = form.description.clone();
    let project_id = app.project_id_at(form.project_idx);

    let description = (!description.trim().is_empty()).then_some(description);
    if app
        .store
        .create_task(&name, description.as_deref(), project_id)
    {
        app.close_new_task_form();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_project_wraps_through_none() {
        // None → 0 → 1 → None → 0 ...
        assert_eq!(cycle_project(None, 2, true), Some(0));
        assert_eq!(cycle_project(Some(0), 2, true), Some(1));
        assert_eq!(cycle_project(Some(1), 2, true), None);

        assert_eq!(cycle_project(None, 2, false), Some(1));
        assert_eq!(cycle_project(Some(0), 2, false), None);
    }

    #[test]
    fn test_cycle_project_empty_picker() {
        assert_eq!(cycle_project(None, 0, true), None);
        assert_eq!(cycle_project(None, 0, false), None);
    }
}
