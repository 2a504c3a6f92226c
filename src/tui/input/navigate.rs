use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode, View};

/// Keys while browsing the board or the list
pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => {
            app.view = match app.view {
                View::Board => View::List,
                View::List => View::Board,
            };
        }
        KeyCode::Char('r') => {
            app.store.load_tasks();
            app.store.load_projects();
        }
        KeyCode::Char('n') => app.open_new_task_form(),
        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),
        KeyCode::Left | KeyCode::Char('h') => {
            if app.view == View::Board
                && let Some(prev) = app.board_column.prev()
            {
                app.board_column = prev;
                app.clamp_cursors();
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.view == View::Board
                && let Some(next) = app.board_column.next()
            {
                app.board_column = next;
                app.clamp_cursors();
            }
        }
        KeyCode::Char(' ') => {
            if let Some(id) = app.selected_task().map(|t| t.id) {
                app.store.toggle_task(id);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected_task().map(|t| t.id) {
                app.store.delete_task(id);
                app.clamp_cursors();
            }
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.selected_task().map(|t| t.id) {
                app.open_edit(id);
            }
        }
        KeyCode::Char('m') => {
            // Pick up the card under the cursor; the current column is the
            // initial drop target.
            if app.view == View::Board
                && let Some(id) = app.selected_board_task().map(|t| t.id)
            {
                app.drag.pick_up(id);
                app.drag.enter_column(app.board_column);
                app.mode = Mode::Move;
            }
        }
        _ => {}
    }
}

/// Move the active cursor up or down
fn move_cursor(app: &mut App, direction: i32) {
    let (cursor, len) = match app.view {
        View::Board => (
            &mut app.board_cursor,
            app.store.tasks_with_status(app.board_column).len(),
        ),
        View::List => (&mut app.list_cursor, app.store.tasks.len()),
    };
    if len == 0 {
        return;
    }
    let new = (*cursor as i32 + direction).clamp(0, len as i32 - 1) as usize;
    *cursor = new;
}
