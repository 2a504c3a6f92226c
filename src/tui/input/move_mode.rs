use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

/// Keys while carrying a card. The gesture only retargets columns; the
/// store is touched exactly once, on drop.
pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            if let Some(prev) = app.drag.target().and_then(|c| c.prev()) {
                app.drag.enter_column(prev);
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if let Some(next) = app.drag.target().and_then(|c| c.next()) {
                app.drag.enter_column(next);
            }
        }
        KeyCode::Enter | KeyCode::Char('m') => {
            // Fire-and-forget: the carry state clears no matter how the
            // status change turns out; the store reports its own failure.
            if let Some((task_id, column)) = app.drag.drop_card()
                && app.store.change_status(task_id, column)
            {
                // Follow the card into its new column
                app.board_column = column;
                let pos = app
                    .column_tasks(column)
                    .iter()
                    .position(|t| t.id == task_id);
                if let Some(pos) = pos {
                    app.board_cursor = pos;
                }
            }
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            app.drag.cancel();
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
