pub mod board_view;
pub mod checklist;
pub mod edit_panel;
pub mod list_view;
pub mod status_row;
pub mod task_form;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, Mode, View};

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    if app.loading {
        let loading = Paragraph::new(Line::from(Span::styled(
            "Cargando...",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )))
        .centered();
        frame.render_widget(loading, chunks[1]);
    } else {
        match app.view {
            View::Board => board_view::render_board(frame, app, chunks[1]),
            View::List => list_view::render_list(frame, app, chunks[1]),
        }
    }

    // Overlays on top of the content
    if app.mode == Mode::NewTask {
        task_form::render_task_form(frame, app, chunks[1]);
    }
    if app.mode == Mode::Edit {
        edit_panel::render_edit_panel(frame, app, chunks[1]);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

/// Title bar with the view tabs
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let active = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(app.theme.dim).bg(bg);

    let (board_style, list_style) = match app.view {
        View::Board => (active, inactive),
        View::List => (inactive, active),
    };

    let line = Line::from(vec![
        Span::styled(
            " Tablero Kanban ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled("Tablero", board_style),
        Span::styled("  ", Style::default().bg(bg)),
        Span::styled("Lista", list_style),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}

/// Truncate to a display width, appending an ellipsis when cut
pub(super) fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    for c in text.chars() {
        if out.width() + 2 > max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

/// Centered overlay rectangle with the given percentage size
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
