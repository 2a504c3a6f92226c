use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField};

use super::centered_rect;
use super::edit_panel::{render_picker_field, render_text_field};

/// New-task form overlay
pub fn render_task_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };
    let theme = &app.theme;

    let panel = centered_rect(60, 50, area);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight))
        .title(Span::styled(
            " Nueva tarea ",
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    render_text_field(
        frame,
        theme,
        rows[0],
        "Nombre",
        &form.name,
        form.field == FormField::Name,
    );
    render_text_field(
        frame,
        theme,
        rows[1],
        "Descripción",
        &form.description,
        form.field == FormField::Description,
    );

    let project = app
        .project_name(app.project_id_at(form.project_idx))
        .unwrap_or("Sin proyecto");
    render_picker_field(
        frame,
        theme,
        rows[2],
        "Proyecto",
        project,
        form.field == FormField::Project,
    );

    let hints = Paragraph::new(Line::from(Span::styled(
        "Enter agregar  Tab campo  Esc cancelar",
        Style::default().fg(theme.dim),
    )))
    .style(Style::default().bg(theme.background));
    frame.render_widget(hints, rows[4]);
}
