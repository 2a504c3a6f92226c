use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::{App, EditField};
use crate::tui::theme::Theme;

use super::{centered_rect, checklist};

/// Edit panel overlay: the three fields plus the subtask checklist
pub fn render_edit_panel(frame: &mut Frame, app: &App, area: Rect) {
    let Some(edit) = &app.edit else {
        return;
    };
    let Some(task) = app.store.task(edit.task_id) else {
        return;
    };
    let theme = &app.theme;

    let panel = centered_rect(70, 80, area);
    frame.render_widget(Clear, panel);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight))
        .title(Span::styled(
            " Editar tarea ",
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
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    render_text_field(
        frame,
        theme,
        rows[0],
        "Nombre",
        &edit.name,
        edit.field == EditField::Name,
    );
    render_text_field(
        frame,
        theme,
        rows[1],
        "Descripción",
        &edit.description,
        edit.field == EditField::Description,
    );

    let project = app
        .project_name(app.project_id_at(edit.project_idx))
        .unwrap_or("Sin proyecto");
    render_picker_field(
        frame,
        theme,
        rows[2],
        "Proyecto",
        project,
        edit.field == EditField::Project,
    );

    checklist::render_checklist(frame, app, rows[3], task, edit);

    let hints = Paragraph::new(Line::from(Span::styled(
        "Enter guardar  Tab campo  Esc cancelar",
        Style::default().fg(theme.dim),
    )))
    .style(Style::default().bg(theme.background));
    frame.render_widget(hints, rows[4]);
}

/// Label plus editable value; the focused field shows a block cursor
pub(super) fn render_text_field(
    frame: &mut Frame,
    theme: &Theme,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
) {
    let label_style = if focused {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let mut spans = vec![
        Span::styled(format!("{label}: "), label_style),
        Span::styled(value.to_string(), Style::default().fg(theme.text_bright)),
    ];
    if focused {
        spans.push(Span::styled("▌", Style::default().fg(theme.highlight)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.background)),
        area,
    );
}

/// Label plus a cycling picker value
pub(super) fn render_picker_field(
    frame: &mut Frame,
    theme: &Theme,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
) {
    let label_style = if focused {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let value_span = if focused {
        Span::styled(
            format!("◂ {value} ▸"),
            Style::default().fg(theme.text_bright),
        )
    } else {
        Span::styled(value.to_string(), Style::default().fg(theme.text))
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{label}: "), label_style),
            value_span,
        ]))
        .style(Style::default().bg(theme.background)),
        area,
    );
}
