use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::model::subtask;
use crate::model::{Status, Task};
use crate::tui::app::{App, Mode};

use super::truncate;

/// Three-column kanban board
pub fn render_board(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (i, status) in Status::ALL.iter().enumerate() {
        render_column(frame, app, columns[i], *status);
    }
}

fn render_column(frame: &mut Frame, app: &App, area: Rect, status: Status) {
    let tasks = app.column_tasks(status);
    let accent = app.theme.column_color(status);
    let is_target = app.drag.target() == Some(status);

    let border_style = if is_target {
        Style::default()
            .fg(app.theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent)
    };

    let title = format!(" {} ({}) ", status.column_title(), tasks.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let card_width = inner.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (idx, task) in tasks.iter().enumerate() {
        let selected = app.mode != Mode::Move
            && app.board_column == status
            && app.board_cursor == idx;
        card_lines(app, task, selected, card_width, &mut lines);
    }

    // Keep the cursor's card in view on tall columns
    let selected_line = if app.board_column == status {
        app.board_cursor * 5
    } else {
        0
    };
    let visible = inner.height as usize;
    let scroll = selected_line.saturating_sub(visible.saturating_sub(5)) as u16;

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(app.theme.background))
        .scroll((scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Push the lines for one card. Every card occupies five lines so cursor
/// positions map to scroll offsets without measuring.
fn card_lines(app: &App, task: &Task, selected: bool, width: usize, lines: &mut Vec<Line>) {
    let theme = &app.theme;
    let carried = app.drag.carried() == Some(task.id);

    let name_style = if carried {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else if selected {
        Style::default()
            .fg(theme.text_bright)
            .bg(theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let marker = if carried {
        "◆ "
    } else if selected {
        "▸ "
    } else {
        "  "
    };

    let mut name_spans = vec![
        Span::styled(marker, Style::default().fg(theme.highlight)),
        Span::styled(truncate(&task.name, width.saturating_sub(2)), name_style),
    ];
    if let Some(project) = app.project_name(task.project_id) {
        name_spans.push(Span::styled(
            format!("  ⦿ {project}"),
            Style::default().fg(theme.cyan),
        ));
    }
    lines.push(Line::from(name_spans));

    let description = task.description.as_deref().unwrap_or("");
    lines.push(Line::from(Span::styled(
        format!("  {}", truncate(description, width.saturating_sub(2))),
        Style::default().fg(theme.dim),
    )));

    if task.subtasks.is_empty() {
        lines.push(Line::from(""));
    } else {
        lines.push(subtask_summary(app, task));
    }

    let mut dates = format!("  {}", task.created_at.format("%d/%m/%Y"));
    if let Some(completed_at) = task.completed_at {
        dates.push_str(&format!("  ✓ {}", completed_at.format("%d/%m/%Y")));
    }
    lines.push(Line::from(Span::styled(
        dates,
        Style::default().fg(theme.dim),
    )));
    lines.push(Line::from(""));
}

/// Compact checklist progress line shown on the card face
fn subtask_summary(app: &App, task: &Task) -> Line<'static> {
    let theme = &app.theme;
    let done = subtask::completed_count(&task.subtasks);
    let total = task.subtasks.len();
    let bar = super::checklist::progress_bar(&task.subtasks, 8);
    let color = if done == total { theme.green } else { theme.yellow };
    Line::from(vec![
        Span::styled(format!("  {bar} "), Style::default().fg(color)),
        Span::styled(
            subtask::progress_label(&task.subtasks),
            Style::default().fg(theme.dim),
        ),
    ])
}
