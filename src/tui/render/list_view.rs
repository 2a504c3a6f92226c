use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::subtask;
use crate::tui::app::App;

use super::truncate;

/// Flat checkbox list over every task, in store order
pub fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = area.width.saturating_sub(4) as usize;
    let mut lines: Vec<Line> = Vec::new();

    for (idx, task) in app.store.tasks.iter().enumerate() {
        let selected = app.list_cursor == idx;
        let checkbox = if task.completed { "[x]" } else { "[ ]" };

        let name_style = if selected {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else if task.completed {
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.text)
        };
        let marker = if selected { "▸ " } else { "  " };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(theme.highlight)),
            Span::styled(format!("{checkbox} "), Style::default().fg(theme.dim)),
            Span::styled(truncate(&task.name, width / 2), name_style),
            Span::styled(
                format!("  {}", task.status.column_title()),
                Style::default().fg(theme.column_color(task.status)),
            ),
        ];
        if let Some(project) = app.project_name(task.project_id) {
            spans.push(Span::styled(
                format!("  ⦿ {project}"),
                Style::default().fg(theme.cyan),
            ));
        }
        if !task.subtasks.is_empty() {
            spans.push(Span::styled(
                format!("  {}", subtask::progress_label(&task.subtasks)),
                Style::default().fg(theme.dim),
            ));
        }
        lines.push(Line::from(spans));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Sin tareas",
            Style::default().fg(theme.dim),
        )));
    }

    let visible = area.height as usize;
    let scroll = app.list_cursor.saturating_sub(visible.saturating_sub(1)) as u16;

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
