use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::subtask;
use crate::model::{Subtask, Task};
use crate::tui::app::{AddState, App, EditField, EditState};

/// Fixed-width progress bar like `▰▰▰▱▱▱▱▱`
pub fn progress_bar(subtasks: &[Subtask], width: usize) -> String {
    let filled = subtask::progress_percent(subtasks) as usize * width / 100;
    let mut bar = String::new();
    for i in 0..width {
        bar.push(if i < filled { '▰' } else { '▱' });
    }
    bar
}

/// Checklist region of the edit panel: header with progress, the items,
/// and the add affordance.
pub fn render_checklist(frame: &mut Frame, app: &App, area: Rect, task: &Task, edit: &EditState) {
    let theme = &app.theme;
    let focused = edit.field == EditField::Subtasks;
    let mut lines: Vec<Line> = Vec::new();

    let header_style = if focused {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_bright)
    };
    let mut header = vec![Span::styled("Subtareas", header_style)];
    if !task.subtasks.is_empty() {
        let done = subtask::completed_count(&task.subtasks);
        header.push(Span::styled(
            format!("  {} ", progress_bar(&task.subtasks, 10)),
            Style::default().fg(if done == task.subtasks.len() {
                theme.green
            } else {
                theme.yellow
            }),
        ));
        header.push(Span::styled(
            subtask::progress_label(&task.subtasks),
            Style::default().fg(theme.dim),
        ));
    }
    lines.push(Line::from(header));

    for (idx, sub) in task.subtasks.iter().enumerate() {
        let checkbox = if sub.completed { "[x]" } else { "[ ]" };
        let selected = focused && edit.subtask_cursor == idx;
        let style = if selected {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
        } else if sub.completed {
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.text)
        };
        let marker = if selected { "▸ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.highlight)),
            Span::styled(format!("{checkbox} {}", sub.name), style),
        ]));
    }

    match &edit.add {
        AddState::Composing(draft) => {
            lines.push(Line::from(vec![
                Span::styled("  + ", Style::default().fg(theme.green)),
                Span::styled(draft.clone(), Style::default().fg(theme.text_bright)),
                Span::styled("▌", Style::default().fg(theme.highlight)),
            ]));
        }
        AddState::Idle => {
            if focused {
                lines.push(Line::from(Span::styled(
                    "  a añadir subtarea",
                    Style::default().fg(theme.dim),
                )));
            }
        }
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(done: usize, total: usize) -> Vec<Subtask> {
        (0..total)
            .map(|i| Subtask {
                id: i as i64 + 1,
                task_id: 1,
                name: format!("sub {i}"),
                completed: i < done,
                position: i as i32 + 1,
                created_at: chrono::Utc::now(),
                completed_at: (i < done).then(chrono::Utc::now),
            })
            .collect()
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(&subs(0, 0), 4), "▱▱▱▱");
        assert_eq!(progress_bar(&subs(1, 2), 4), "▰▰▱▱");
        assert_eq!(progress_bar(&subs(3, 3), 4), "▰▰▰▰");
        // Partial progress floors rather than rounds up to full
        assert_eq!(progress_bar(&subs(1, 3), 8), "▰▰▱▱▱▱▱▱");
    }
}
