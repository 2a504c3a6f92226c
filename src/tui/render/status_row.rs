use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode, View};

/// Bottom row: the store error takes precedence over key hints
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let line = if let Some(error) = &app.store.error {
        Line::from(Span::styled(
            format!(" {error}"),
            Style::default()
                .fg(theme.red)
                .add_modifier(Modifier::BOLD),
        ))
    } else if app.show_key_hints {
        Line::from(Span::styled(
            format!(" {}", hints(app)),
            Style::default().fg(theme.dim),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.background)),
        area,
    );
}

fn hints(app: &App) -> &'static str {
    match app.mode {
        Mode::Navigate => match app.view {
            View::Board => {
                "n nueva  e editar  espacio completar  m mover  d eliminar  tab lista  r recargar  q salir"
            }
            View::List => {
                "n nueva  e editar  espacio completar  d eliminar  tab tablero  r recargar  q salir"
            }
        },
        Mode::NewTask | Mode::Edit => "enter confirmar  tab campo  esc cancelar",
        Mode::Move => "h/l columna  enter soltar  esc cancelar",
    }
}
