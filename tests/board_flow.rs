//! End-to-end flows driving the app through key events against the
//! in-memory gateway.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use tablero::api::fake::FakeGateway;
use tablero::model::Status;
use tablero::store::{self, Store};
use tablero::tui::app::{App, Mode, View};
use tablero::tui::input::handle_key;
use tablero::tui::render;
use tablero::tui::theme::Theme;

fn app_with_fake() -> (App, FakeGateway) {
    let fake = FakeGateway::new();
    let store = Store::new(Box::new(fake.clone()));
    (App::new(store, Theme::default(), true), fake)
}

fn key(app: &mut App, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        key(app, KeyCode::Char(c));
    }
}

// ---------------------------------------------------------------------------
// New-task form
// ---------------------------------------------------------------------------

#[test]
fn test_create_task_through_form() {
    let (mut app, _fake) = app_with_fake();
    app.store.load_tasks();

    key(&mut app, KeyCode::Char('n'));
    assert_eq!(app.mode, Mode::NewTask);
    type_text(&mut app, "Comprar pan");
    key(&mut app, KeyCode::Tab);
    type_text(&mut app, "en la esquina");
    key(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, Mode::Navigate);
    assert!(app.form.is_none());
    let backlog = app.column_tasks(Status::Backlog);
    assert_eq!(backlog.len(), 1);
    assert_eq!(backlog[0].name, "Comprar pan");
    assert_eq!(backlog[0].description.as_deref(), Some("en la esquina"));
}

#[test]
fn test_blank_form_submit_keeps_form_open() {
    let (mut app, fake) = app_with_fake();
    app.store.load_tasks();
    let before = fake.request_count();

    key(&mut app, KeyCode::Char('n'));
    key(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::NewTask, "empty name keeps the form open");
    assert_eq!(fake.request_count(), before);

    key(&mut app, KeyCode::Esc);
    assert_eq!(app.mode, Mode::Navigate);
}

#[test]
fn test_failed_create_keeps_form_and_sets_error() {
    let (mut app, fake) = app_with_fake();
    app.store.load_tasks();

    key(&mut app, KeyCode::Char('n'));
    type_text(&mut app, "Foo");
    fake.fail_next_requests(1);
    key(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, Mode::NewTask, "drafts survive for a retry");
    assert_eq!(app.store.error.as_deref(), Some(store::CREATE_ERROR));
}

// ---------------------------------------------------------------------------
// Carrying a card between columns
// ---------------------------------------------------------------------------

#[test]
fn test_move_card_to_next_column() {
    let (mut app, fake) = app_with_fake();
    let id = fake.seed_task("Uno", Status::Backlog);
    fake.seed_task("Dos", Status::Backlog);
    app.store.load_tasks();

    key(&mut app, KeyCode::Char('m'));
    assert_eq!(app.mode, Mode::Move);
    key(&mut app, KeyCode::Char('l'));
    key(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, Mode::Navigate);
    assert_eq!(app.store.task(id).unwrap().status, Status::Doing);
    // The cursor follows the card into its new column
    assert_eq!(app.board_column, Status::Doing);
    assert_eq!(app.board_cursor, 0);
    assert_eq!(app.column_tasks(Status::Backlog).len(), 1);
}

#[test]
fn test_cancelled_move_changes_nothing() {
    let (mut app, fake) = app_with_fake();
    let id = fake.seed_task("Uno", Status::Backlog);
    app.store.load_tasks();
    let requests = fake.request_count();

    key(&mut app, KeyCode::Char('m'));
    key(&mut app, KeyCode::Char('l'));
    key(&mut app, KeyCode::Esc);

    assert_eq!(app.mode, Mode::Navigate);
    assert_eq!(app.store.task(id).unwrap().status, Status::Backlog);
    assert_eq!(fake.request_count(), requests, "cancel issues no request");
}

#[test]
fn test_failed_drop_leaves_card_in_place() {
    let (mut app, fake) = app_with_fake();
    let id = fake.seed_task("Uno", Status::Backlog);
    app.store.load_tasks();

    key(&mut app, KeyCode::Char('m'));
    key(&mut app, KeyCode::Char('l'));
    fake.fail_next_requests(1);
    key(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, Mode::Navigate, "the carry clears regardless");
    assert_eq!(app.store.task(id).unwrap().status, Status::Backlog);
    assert_eq!(app.board_column, Status::Backlog);
    assert_eq!(app.store.error.as_deref(), Some(store::STATUS_ERROR));
}

#[test]
fn test_drop_on_same_column_is_a_request_too() {
    let (mut app, fake) = app_with_fake();
    let id = fake.seed_task("Uno", Status::Doing);
    app.store.load_tasks();
    app.board_column = Status::Doing;
    let requests = fake.request_count();

    key(&mut app, KeyCode::Char('m'));
    key(&mut app, KeyCode::Enter);

    assert_eq!(app.store.task(id).unwrap().status, Status::Doing);
    assert_eq!(fake.request_count(), requests + 1);
}

// ---------------------------------------------------------------------------
// Edit panel and checklist cascade
// ---------------------------------------------------------------------------

#[test]
fn test_checklist_cascade_moves_card_to_done() {
    let (mut app, fake) = app_with_fake();
    let id = fake.seed_task("Proyecto", Status::Backlog);
    app.store.load_tasks();

    key(&mut app, KeyCode::Char('e'));
    assert_eq!(app.mode, Mode::Edit);

    // Into the checklist region: Name → Description → Project → Subtasks
    key(&mut app, KeyCode::Tab);
    key(&mut app, KeyCode::Tab);
    key(&mut app, KeyCode::Tab);

    key(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "uno");
    key(&mut app, KeyCode::Enter);
    key(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "dos");
    key(&mut app, KeyCode::Enter);
    assert_eq!(app.store.task(id).unwrap().subtasks.len(), 2);

    // Completing one of two leaves the parent in backlog
    key(&mut app, KeyCode::Char(' '));
    assert_eq!(app.store.task(id).unwrap().status, Status::Backlog);

    // Completing the second cascades the parent to done
    key(&mut app, KeyCode::Char('j'));
    key(&mut app, KeyCode::Char(' '));
    let task = app.store.task(id).unwrap();
    assert_eq!(task.status, Status::Done);
    assert!(task.completed && task.completed_at.is_some());

    key(&mut app, KeyCode::Esc);
    assert_eq!(app.mode, Mode::Navigate);
    assert_eq!(app.column_tasks(Status::Done).len(), 1);
}

#[test]
fn test_unchecking_subtask_reverts_parent() {
    let (mut app, fake) = app_with_fake();
    let id = fake.seed_task("Proyecto", Status::Backlog);
    app.store.load_tasks();
    app.store.add_subtask(id, "uno");
    let sub = app.store.task(id).unwrap().subtasks[0].id;
    app.store.toggle_subtask(id, sub);
    assert_eq!(app.store.task(id).unwrap().status, Status::Done);

    key(&mut app, KeyCode::Char('e'));
    key(&mut app, KeyCode::Tab);
    key(&mut app, KeyCode::Tab);
    key(&mut app, KeyCode::Tab);
    key(&mut app, KeyCode::Char(' '));

    let task = app.store.task(id).unwrap();
    assert_eq!(task.status, Status::Backlog);
    assert!(!task.completed && task.completed_at.is_none());
}

#[test]
fn test_edit_save_updates_task() {
    let (mut app, fake) = app_with_fake();
    let id = fake.seed_task("Viejo", Status::Backlog);
    fake.seed_project("Casa");
    app.store.load_tasks();
    app.store.load_projects();

    key(&mut app, KeyCode::Char('e'));
    // Clear the seeded name draft, then retype
    for _ in 0.."Viejo".len() {
        key(&mut app, KeyCode::Backspace);
    }
    type_text(&mut app, "Nuevo");
    key(&mut app, KeyCode::Tab);
    key(&mut app, KeyCode::Tab);
    key(&mut app, KeyCode::Right);
    key(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, Mode::Navigate);
    let task = app.store.task(id).unwrap();
    assert_eq!(task.name, "Nuevo");
    assert_eq!(task.project_id, Some(1));
}

#[test]
fn test_failed_edit_save_keeps_panel_open() {
    let (mut app, fake) = app_with_fake();
    fake.seed_task("Foo", Status::Backlog);
    app.store.load_tasks();

    key(&mut app, KeyCode::Char('e'));
    type_text(&mut app, "!");
    fake.fail_next_requests(1);
    key(&mut app, KeyCode::Enter);

    assert_eq!(app.mode, Mode::Edit);
    assert_eq!(app.edit.as_ref().unwrap().name, "Foo!");
    assert_eq!(app.store.error.as_deref(), Some(store::UPDATE_ERROR));
}

#[test]
fn test_escape_while_composing_only_leaves_compose() {
    let (mut app, fake) = app_with_fake();
    fake.seed_task("Foo", Status::Backlog);
    app.store.load_tasks();

    key(&mut app, KeyCode::Char('e'));
    key(&mut app, KeyCode::Tab);
    key(&mut app, KeyCode::Tab);
    key(&mut app, KeyCode::Tab);
    key(&mut app, KeyCode::Char('a'));
    type_text(&mut app, "borrador");

    key(&mut app, KeyCode::Esc);
    assert_eq!(app.mode, Mode::Edit, "first escape closes the compose row");
    key(&mut app, KeyCode::Esc);
    assert_eq!(app.mode, Mode::Navigate);
}

// ---------------------------------------------------------------------------
// List view
// ---------------------------------------------------------------------------

#[test]
fn test_toggle_from_list_view() {
    let (mut app, fake) = app_with_fake();
    fake.seed_task("Uno", Status::Backlog);
    let id = fake.seed_task("Dos", Status::Doing);
    app.store.load_tasks();

    key(&mut app, KeyCode::Tab);
    assert_eq!(app.view, View::List);
    key(&mut app, KeyCode::Char('j'));
    key(&mut app, KeyCode::Char(' '));

    let task = app.store.task(id).unwrap();
    assert!(task.completed);
    assert_eq!(task.status, Status::Done);
}

#[test]
fn test_delete_clamps_cursor() {
    let (mut app, fake) = app_with_fake();
    fake.seed_task("Uno", Status::Backlog);
    fake.seed_task("Dos", Status::Backlog);
    app.store.load_tasks();

    key(&mut app, KeyCode::Char('j'));
    key(&mut app, KeyCode::Char('d'));
    assert_eq!(app.store.tasks.len(), 1);
    assert_eq!(app.board_cursor, 0);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(app: &mut App) -> String {
    let backend = TestBackend::new(120, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render::render(frame, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer.cell((x, y)).unwrap().symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_board_shows_columns_counts_and_progress() {
    let (mut app, fake) = app_with_fake();
    let id = fake.seed_task("Escribir informe", Status::Doing);
    fake.seed_task("Otra", Status::Backlog);
    app.store.load_tasks();
    app.store.add_subtask(id, "uno");
    app.store.add_subtask(id, "dos");
    app.store.add_subtask(id, "tres");
    let sub = app.store.task(id).unwrap().subtasks[0].id;
    app.store.toggle_subtask(id, sub);

    // Adding an incomplete subtask cascades the parent back to backlog,
    // so both tasks end up in the first column.
    assert_eq!(app.store.task(id).unwrap().status, Status::Backlog);

    let text = draw(&mut app);
    assert!(text.contains("Backlog (2)"));
    assert!(text.contains("En Progreso (0)"));
    assert!(text.contains("Completado (0)"));
    assert!(text.contains("Escribir informe"));
    assert!(text.contains("1/3 completadas"));
}

#[test]
fn test_error_message_reaches_status_row() {
    let (mut app, fake) = app_with_fake();
    fake.fail_next_requests(1);
    app.store.load_tasks();

    let text = draw(&mut app);
    assert!(text.contains(store::LOAD_ERROR));
}

#[test]
fn test_loading_placeholder() {
    let (mut app, _fake) = app_with_fake();
    app.loading = true;
    let text = draw(&mut app);
    assert!(text.contains("Cargando..."));
}

#[test]
fn test_edit_panel_renders_checklist_header() {
    let (mut app, fake) = app_with_fake();
    let id = fake.seed_task("Foo", Status::Backlog);
    app.store.load_tasks();
    app.store.add_subtask(id, "uno");
    key(&mut app, KeyCode::Char('e'));

    let text = draw(&mut app);
    assert!(text.contains("Editar tarea"));
    assert!(text.contains("Subtareas"));
    assert!(text.contains("0/1 completadas"));
    assert!(text.contains("uno"));
}
