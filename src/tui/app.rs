use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::HttpGateway;
use crate::config;
use crate::model::{Status, Task};
use crate::store::Store;

use super::drag::DragState;
use super::input;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Three-column kanban board
    Board,
    /// Flat checkbox list
    List,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// New-task form is open
    NewTask,
    /// Edit panel is open
    Edit,
    /// Carrying a card between columns
    Move,
}

/// Focusable field of the new-task form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Description,
    Project,
}

/// Transient draft state for the new-task form; cleared on submit or cancel
#[derive(Debug, Clone, Default)]
pub struct NewTaskForm {
    pub name: String,
    pub description: String,
    /// Index into `store.projects`; None = "Sin proyecto"
    pub project_idx: Option<usize>,
    pub field: FormField,
}

/// Checklist "add" affordance state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AddState {
    #[default]
    Idle,
    Composing(String),
}

/// Focusable region of the edit panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Description,
    Project,
    Subtasks,
}

/// Transient draft state for the edit panel, bound to one task
#[derive(Debug, Clone)]
pub struct EditState {
    pub task_id: i64,
    pub name: String,
    pub description: String,
    /// Index into `store.projects`; None = "Sin proyecto"
    pub project_idx: Option<usize>,
    pub field: EditField,
    pub subtask_cursor: usize,
    pub add: AddState,
}

/// Main application state: the durable store plus short-lived UI state
/// (cursors, drafts, the carry gesture) that never outlives the session.
pub struct App {
    pub store: Store,
    pub view: View,
    pub mode: Mode,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// Initial load in flight; shows the "Cargando..." placeholder
    pub loading: bool,
    pub board_column: Status,
    pub board_cursor: usize,
    pub list_cursor: usize,
    pub drag: DragState,
    pub form: Option<NewTaskForm>,
    pub edit: Option<EditState>,
}

impl App {
    pub fn new(store: Store, theme: Theme, show_key_hints: bool) -> Self {
        App {
            store,
            view: View::Board,
            mode: Mode::Navigate,
            theme,
            show_key_hints,
            should_quit: false,
            loading: false,
            board_column: Status::Backlog,
            board_cursor: 0,
            list_cursor: 0,
            drag: DragState::Idle,
            form: None,
            edit: None,
        }
    }

    /// Cards in one column, in store order
    pub fn column_tasks(&self, status: Status) -> Vec<&Task> {
        self.store.tasks_with_status(status)
    }

    /// The task under the board cursor
    pub fn selected_board_task(&self) -> Option<&Task> {
        self.column_tasks(self.board_column)
            .get(self.board_cursor)
            .copied()
    }

    /// The task under the list cursor
    pub fn selected_list_task(&self) -> Option<&Task> {
        self.store.tasks.get(self.list_cursor)
    }

    /// The task the current view has selected
    pub fn selected_task(&self) -> Option<&Task> {
        match self.view {
            View::Board => self.selected_board_task(),
            View::List => self.selected_list_task(),
        }
    }

    /// Resolve a project reference to its name for badges
    pub fn project_name(&self, project_id: Option<i64>) -> Option<&str> {
        let id = project_id?;
        self.store.project(id).map(|p| p.name.as_str())
    }

    /// Map a picker index back to a project id
    pub fn project_id_at(&self, idx: Option<usize>) -> Option<i64> {
        idx.and_then(|i| self.store.projects.get(i)).map(|p| p.id)
    }

    /// Keep cursors inside their collections after any state change
    pub fn clamp_cursors(&mut self) {
        let column_len = self.column_tasks(self.board_column).len();
        if self.board_cursor >= column_len {
            self.board_cursor = column_len.saturating_sub(1);
        }
        let list_len = self.store.tasks.len();
        if self.list_cursor >= list_len {
            self.list_cursor = list_len.saturating_sub(1);
        }
        if let Some(edit) = &mut self.edit {
            let subtask_len = self
                .store
                .tasks
                .iter()
                .find(|t| t.id == edit.task_id)
                .map_or(0, |t| t.subtasks.len());
            if edit.subtask_cursor >= subtask_len {
                edit.subtask_cursor = subtask_len.saturating_sub(1);
            }
        }
    }

    /// Open the edit panel for a task, seeding drafts from the store copy
    pub fn open_edit(&mut self, task_id: i64) {
        let Some(task) = self.store.task(task_id) else {
            return;
        };
        let project_idx = task
            .project_id
            .and_then(|id| self.store.projects.iter().position(|p| p.id == id));
        self.edit = Some(EditState {
            task_id,
            name: task.name.clone(),
            description: task.description.clone().unwrap_or_default(),
            project_idx,
            field: EditField::Name,
            subtask_cursor: 0,
            add: AddState::Idle,
        });
        self.mode = Mode::Edit;
    }

    /// Close the edit panel, discarding drafts
    pub fn close_edit(&mut self) {
        self.edit = None;
        self.mode = Mode::Navigate;
    }

    pub fn open_new_task_form(&mut self) {
        self.form = Some(NewTaskForm::default());
        self.mode = Mode::NewTask;
    }

    pub fn close_new_task_form(&mut self) {
        self.form = None;
        self.mode = Mode::Navigate;
    }
}

/// Run the TUI application
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_config()?;
    let gateway = HttpGateway::new(config.api.base_url.clone());
    let store = Store::new(Box::new(gateway));
    let theme = Theme::from_config(&config.ui);
    let mut app = App::new(store, theme, config.ui.show_key_hints);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initial load, with a placeholder frame while the requests block.
    // Tasks and projects are independent loads.
    app.loading = true;
    terminal.draw(|frame| render::render(frame, &mut app))?;
    app.store.load_tasks();
    app.store.load_projects();
    app.loading = false;

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.clamp_cursors();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
