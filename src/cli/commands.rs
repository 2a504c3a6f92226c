use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("[>] tablero v", env!("CARGO_PKG_VERSION"), " - kanban desde la terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override the API base URL from the config
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks
    List(ListArgs),
    /// List projects
    Projects,
    /// Add a task
    Add(AddArgs),
    /// Toggle a task between done and backlog
    Toggle(IdArgs),
    /// Move a task to another column
    Mv(MvArgs),
    /// Delete a task
    Rm(IdArgs),
    /// Subtask operations
    Sub(SubCmd),
}

// ---------------------------------------------------------------------------
// Task command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (backlog, doing, done)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    pub name: String,
    /// Task description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Project id
    #[arg(short, long)]
    pub project: Option<i64>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id
    pub id: i64,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task id
    pub id: i64,
    /// Target status (backlog, doing, done)
    pub status: String,
}

// ---------------------------------------------------------------------------
// Subtask command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct SubCmd {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// List a task's subtasks
    List {
        /// Task id
        task_id: i64,
    },
    /// Add a subtask
    Add {
        /// Task id
        task_id: i64,
        /// Subtask name
        name: String,
    },
    /// Toggle a subtask; the server may cascade the parent's status
    Toggle {
        /// Task id
        task_id: i64,
        /// Subtask id
        subtask_id: i64,
    },
    /// Delete a subtask
    Rm {
        /// Task id
        task_id: i64,
        /// Subtask id
        subtask_id: i64,
    },
}
