pub mod project;
pub mod subtask;
pub mod task;

pub use project::*;
pub use subtask::*;
pub use task::*;
