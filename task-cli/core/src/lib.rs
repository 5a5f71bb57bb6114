//! Task model and command interpreter for task-cli.
pub mod command;
pub mod task;

pub use command::{CommandError, Response, Tokens, execute, parse, respond};
pub use task::{InvalidTask, Task, TaskKind, TaskList};
