//! # `todo_file`
//!
//! A todo list kept in a single JSON file, with a small command-line front end.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod tasks;

pub use error::{Error, Result};
pub use tasks::{JsonTaskStore, SortKey, Task, TaskId, TaskStore};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
