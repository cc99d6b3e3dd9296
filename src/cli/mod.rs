//! Command-line interface for the todo tracker.
//!
//! The binary parses a [`Cli`] and hands it to [`run`], which resolves the
//! store file, performs one store operation and returns what to print.

mod run;


pub use run::{run, run_with_store, CliOutput};

use crate::config::TODO_FILE_ENV;
use crate::tasks::TaskId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Todo tracker - keeps your todos in a JSON file.
///
/// Examples:
///   todo --file=BossTodos.json add buy tomatoes and potatoes
///   todo list
///   todo done 14
///   todo sortby done
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// JSON file of todos (default: `file` from .todo.yaml, else my_todos.json)
    #[arg(long, global = true, env = TODO_FILE_ENV, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Log what the command does to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Todo commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new todo.
    ///
    /// All words are joined with single spaces. Content must be unique and at
    /// most 100 characters; empty content adds nothing.
    Add {
        /// Todo text
        words: Vec<String>,
    },

    /// Show your todos in JSON format.
    #[command(visible_alias = "show")]
    List,

    /// Mark a todo as done.
    Done {
        /// Todo ID
        id: TaskId,
    },

    /// Delete a todo.
    #[command(name = "del", visible_alias = "delete")]
    Del {
        /// Todo ID
        id: TaskId,
    },

    /// Sort the todo file by a key: id, done or duration.
    #[command(name = "sortby")]
    SortBy {
        /// Sort key
        key: String,
    },

    /// Show todos whose content contains the text (case-sensitive).
    Search {
        /// Text to look for
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Replace the content of a todo.
    Edit {
        /// Todo ID
        id: TaskId,

        /// New todo text
        #[arg(required = true)]
        words: Vec<String>,
    },
}

impl Command {
    /// The command's name as typed on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List => "list",
            Self::Done { .. } => "done",
            Self::Del { .. } => "del",
            Self::SortBy { .. } => "sortby",
            Self::Search { .. } => "search",
            Self::Edit { .. } => "edit",
        }
    }

    /// Whether the command can change the store file.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, Self::List | Self::Search { .. })
    }
}
