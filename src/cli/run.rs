//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::cli::{Cli, Command};
use crate::config;
use crate::error::Result;
use crate::tasks::{render_tasks, JsonTaskStore, TaskId, TaskStore};
use std::path::Path;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

impl CliOutput {
    fn success(stdout: Vec<String>) -> Self {
        Self { exit_code: ExitCode::SUCCESS, stdout, stderr: vec![] }
    }

    fn failure(message: String) -> Self {
        Self { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
    }
}

/// Run a parsed command line.
///
/// Relative store paths are resolved against `base_dir`.
pub fn run(cli: Cli, base_dir: &Path) -> CliOutput {
    let path = match config::resolve_store_path(cli.file.as_deref(), base_dir) {
        Ok(path) => path,
        Err(e) => return CliOutput::failure(format!("Error loading config: {e}")),
    };
    tracing::debug!(file = %path.display(), command = cli.command.name(), "resolved todo file");

    run_with_store(cli.command, &JsonTaskStore::new(path))
}

/// Run a command against the given store.
pub fn run_with_store(command: Command, store: &dyn TaskStore) -> CliOutput {
    let name = command.name();
    let mutating = command.is_mutating();

    let result = match command {
        Command::Add { words } => run_add(store, &words.join(" ")),
        Command::List => Ok(vec![store.show_all()]),
        Command::Done { id } => run_done(store, id),
        Command::Del { id } => run_delete(store, id),
        Command::SortBy { key } => run_sort(store, &key),
        Command::Search { words } => run_search(store, &words.join(" ")),
        Command::Edit { id, words } => run_edit(store, id, &words.join(" ")),
    };

    match result {
        Ok(stdout) => {
            tracing::debug!(command = name, mutating, "command finished");
            CliOutput::success(stdout)
        }
        Err(e) => {
            let validation = e.is_validation();
            tracing::warn!(command = name, error = %e, validation, "command failed");
            CliOutput::failure(format!("Error: {e}"))
        }
    }
}

fn run_add(store: &dyn TaskStore, content: &str) -> Result<Vec<String>> {
    let message = match store.create(content)? {
        Some(task) => {
            tracing::debug!(id = task.id, "created todo");
            "new todo added".to_string()
        }
        None => "nothing to add: todo text is empty".to_string(),
    };
    Ok(vec![message])
}

fn run_done(store: &dyn TaskStore, id: TaskId) -> Result<Vec<String>> {
    let task = store.mark_done(id)?;
    tracing::debug!(id, duration = %task.duration_text(), "completed todo");
    Ok(vec![format!("todo {id} is now marked done")])
}

fn run_delete(store: &dyn TaskStore, id: TaskId) -> Result<Vec<String>> {
    store.delete(id)?;
    Ok(vec![format!("deleted todo {id}")])
}

fn run_sort(store: &dyn TaskStore, key: &str) -> Result<Vec<String>> {
    store.sort(key)?;
    Ok(vec![format!("todos sorted by {key}")])
}

fn run_search(store: &dyn TaskStore, needle: &str) -> Result<Vec<String>> {
    let found = store.search(needle)?;
    tracing::debug!(matches = found.len(), "searched todos");
    Ok(vec![render_tasks(&found)?])
}

fn run_edit(store: &dyn TaskStore, id: TaskId, content: &str) -> Result<Vec<String>> {
    store.edit_content(id, content)?;
    Ok(vec![format!("todo {id} updated")])
}
