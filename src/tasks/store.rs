//! Task store trait and JSON-file implementation.
//!
//! The whole store lives in one file holding a JSON array of tasks. Every
//! operation loads the full array, works on it in memory and, if it changes
//! anything, writes the full array back. Writes go to a temporary file in the
//! same directory which is then renamed over the store, so the file on disk is
//! always either the old or the new array.
//!
//! There is no locking: two processes mutating the same file at once can lose
//! one of the updates.

use crate::error::{Error, Result};
use crate::tasks::models::{SortKey, Task, TaskId};
use crate::tasks::timestamp;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Maximum todo length, in characters.
pub const MAX_CONTENT_CHARS: usize = 100;

/// Text returned by [`TaskStore::show_all`] when there is nothing to show.
pub const EMPTY_STORE: &str = "[]";

/// Trait for task storage operations.
///
/// Operations that need an existing store (`mark_done`, `delete`, `sort`,
/// `search`, `edit_content`) fail with [`Error::FileNotFound`] when the store
/// has never been written; `load`, `create` and `show_all` treat a missing or
/// blank store as empty.
#[allow(clippy::missing_errors_doc)]
pub trait TaskStore {
    /// Load every task, in stored order.
    fn load(&self) -> Result<Vec<Task>>;

    /// Append a new open task with the given content.
    ///
    /// Empty content is accepted and ignored: nothing is written and `None`
    /// is returned.
    fn create(&self, content: &str) -> Result<Option<Task>>;

    /// The store's JSON text exactly as stored, or [`EMPTY_STORE`] if it cannot
    /// be read or is blank.
    fn show_all(&self) -> String;

    /// Mark a task as done, returning the updated task.
    fn mark_done(&self, id: TaskId) -> Result<Task>;

    /// Delete a task, returning the removed task.
    fn delete(&self, id: TaskId) -> Result<Task>;

    /// Reorder the stored tasks by the named key (`id`, `done` or `duration`).
    fn sort(&self, key: &str) -> Result<()>;

    /// Tasks whose content contains `needle` (case-sensitive), in stored order.
    fn search(&self, needle: &str) -> Result<Vec<Task>>;

    /// Replace the content of a task, returning the updated task.
    fn edit_content(&self, id: TaskId, content: &str) -> Result<Task>;
}

/// Task store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonTaskStore {
    path: PathBuf,
}

impl JsonTaskStore {
    /// Create a store for the file at `path`. Nothing is read or written yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Get the store file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the store file, returning `None` if it does not exist.
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse store contents. Anything non-blank that is not a task array,
    /// invalid UTF-8 included, is a deserialization error.
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Task>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice::<Option<Vec<Task>>>(bytes)
            .map(Option::unwrap_or_default)
            .map_err(|source| Error::Deserialization { path: self.path.clone(), source })
    }

    /// Load tasks from a store that must already exist.
    fn load_existing(&self) -> Result<Vec<Task>> {
        let bytes = self.read()?.ok_or_else(|| Error::FileNotFound(self.path.clone()))?;
        self.parse(&bytes)
    }

    /// Replace the store file with `tasks`.
    fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = render_tasks(tasks)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file().set_permissions(fs::Permissions::from_mode(0o644))?;
        }

        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl TaskStore for JsonTaskStore {
    fn load(&self) -> Result<Vec<Task>> {
        match self.read()? {
            Some(bytes) => self.parse(&bytes),
            None => Ok(Vec::new()),
        }
    }

    fn create(&self, content: &str) -> Result<Option<Task>> {
        if content.is_empty() {
            return Ok(None);
        }
        check_length(content)?;

        let mut tasks = self.load()?;
        ensure_unique(&tasks, content, None)?;

        let task = Task::new(next_id(&tasks)?, content, timestamp::now());
        tasks.push(task.clone());
        self.save(&tasks)?;

        Ok(Some(task))
    }

    fn show_all(&self) -> String {
        match fs::read_to_string(&self.path) {
            Ok(text) if !text.trim().is_empty() => text,
            _ => EMPTY_STORE.to_string(),
        }
    }

    fn mark_done(&self, id: TaskId) -> Result<Task> {
        let mut tasks = self.load_existing()?;
        let index = position(&tasks, id)?;

        tasks[index].mark_done(timestamp::now())?;
        self.save(&tasks)?;

        Ok(tasks.swap_remove(index))
    }

    fn delete(&self, id: TaskId) -> Result<Task> {
        let mut tasks = self.load_existing()?;
        let index = position(&tasks, id)?;

        let removed = tasks.remove(index);
        self.save(&tasks)?;

        Ok(removed)
    }

    fn sort(&self, key: &str) -> Result<()> {
        let key: SortKey = key.parse()?;

        let mut tasks = self.load_existing()?;
        sort_tasks(&mut tasks, key);
        self.save(&tasks)
    }

    fn search(&self, needle: &str) -> Result<Vec<Task>> {
        let tasks = self.load_existing()?;
        Ok(tasks.into_iter().filter(|task| task.content.contains(needle)).collect())
    }

    fn edit_content(&self, id: TaskId, content: &str) -> Result<Task> {
        if content.is_empty() {
            return Err(Error::EmptyContent);
        }
        check_length(content)?;

        let mut tasks = self.load_existing()?;
        let index = position(&tasks, id)?;
        ensure_unique(&tasks, content, Some(id))?;

        tasks[index].content = content.to_string();
        self.save(&tasks)?;

        Ok(tasks.swap_remove(index))
    }
}

/// Sort tasks in place by `key`.
///
/// The sort is stable: tasks that compare equal keep their relative order.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::Id => tasks.sort_by_key(|task| task.id),
        SortKey::Done => tasks.sort_by_key(|task| task.done),
        SortKey::Duration => tasks.sort_by_key(|task| task.duration),
    }
}

/// Render tasks as the pretty-printed JSON array used in store files.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_tasks(tasks: &[Task]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    tasks.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// The id for the next task: one past the highest id in use.
fn next_id(tasks: &[Task]) -> Result<TaskId> {
    match tasks.iter().map(|task| task.id).max() {
        None => Ok(1),
        Some(max) => max.checked_add(1).ok_or(Error::IdsExhausted(max)),
    }
}

fn position(tasks: &[Task], id: TaskId) -> Result<usize> {
    tasks.iter().position(|task| task.id == id).ok_or(Error::TaskNotFound(id))
}

fn check_length(content: &str) -> Result<()> {
    let length = content.chars().count();
    if length > MAX_CONTENT_CHARS {
        return Err(Error::ContentTooLong { length, max: MAX_CONTENT_CHARS });
    }
    Ok(())
}

/// Reject `content` if a task other than `except` already has it.
fn ensure_unique(tasks: &[Task], content: &str, except: Option<TaskId>) -> Result<()> {
    if tasks.iter().any(|task| task.content == content && Some(task.id) != except) {
        return Err(Error::DuplicateContent(content.to_string()));
    }
    Ok(())
}
