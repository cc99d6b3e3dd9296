//! Error types for `todo_file`.

use crate::tasks::models::{InvalidSortKey, TaskId};
use std::path::PathBuf;

/// Errors that can occur while operating on a todo store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the task list failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The store file exists but does not hold a valid task list.
    #[error("cannot read todos from {}: {source}", .path.display())]
    Deserialization {
        /// The store file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The store file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Todo content was empty where content is required.
    #[error("todo content must not be empty")]
    EmptyContent,

    /// Todo content exceeds the length limit.
    #[error("todo content too long: {length} characters (max {max})")]
    ContentTooLong {
        /// Length of the rejected content, in characters.
        length: usize,
        /// The maximum allowed length.
        max: usize,
    },

    /// An unknown sort key was requested.
    #[error(transparent)]
    InvalidSortKey(#[from] InvalidSortKey),

    /// Another todo already has exactly this content.
    #[error("no duplications allowed: {0:?} already exists")]
    DuplicateContent(String),

    /// No todo has the requested id.
    #[error("todo #{0} not found")]
    TaskNotFound(TaskId),

    /// The highest id in the store leaves no id to assign.
    #[error("cannot assign a new todo id after #{0}")]
    IdsExhausted(TaskId),

    /// The todo was already marked done.
    #[error("todo #{0} is already done")]
    AlreadyDone(TaskId),
}

impl Error {
    /// Whether this error rejects user input rather than reporting a storage failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyContent | Self::ContentTooLong { .. } | Self::InvalidSortKey(_))
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_validation() {
        assert!(Error::EmptyContent.is_validation());
        assert!(Error::ContentTooLong { length: 101, max: 100 }.is_validation());
        assert!(Error::InvalidSortKey(InvalidSortKey("name".to_string())).is_validation());
        assert!(!Error::TaskNotFound(1).is_validation());
        assert!(!Error::AlreadyDone(1).is_validation());
        assert!(!Error::DuplicateContent("x".to_string()).is_validation());
        assert!(!Error::FileNotFound(PathBuf::from("todos.json")).is_validation());
        assert!(!Error::IdsExhausted(u64::MAX).is_validation());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(Error::TaskNotFound(7).to_string(), "todo #7 not found");
        assert_eq!(Error::AlreadyDone(3).to_string(), "todo #3 is already done");
        assert_eq!(
            Error::ContentTooLong { length: 101, max: 100 }.to_string(),
            "todo content too long: 101 characters (max 100)"
        );
        assert_eq!(
            Error::FileNotFound(PathBuf::from("todos.json")).to_string(),
            "File not found: todos.json"
        );
    }

    #[test]
    fn test_invalid_sort_key_is_transparent() {
        let err = Error::from(InvalidSortKey("name".to_string()));
        assert_eq!(err.to_string(), InvalidSortKey("name".to_string()).to_string());
    }
}
