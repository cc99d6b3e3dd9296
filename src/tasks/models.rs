//! Task model types for the todo store.

use crate::error::{Error, Result};
use crate::tasks::elapsed::Elapsed;
use crate::tasks::timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier of a task within one store file.
pub type TaskId = u64;

/// A single todo.
///
/// Serialized with the keys `id`, `content`, `done`, `createdAt`, `doneAt`
/// and `duration`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned by the store.
    pub id: TaskId,
    /// Free-form text of the todo.
    pub content: String,
    /// Whether the todo has been completed.
    pub done: bool,
    /// Local time the todo was created, to the second.
    #[serde(with = "timestamp::required")]
    pub created_at: NaiveDateTime,
    /// Local time the todo was completed, to the second.
    #[serde(default, with = "timestamp::optional")]
    pub done_at: Option<NaiveDateTime>,
    /// Time from creation to completion, fixed when the todo is completed.
    #[serde(default)]
    pub duration: Elapsed,
}

impl Task {
    /// Create an open task. `created_at` is truncated to whole seconds.
    #[must_use]
    pub fn new(id: TaskId, content: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            content: content.into(),
            done: false,
            created_at: timestamp::truncate(created_at),
            done_at: None,
            duration: Elapsed::ZERO,
        }
    }

    /// Mark the task done at `now`.
    ///
    /// The duration keeps the full precision of `now`; the stored completion
    /// time is truncated to whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyDone`] if the task was already completed. The
    /// task is left untouched in that case.
    pub fn mark_done(&mut self, now: NaiveDateTime) -> Result<()> {
        if self.done {
            return Err(Error::AlreadyDone(self.id));
        }
        self.done = true;
        self.done_at = Some(timestamp::truncate(now));
        self.duration = Elapsed::between(self.created_at, now);
        Ok(())
    }

    /// The stored duration in its text form, such as `1m4.193747377s`.
    #[must_use]
    pub fn duration_text(&self) -> String {
        self.duration.to_string()
    }
}

/// Keys the store can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending id.
    Id,
    /// Open tasks before completed ones.
    Done,
    /// Ascending stored duration.
    Duration,
}

impl SortKey {
    /// Every sort key, in the order they are listed to users.
    pub const ALL: [Self; 3] = [Self::Id, Self::Done, Self::Duration];

    /// Get the string representation of the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Done => "done",
            Self::Duration => "duration",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| InvalidSortKey(s.to_string()))
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when an unknown sort key is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSortKey(pub String);

impl std::fmt::Display for InvalidSortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid sort key: '{}' (must be one of: id, done, duration)", self.0)
    }
}

impl std::error::Error for InvalidSortKey {}
