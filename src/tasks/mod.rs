//! Todo storage.
//!
//! This module provides a todo list persisted as one JSON file:
//! - Tasks with content, completion state, timestamps and a completion duration
//! - Create, complete, edit and delete by id
//! - Sorting the stored order by id, completion or duration
//! - Case-sensitive substring search
//!
//! # Example
//!
//! ```no_run
//! use todo_file::tasks::{JsonTaskStore, TaskStore};
//!
//! let store = JsonTaskStore::new("/tmp/my_todos.json");
//!
//! let task = store.create("buy tomatoes and potatoes").unwrap().unwrap();
//! store.mark_done(task.id).unwrap();
//!
//! let found = store.search("tomatoes").unwrap();
//! assert_eq!(found[0].id, task.id);
//! ```

pub mod elapsed;
pub mod models;
pub mod store;
pub mod timestamp;

pub use elapsed::{Elapsed, InvalidElapsed};
pub use models::{InvalidSortKey, SortKey, Task, TaskId};
pub use store::{
    render_tasks, sort_tasks, JsonTaskStore, TaskStore, EMPTY_STORE, MAX_CONTENT_CHARS,
};
