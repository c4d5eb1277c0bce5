//! Domain types and pure view logic for tasklane.

/// Deadline validation and formatting.
pub mod date;
/// Identifier types.
pub mod id;
/// Task records, drafts and store payloads.
pub mod model;
/// Shared list, draft and preference state.
pub mod state;
/// Sorted/filtered projection of the list.
pub mod view;

pub use date::{format_deadline, is_valid_date, parse_deadline};
pub use id::{TaskId, UserId};
pub use model::{DraftTask, NewTask, Task, TaskFields, User};
pub use state::TaskListState;
pub use view::{ParseSortError, SortField, SortOrder, ViewPreferences, sorted_tasks};
