use serde::{Deserialize, Serialize};
use time::Date;

use crate::date::{self, format_deadline};
use crate::id::{TaskId, UserId};

/// Persisted task row as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,
    /// Required, non-empty title.
    pub title: String,
    /// Free-form notes.
    #[serde(default)]
    pub detail: Option<String>,
    /// Optional due date.
    #[serde(default, with = "date::optional_deadline")]
    pub deadline: Option<Date>,
    /// `true` once the task is complete.
    #[serde(default)]
    pub status: bool,
    /// Owner of the row.
    pub user_id: UserId,
}

/// Editable task shape bound to the create/edit form.
///
/// Fields are kept as raw strings so half-typed input survives until submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftTask {
    /// Target row when editing, [`TaskId::DRAFT`] when creating.
    pub id: TaskId,
    /// Title as typed.
    pub title: String,
    /// Detail as typed.
    pub detail: String,
    /// Deadline as typed; empty means "no deadline".
    pub deadline: String,
    /// Completion flag.
    pub status: bool,
    /// Owner copied from the edited task.
    pub user_id: Option<UserId>,
}

impl DraftTask {
    /// Blank draft used after every successful submission.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copy every field of a persisted task into a draft.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            detail: task.detail.clone().unwrap_or_default(),
            deadline: task.deadline.map(format_deadline).unwrap_or_default(),
            status: task.status,
            user_id: Some(task.user_id.clone()),
        }
    }

    /// Whether the title is present.
    #[must_use]
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Whether a deadline was typed at all.
    #[must_use]
    pub fn has_deadline(&self) -> bool {
        !self.deadline.is_empty()
    }
}

/// Insert payload for a brand new task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    /// Title of the new task.
    pub title: String,
    /// Detail text.
    pub detail: String,
    /// Deadline or `null`.
    #[serde(with = "date::optional_deadline")]
    pub deadline: Option<Date>,
    /// Initial completion flag (always `false` from the service).
    pub status: bool,
    /// Owner resolved from the current session.
    pub user_id: UserId,
}

/// Full-field overwrite sent when updating an existing task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskFields {
    /// Replacement title.
    pub title: String,
    /// Replacement detail.
    pub detail: String,
    /// Replacement deadline.
    #[serde(with = "date::optional_deadline")]
    pub deadline: Option<Date>,
    /// Replacement completion flag.
    pub status: bool,
}

/// Authenticated identity reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity referenced by `Task::user_id`.
    pub id: UserId,
    /// Contact address, when the provider exposes one.
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use time::macros::date;

    fn sample() -> Task {
        Task {
            id: TaskId(12),
            title: "Write report".into(),
            detail: None,
            deadline: Some(date!(2024 - 03 - 01)),
            status: true,
            user_id: UserId::from("user-1"),
        }
    }

    #[test]
    fn empty_draft_has_reset_shape() {
        let draft = DraftTask::empty();
        assert_eq!(draft.id, TaskId::DRAFT);
        assert!(draft.title.is_empty());
        assert!(draft.detail.is_empty());
        assert!(draft.deadline.is_empty());
        assert!(!draft.status);
        assert!(draft.user_id.is_none());
    }

    #[test]
    fn draft_copies_every_field() {
        let draft = DraftTask::from_task(&sample());
        assert_eq!(draft.id, TaskId(12));
        assert_eq!(draft.title, "Write report");
        assert_eq!(draft.detail, "");
        assert_eq!(draft.deadline, "2024-03-01");
        assert!(draft.status);
        assert_eq!(draft.user_id, Some(UserId::from("user-1")));
    }

    #[test]
    fn task_rows_deserialize_with_null_columns() {
        let row = r#"{"id":5,"title":"t","detail":null,"deadline":null,"status":false,"user_id":"u"}"#;
        let task: Task = serde_json::from_str(row).expect("row must deserialize");
        assert_eq!(task.id, TaskId(5));
        assert_eq!(task.deadline, None);
        assert_eq!(task.detail, None);
    }

    #[test]
    fn task_rows_reject_malformed_deadlines() {
        let row = r#"{"id":5,"title":"t","deadline":"2024/01/01","status":false,"user_id":"u"}"#;
        assert!(serde_json::from_str::<Task>(row).is_err());
    }

    #[test]
    fn payloads_serialize_deadline_as_plain_date() {
        let fields = TaskFields {
            title: "t".into(),
            detail: String::new(),
            deadline: Some(date!(2024 - 01 - 02)),
            status: false,
        };
        let json = serde_json::to_value(&fields).expect("serialize fields");
        assert_eq!(json["deadline"], "2024-01-02");

        let new_task = NewTask {
            title: "t".into(),
            detail: String::new(),
            deadline: None,
            status: false,
            user_id: UserId::from("u"),
        };
        let json = serde_json::to_value(&new_task).expect("serialize new task");
        assert!(json["deadline"].is_null());
        assert_eq!(json["user_id"], "u");
    }
}
