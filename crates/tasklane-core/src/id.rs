use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

/// Server-assigned identifier of a task row.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Placeholder carried by drafts that were never persisted.
    pub const DRAFT: Self = Self(0);

    /// Whether the store has assigned this id.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 != Self::DRAFT.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Reference to the authenticated identity that owns a task.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Borrow the raw identity string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn draft_id_is_unassigned() {
        assert!(!TaskId::DRAFT.is_assigned());
        assert!(TaskId(7).is_assigned());
        assert_eq!(TaskId::default(), TaskId::DRAFT);
    }

    #[test]
    fn task_id_parses_trimmed_integers() {
        let parsed: TaskId = " 42 ".parse().expect("must parse task id");
        assert_eq!(parsed, TaskId(42));
        assert!("forty-two".parse::<TaskId>().is_err());
    }

    #[test]
    fn ids_serialize_as_bare_values() {
        let json = serde_json::to_string(&TaskId(3)).expect("serialize task id");
        assert_eq!(json, "3");
        let user: UserId = serde_json::from_str("\"abc\"").expect("deserialize user id");
        assert_eq!(user.as_str(), "abc");
    }
}
