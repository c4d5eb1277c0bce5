//! Sorted and filtered projection of the task list.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use icu_normalizer::DecomposingNormalizerBorrowed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Task;
use crate::state::TaskListState;

/// Task attribute used as the sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Server-assigned id.
    Id,
    /// Title text.
    Title,
    /// Detail text.
    Detail,
    /// Due date; undated tasks always trail.
    #[default]
    Deadline,
    /// Completion flag.
    Status,
    /// Owner reference.
    UserId,
}

impl SortField {
    /// Every field, in record order.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Title,
        Self::Detail,
        Self::Deadline,
        Self::Status,
        Self::UserId,
    ];

    /// Column name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Detail => "detail",
            Self::Deadline => "deadline",
            Self::Status => "status",
            Self::UserId => "user_id",
        }
    }

    fn compare(self, a: &Task, b: &Task, order: SortOrder) -> Ordering {
        match self {
            Self::Deadline => compare_deadlines(a, b, order),
            Self::Title => order.apply(collate(&a.title, &b.title)),
            Self::Detail => order.apply(collate(
                a.detail.as_deref().unwrap_or_default(),
                b.detail.as_deref().unwrap_or_default(),
            )),
            Self::UserId => order.apply(collate(a.user_id.as_str(), b.user_id.as_str())),
            Self::Id => order.apply(a.id.0.cmp(&b.id.0)),
            Self::Status => order.apply(i64::from(a.status).cmp(&i64::from(b.status))),
        }
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| ParseSortError::Field(token.to_owned()))
    }
}

/// Direction applied to the sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    /// String form used in configuration and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(ParseSortError::Order(other.to_owned())),
        }
    }
}

/// Error returned when a sort token cannot be mapped to a known value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSortError {
    /// Unknown task field.
    #[error("unknown sort field: {0}")]
    Field(String),
    /// Unknown direction.
    #[error("unknown sort order: {0} (expected asc or desc)")]
    Order(String),
}

/// Sort and filter preferences that drive [`sorted_tasks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ViewPreferences {
    /// Attribute to sort by.
    pub sort_field: SortField,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Show completed tasks instead of open ones.
    pub show_completed: bool,
}

/// Derive the visible task sequence from the current list state.
///
/// Tasks whose completion flag differs from the filter are dropped, the rest
/// are stably sorted by the selected field. The underlying list is untouched.
#[must_use]
pub fn sorted_tasks(state: &TaskListState) -> Vec<&Task> {
    if state.tasks().is_empty() {
        return Vec::new();
    }

    let show_completed = state.show_completed();
    let mut visible: Vec<&Task> = state
        .tasks()
        .iter()
        .filter(|task| task.status == show_completed)
        .collect();

    let field = state.sort_field();
    let order = state.sort_order();
    visible.sort_by(|a, b| field.compare(a, b, order));
    visible
}

fn compare_deadlines(a: &Task, b: &Task, order: SortOrder) -> Ordering {
    match (a.deadline, b.deadline) {
        (Some(a_date), Some(b_date)) => order.apply(a_date.cmp(&b_date)),
        // Undated tasks trail in both directions.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Lexical comparison in the manner of a root-locale collator.
///
/// Letters are compared on their base form first, so accents and case only
/// break ties: `eclair` < `éclair` < `fig`, and lowercase sorts before
/// uppercase. Scripts order by code point after decomposition.
fn collate(a: &str, b: &str) -> Ordering {
    let a_folded = fold(a);
    let b_folded = fold(b);
    base_letters(&a_folded)
        .cmp(base_letters(&b_folded))
        .then_with(|| a_folded.cmp(&b_folded))
        .then_with(|| b.cmp(a))
}

/// Canonical decomposition, lowercased.
fn fold(text: &str) -> Vec<char> {
    DecomposingNormalizerBorrowed::new_nfd()
        .normalize_iter(text.chars())
        .flat_map(char::to_lowercase)
        .collect()
}

fn base_letters(folded: &[char]) -> impl Iterator<Item = char> + '_ {
    folded.iter().copied().filter(|ch| !is_combining_mark(*ch))
}

const fn is_combining_mark(ch: char) -> bool {
    matches!(
        ch,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{3099}'..='\u{309A}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}
