//! In-process task table for tests, built with the `test-util` feature.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tasklane_core::{NewTask, Task, TaskFields, TaskId, User};
use thiserror::Error;

use crate::task_store::TaskStore;

/// Store operation, used for call accounting and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// [`TaskStore::insert`]
    Insert,
    /// [`TaskStore::select_all`]
    SelectAll,
    /// [`TaskStore::update`]
    Update,
    /// [`TaskStore::delete`]
    Delete,
    /// [`TaskStore::current_user`]
    CurrentUser,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Insert => "insert",
            Self::SelectAll => "select",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::CurrentUser => "current_user",
        };
        f.write_str(name)
    }
}

/// Errors produced by [`MemoryStore`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// A failure armed with [`MemoryStore::fail_next`].
    #[error("injected {0} failure")]
    Injected(StoreOp),
    /// Rows must carry a non-empty title.
    #[error("title must not be empty")]
    EmptyTitle,
}

/// Task table kept in memory with sequential ids.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Task>,
    last_id: i64,
    user: Option<User>,
    armed: HashSet<StoreOp>,
    calls: HashMap<StoreOp, usize>,
}

impl MemoryStore {
    /// Empty table without a signed-in user.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign `user` in.
    #[must_use]
    pub fn with_user(self, user: User) -> Self {
        self.guard().user = Some(user);
        self
    }

    /// Seed the table; ids continue after the largest seeded id.
    #[must_use]
    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        {
            let mut inner = self.guard();
            inner.last_id = tasks.iter().map(|task| task.id.0).max().unwrap_or(0);
            inner.rows = tasks;
        }
        self
    }

    /// Drop the current session.
    pub fn sign_out(&self) {
        self.guard().user = None;
    }

    /// Make the next call of `op` fail.
    pub fn fail_next(&self, op: StoreOp) {
        self.guard().armed.insert(op);
    }

    /// Number of times `op` was called, including failed calls.
    #[must_use]
    pub fn calls(&self, op: StoreOp) -> usize {
        self.guard().calls.get(&op).copied().unwrap_or(0)
    }

    /// Snapshot of the stored rows.
    #[must_use]
    pub fn rows(&self) -> Vec<Task> {
        self.guard().rows.clone()
    }

    fn guard(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self, op: StoreOp) -> Result<MutexGuard<'_, Inner>, MemoryStoreError> {
        let mut inner = self.guard();
        *inner.calls.entry(op).or_default() += 1;
        if inner.armed.remove(&op) {
            return Err(MemoryStoreError::Injected(op));
        }
        Ok(inner)
    }
}

impl TaskStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn insert(&self, task: &NewTask) -> Result<Vec<Task>, Self::Error> {
        let mut inner = self.enter(StoreOp::Insert)?;
        if task.title.is_empty() {
            return Err(MemoryStoreError::EmptyTitle);
        }
        inner.last_id += 1;
        let row = Task {
            id: TaskId(inner.last_id),
            title: task.title.clone(),
            detail: Some(task.detail.clone()),
            deadline: task.deadline,
            status: task.status,
            user_id: task.user_id.clone(),
        };
        inner.rows.push(row.clone());
        drop(inner);
        Ok(vec![row])
    }

    async fn select_all(&self) -> Result<Vec<Task>, Self::Error> {
        let inner = self.enter(StoreOp::SelectAll)?;
        Ok(inner.rows.clone())
    }

    async fn update(&self, id: TaskId, fields: &TaskFields) -> Result<(), Self::Error> {
        let mut inner = self.enter(StoreOp::Update)?;
        if fields.title.is_empty() {
            return Err(MemoryStoreError::EmptyTitle);
        }
        // Like a filtered UPDATE, an unknown id matches nothing.
        if let Some(row) = inner.rows.iter_mut().find(|row| row.id == id) {
            row.title.clone_from(&fields.title);
            row.detail = Some(fields.detail.clone());
            row.deadline = fields.deadline;
            row.status = fields.status;
        }
        drop(inner);
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<(), Self::Error> {
        let mut inner = self.enter(StoreOp::Delete)?;
        inner.rows.retain(|row| row.id != id);
        drop(inner);
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<User>, Self::Error> {
        let inner = self.enter(StoreOp::CurrentUser)?;
        Ok(inner.user.clone())
    }
}
