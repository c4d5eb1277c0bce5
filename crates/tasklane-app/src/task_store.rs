//! Storage abstraction for the remote task table.

use anyhow::Error;
use tasklane_core::{NewTask, Task, TaskFields, TaskId, User};

/// Remote operations the mutation service relies on.
///
/// Every call is awaited on its own; implementations never see two requests of
/// one operation in flight at the same time.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Insert a new row and return the stored representation.
    ///
    /// # Errors
    /// Returns a store-specific error when the insert is rejected.
    async fn insert(&self, task: &NewTask) -> Result<Vec<Task>, Self::Error>;

    /// Load every task visible to the caller.
    ///
    /// # Errors
    /// Returns a store-specific error when listing fails.
    async fn select_all(&self) -> Result<Vec<Task>, Self::Error>;

    /// Overwrite the editable fields of the task with the given id.
    ///
    /// # Errors
    /// Returns a store-specific error when the update is rejected.
    async fn update(&self, id: TaskId, fields: &TaskFields) -> Result<(), Self::Error>;

    /// Remove the task with the given id.
    ///
    /// # Errors
    /// Returns a store-specific error when the delete is rejected.
    async fn delete(&self, id: TaskId) -> Result<(), Self::Error>;

    /// Resolve the signed-in user, if any.
    ///
    /// # Errors
    /// Returns a store-specific error when the session lookup itself fails.
    async fn current_user(&self) -> Result<Option<User>, Self::Error>;
}

impl<S: TaskStore> TaskStore for &S {
    type Error = S::Error;

    async fn insert(&self, task: &NewTask) -> Result<Vec<Task>, Self::Error> {
        (**self).insert(task).await
    }

    async fn select_all(&self) -> Result<Vec<Task>, Self::Error> {
        (**self).select_all().await
    }

    async fn update(&self, id: TaskId, fields: &TaskFields) -> Result<(), Self::Error> {
        (**self).update(id, fields).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), Self::Error> {
        (**self).delete(id).await
    }

    async fn current_user(&self) -> Result<Option<User>, Self::Error> {
        (**self).current_user().await
    }
}
