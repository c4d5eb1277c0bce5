//! [`TaskStore`] backed by the HTTP store.

use tasklane_core::{NewTask, Task, TaskFields, TaskId, User};
use tasklane_store_rest::{RestStore, RestStoreError};

use crate::task_store::TaskStore;

impl TaskStore for RestStore {
    type Error = RestStoreError;

    async fn insert(&self, task: &NewTask) -> Result<Vec<Task>, Self::Error> {
        Self::insert(self, task).await
    }

    async fn select_all(&self) -> Result<Vec<Task>, Self::Error> {
        Self::select_all(self).await
    }

    async fn update(&self, id: TaskId, fields: &TaskFields) -> Result<(), Self::Error> {
        Self::update(self, id, fields).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), Self::Error> {
        Self::delete(self, id).await
    }

    async fn current_user(&self) -> Result<Option<User>, Self::Error> {
        Self::current_user(self).await
    }
}
