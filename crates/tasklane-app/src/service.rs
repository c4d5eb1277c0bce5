//! Task mutations shared by every front-end.
//!
//! Operations never return errors. Failures are logged, and the ones a person
//! can act on are surfaced through [`Interaction::alert`].

use anyhow::Error;
use tasklane_core::{DraftTask, NewTask, Task, TaskFields, TaskId, TaskListState, User, parse_deadline};
use tracing::{debug, error, info, warn};

use crate::interaction::{ADD_FAILED_MESSAGE, Interaction, delete_confirmation};
use crate::task_store::TaskStore;

/// How an operation ended. Informational only; failures were already reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The remote call succeeded (or there was nothing remote to do).
    Completed,
    /// Input was rejected before any remote call.
    Invalid,
    /// No signed-in user.
    Unauthenticated,
    /// The user declined the confirmation.
    Cancelled,
    /// A remote call failed.
    Failed,
}

/// Reasons a mutation stops early.
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    /// The draft has no title.
    #[error("\"Todo Title\" is a required field.")]
    MissingTitle,
    /// The draft deadline is not a real `YYYY-MM-DD` date.
    #[error("Please enter a valid date (in the format \"YYYY-MM-DD\") in the Deadline field.")]
    InvalidDeadline,
    /// No authenticated session.
    #[error("no signed-in user")]
    Unauthenticated,
    /// Backing store returned an error.
    #[error("store error: {0}")]
    Store(#[from] Error),
}

impl MutationError {
    fn store<E: Into<Error>>(err: E) -> Self {
        Self::Store(err.into())
    }
}

/// Validates drafts, calls the store, and keeps [`TaskListState`] in sync.
pub struct TaskService<S, I> {
    store: S,
    interaction: I,
}

impl<S, I> TaskService<S, I> {
    /// Construct a service over a store and a UI capability.
    pub const fn new(store: S, interaction: I) -> Self {
        Self { store, interaction }
    }

    /// Expose a reference to the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Copy `task` into the draft and enter edit mode.
    pub fn set_edit_mode(&self, state: &mut TaskListState, task: &Task) {
        debug!(id = %task.id, "editing task");
        state.begin_edit(task);
    }

    /// Reset the draft to its blank shape.
    pub fn reset_draft(&self, state: &mut TaskListState) {
        state.reset_draft();
    }

    /// Leave edit mode without saving.
    pub fn cancel_edit(&self, state: &mut TaskListState) {
        state.finish_edit();
        state.reset_draft();
    }
}

impl<S, I> TaskService<S, I>
where
    S: TaskStore,
    I: Interaction,
{
    /// Submit the draft: update when editing, insert otherwise.
    ///
    /// Edit mode is cleared afterwards whatever the outcome.
    pub async fn save(&self, state: &mut TaskListState) -> Outcome {
        let outcome = if state.is_editing() {
            let draft = state.draft().clone();
            self.update(state, &draft).await
        } else {
            self.add(state).await
        };
        state.finish_edit();
        outcome
    }

    /// Insert the draft as a new task owned by the signed-in user.
    ///
    /// On success the list is refetched and the draft reset. Validation and
    /// insert failures are shown to the user; a missing session is only logged.
    pub async fn add(&self, state: &mut TaskListState) -> Outcome {
        match self.try_add(state).await {
            Ok(()) => Outcome::Completed,
            Err(err @ (MutationError::MissingTitle | MutationError::InvalidDeadline)) => {
                debug!(error = %err, "draft rejected");
                self.interaction.alert(&err.to_string());
                Outcome::Invalid
            }
            Err(MutationError::Unauthenticated) => {
                warn!("no signed-in user; task not added");
                Outcome::Unauthenticated
            }
            Err(MutationError::Store(err)) => {
                error!(error = %err, "failed to add task");
                self.interaction.alert(ADD_FAILED_MESSAGE);
                Outcome::Failed
            }
        }
    }

    async fn try_add(&self, state: &mut TaskListState) -> Result<(), MutationError> {
        let draft = state.draft();
        if !draft.has_title() {
            return Err(MutationError::MissingTitle);
        }
        let deadline = if draft.has_deadline() {
            Some(parse_deadline(&draft.deadline).ok_or(MutationError::InvalidDeadline)?)
        } else {
            None
        };
        let (title, detail) = (draft.title.clone(), draft.detail.clone());

        let user = self.signed_in_user().await?;
        let new_task = NewTask {
            title,
            detail,
            deadline,
            status: false,
            user_id: user.id,
        };
        let inserted = self.store.insert(&new_task).await.map_err(MutationError::store)?;
        if let Some(row) = inserted.first() {
            info!(id = %row.id, "added task");
        }

        self.fetch_all(state).await;
        state.reset_draft();
        Ok(())
    }

    async fn signed_in_user(&self) -> Result<User, MutationError> {
        match self.store.current_user().await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(MutationError::Unauthenticated),
            Err(err) => {
                let err: Error = err.into();
                warn!(error = %err, "session lookup failed");
                Err(MutationError::Unauthenticated)
            }
        }
    }

    /// Overwrite the stored task `todo.id` with every editable field of `todo`.
    ///
    /// The list is refetched and the draft reset even when the update fails.
    pub async fn update(&self, state: &mut TaskListState, todo: &DraftTask) -> Outcome {
        let outcome = match self.try_update(todo).await {
            Ok(()) => {
                info!(id = %todo.id, "updated task");
                Outcome::Completed
            }
            Err(err) => {
                error!(id = %todo.id, error = %err, "failed to update task");
                Outcome::Failed
            }
        };

        self.fetch_all(state).await;
        state.reset_draft();
        outcome
    }

    async fn try_update(&self, todo: &DraftTask) -> Result<(), MutationError> {
        let deadline = if todo.has_deadline() {
            Some(parse_deadline(&todo.deadline).ok_or(MutationError::InvalidDeadline)?)
        } else {
            None
        };
        let fields = TaskFields {
            title: todo.title.clone(),
            detail: todo.detail.clone(),
            deadline,
            status: todo.status,
        };
        self.store
            .update(todo.id, &fields)
            .await
            .map_err(MutationError::store)
    }

    /// Delete a task after the user confirms.
    pub async fn delete(&self, state: &mut TaskListState, id: TaskId) -> Outcome {
        let confirmed = match self.interaction.confirm(&delete_confirmation(id)) {
            Ok(answer) => answer,
            Err(err) => {
                error!(%id, error = %err, "delete confirmation failed");
                return Outcome::Failed;
            }
        };
        if !confirmed {
            debug!(%id, "delete declined");
            return Outcome::Cancelled;
        }

        if let Err(err) = self.store.delete(id).await {
            let err: Error = err.into();
            error!(%id, error = %err, "failed to delete task");
            return Outcome::Failed;
        }
        info!(%id, "deleted task");

        self.fetch_all(state).await;
        Outcome::Completed
    }

    /// Replace the in-memory list with the store's current rows.
    ///
    /// On failure the list is emptied.
    pub async fn fetch_all(&self, state: &mut TaskListState) -> Outcome {
        match self.store.select_all().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "fetched tasks");
                state.replace_tasks(tasks);
                Outcome::Completed
            }
            Err(err) => {
                let err: Error = err.into();
                error!(error = %err, "failed to fetch tasks");
                state.clear_tasks();
                Outcome::Failed
            }
        }
    }
}
