//! User-facing prompts and messages raised by task mutations.

use anyhow::Result;
use tasklane_core::TaskId;

/// Shown when an insert is rejected by the store.
pub const ADD_FAILED_MESSAGE: &str = "Failed to add the task. Please try again.";

/// Question asked before deleting a task.
#[must_use]
pub fn delete_confirmation(id: TaskId) -> String {
    format!("Are you sure you want to DELETE Todo No. {id} ?")
}

/// Injected capability for talking to the person driving the UI.
pub trait Interaction {
    /// Ask a yes/no question.
    ///
    /// # Errors
    /// Returns an error when the answer cannot be obtained.
    fn confirm(&self, message: &str) -> Result<bool>;

    /// Show a blocking notice.
    fn alert(&self, message: &str);
}

impl<I: Interaction + ?Sized> Interaction for &I {
    fn confirm(&self, message: &str) -> Result<bool> {
        (**self).confirm(message)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_names_the_task_id() {
        assert_eq!(
            delete_confirmation(TaskId(17)),
            "Are you sure you want to DELETE Todo No. 17 ?"
        );
    }
}
