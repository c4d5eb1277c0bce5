use crate::id::TaskId;
use crate::model::{DraftTask, Task};
use crate::view::{SortField, SortOrder, ViewPreferences};

/// In-memory mirror of the remote task list plus form and view state.
///
/// A single owner mutates it per operation; readers borrow it to derive views.
#[derive(Debug, Clone, Default)]
pub struct TaskListState {
    tasks: Vec<Task>,
    draft: DraftTask,
    editing: bool,
    prefs: ViewPreferences,
}

impl TaskListState {
    /// Empty state using the given sort/filter preferences.
    #[must_use]
    pub fn new(prefs: ViewPreferences) -> Self {
        Self {
            prefs,
            ..Self::default()
        }
    }

    /// Tasks in fetch order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Find a fetched task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Current draft.
    #[must_use]
    pub const fn draft(&self) -> &DraftTask {
        &self.draft
    }

    /// Mutable access for form bindings.
    pub const fn draft_mut(&mut self) -> &mut DraftTask {
        &mut self.draft
    }

    /// Whether the draft targets an existing task.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    /// Active sort key.
    #[must_use]
    pub const fn sort_field(&self) -> SortField {
        self.prefs.sort_field
    }

    /// Active sort direction.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.prefs.sort_order
    }

    /// Whether completed tasks are shown instead of open ones.
    #[must_use]
    pub const fn show_completed(&self) -> bool {
        self.prefs.show_completed
    }

    /// Change the sort key and direction.
    pub const fn set_sort(&mut self, field: SortField, order: SortOrder) {
        self.prefs.sort_field = field;
        self.prefs.sort_order = order;
    }

    /// Switch between open and completed tasks.
    pub const fn set_show_completed(&mut self, show_completed: bool) {
        self.prefs.show_completed = show_completed;
    }

    /// Replace the list contents in place, keeping the same backing vector.
    pub fn replace_tasks<I>(&mut self, tasks: I)
    where
        I: IntoIterator<Item = Task>,
    {
        self.tasks.clear();
        self.tasks.extend(tasks);
    }

    /// Drop every task from the list.
    pub fn clear_tasks(&mut self) {
        self.tasks.clear();
    }

    /// Reset the draft to its blank shape.
    pub fn reset_draft(&mut self) {
        self.draft = DraftTask::empty();
    }

    /// Load a task into the draft and enter edit mode.
    pub fn begin_edit(&mut self, task: &Task) {
        self.draft = DraftTask::from_task(task);
        self.editing = true;
    }

    /// Leave edit mode.
    pub const fn finish_edit(&mut self) {
        self.editing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::UserId;

    fn task(id: i64) -> Task {
        Task {
            id: TaskId(id),
            title: format!("task {id}"),
            detail: Some("notes".into()),
            deadline: None,
            status: false,
            user_id: UserId::from("owner"),
        }
    }

    #[test]
    fn replace_tasks_swaps_contents_wholesale() {
        let mut state = TaskListState::default();
        state.replace_tasks(vec![task(1), task(2)]);
        state.replace_tasks(vec![task(3)]);
        let ids: Vec<TaskId> = state.tasks().iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![TaskId(3)]);
    }

    #[test]
    fn begin_edit_copies_task_and_sets_flag() {
        let mut state = TaskListState::default();
        state.begin_edit(&task(4));
        assert!(state.is_editing());
        assert_eq!(state.draft().id, TaskId(4));
        assert_eq!(state.draft().detail, "notes");

        state.finish_edit();
        assert!(!state.is_editing());
    }

    #[test]
    fn reset_draft_is_idempotent() {
        let mut state = TaskListState::default();
        state.draft_mut().title = "typed".into();
        state.reset_draft();
        let first = state.draft().clone();
        state.reset_draft();
        assert_eq!(&first, state.draft());
        assert_eq!(first, DraftTask::empty());
    }

    #[test]
    fn lookup_by_id() {
        let mut state = TaskListState::default();
        state.replace_tasks(vec![task(1), task(2)]);
        assert_eq!(state.task(TaskId(2)).map(|task| task.id), Some(TaskId(2)));
        assert!(state.task(TaskId(9)).is_none());
    }
}
