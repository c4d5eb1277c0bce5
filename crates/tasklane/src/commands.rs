use anyhow::{Result, anyhow, bail};
use tasklane_app::{Interaction, Outcome, TaskService, TaskStore};
use tasklane_core::{
    SortField, SortOrder, Task, TaskId, TaskListState, ViewPreferences, format_deadline, sorted_tasks,
};

use crate::Command;

/// Execute a task command against the service.
pub async fn run<S, I>(command: Command, service: &TaskService<S, I>, prefs: ViewPreferences) -> Result<()>
where
    S: TaskStore,
    I: Interaction,
{
    let mut state = TaskListState::new(prefs);

    match command {
        Command::Ls {
            sort,
            order,
            completed,
            open,
        } => {
            let listing = listing_preferences(prefs, sort, order, completed, open);
            state.set_sort(listing.sort_field, listing.sort_order);
            state.set_show_completed(listing.show_completed);

            ensure(service.fetch_all(&mut state).await, "load tasks")?;
            let view = sorted_tasks(&state);
            if view.is_empty() {
                println!("No tasks.");
            }
            for task in view {
                println!("{}", render_line(task));
            }
        }

        Command::Add {
            title,
            detail,
            deadline,
        } => {
            let draft = state.draft_mut();
            draft.title = title;
            draft.detail = detail.unwrap_or_default();
            draft.deadline = deadline.unwrap_or_default();

            ensure(service.save(&mut state).await, "add task")?;
            println!("Added task.");
        }

        Command::Edit {
            id,
            title,
            detail,
            deadline,
        } => {
            let id = TaskId(id);
            begin_edit(service, &mut state, id).await?;
            let draft = state.draft_mut();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(detail) = detail {
                draft.detail = detail;
            }
            if let Some(deadline) = deadline {
                draft.deadline = deadline;
            }

            ensure(service.save(&mut state).await, "update task")?;
            println!("Updated task {id}.");
        }

        Command::Done { id, undo } => {
            let id = TaskId(id);
            begin_edit(service, &mut state, id).await?;
            state.draft_mut().status = !undo;

            ensure(service.save(&mut state).await, "update task")?;
            let verb = if undo { "Reopened" } else { "Completed" };
            println!("{verb} task {id}.");
        }

        Command::Rm { id, .. } => {
            let id = TaskId(id);
            match service.delete(&mut state, id).await {
                Outcome::Cancelled => println!("Kept task {id}."),
                outcome => {
                    ensure(outcome, "delete task")?;
                    println!("Deleted task {id}.");
                }
            }
        }
    }

    Ok(())
}

async fn begin_edit<S, I>(service: &TaskService<S, I>, state: &mut TaskListState, id: TaskId) -> Result<()>
where
    S: TaskStore,
    I: Interaction,
{
    ensure(service.fetch_all(state).await, "load tasks")?;
    let task = state
        .task(id)
        .cloned()
        .ok_or_else(|| anyhow!("task {id} not found"))?;
    service.set_edit_mode(state, &task);
    Ok(())
}

/// Command-line flags layered over the configured view.
fn listing_preferences(
    prefs: ViewPreferences,
    sort: Option<SortField>,
    order: Option<SortOrder>,
    completed: bool,
    open: bool,
) -> ViewPreferences {
    let show_completed = if completed {
        true
    } else if open {
        false
    } else {
        prefs.show_completed
    };
    ViewPreferences {
        sort_field: sort.unwrap_or(prefs.sort_field),
        sort_order: order.unwrap_or(prefs.sort_order),
        show_completed,
    }
}

fn ensure(outcome: Outcome, action: &str) -> Result<()> {
    match outcome {
        Outcome::Completed | Outcome::Cancelled => Ok(()),
        Outcome::Invalid => bail!("could not {action}: invalid input"),
        Outcome::Unauthenticated => bail!("could not {action}: not signed in (set remote.access_token)"),
        Outcome::Failed => bail!("could not {action}: remote store error (see log)"),
    }
}

fn render_line(task: &Task) -> String {
    let mark = if task.status { 'x' } else { ' ' };
    let deadline = task
        .deadline
        .map_or_else(|| "----------".to_owned(), format_deadline);
    let mut line = format!("{:>5} [{mark}] {deadline}  {}", task.id, task.title);
    if let Some(detail) = task.detail.as_deref().filter(|detail| !detail.is_empty()) {
        line.push_str(" - ");
        line.push_str(detail);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklane_core::UserId;
    use time::macros::date;

    fn task(detail: Option<&str>, deadline: Option<time::Date>, status: bool) -> Task {
        Task {
            id: TaskId(12),
            title: "Call plumber".into(),
            detail: detail.map(str::to_owned),
            deadline,
            status,
            user_id: UserId::from("u"),
        }
    }

    #[test]
    fn renders_open_task_with_deadline() {
        let line = render_line(&task(None, Some(date!(2024 - 05 - 01)), false));
        assert_eq!(line, "   12 [ ] 2024-05-01  Call plumber");
    }

    #[test]
    fn renders_completed_task_with_detail() {
        let line = render_line(&task(Some("kitchen sink"), None, true));
        assert_eq!(line, "   12 [x] ----------  Call plumber - kitchen sink");
    }

    #[test]
    fn flags_override_configured_view_both_ways() {
        let configured = ViewPreferences {
            sort_field: SortField::Title,
            sort_order: SortOrder::Desc,
            show_completed: true,
        };
        let open = listing_preferences(configured, None, None, false, true);
        assert!(!open.show_completed);
        assert_eq!(open.sort_field, SortField::Title);
        assert_eq!(open.sort_order, SortOrder::Desc);

        let kept = listing_preferences(configured, Some(SortField::Id), None, false, false);
        assert!(kept.show_completed);
        assert_eq!(kept.sort_field, SortField::Id);

        let completed = listing_preferences(ViewPreferences::default(), None, Some(SortOrder::Desc), true, false);
        assert!(completed.show_completed);
        assert_eq!(completed.sort_order, SortOrder::Desc);
    }

    #[test]
    fn cancelled_and_completed_are_successes() {
        assert!(ensure(Outcome::Completed, "x").is_ok());
        assert!(ensure(Outcome::Cancelled, "x").is_ok());
        assert!(ensure(Outcome::Invalid, "x").is_err());
        assert!(ensure(Outcome::Unauthenticated, "x").is_err());
        assert!(ensure(Outcome::Failed, "x").is_err());
    }
}
