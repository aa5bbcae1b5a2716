use chrono::NaiveDate;

use super::action::Action;
use super::task::{Priority, Task};

/// Fields derived from a task's current action list. Recomputed from
/// scratch on every snapshot; no caching contract.
#[derive(Debug, Clone)]
pub struct TaskView {
    /// Lowest-sequence pending action, if any.
    pub next_action: Option<Action>,
    /// Due date of the first pending action in creation order. Drives
    /// the overdue/due-today banners and the deadline sort key.
    pub first_pending_deadline: Option<NaiveDate>,
    pub completed_count: usize,
    pub pending_count: usize,
}

impl TaskView {
    pub fn build(task: &Task) -> Self {
        let next_action = task
            .actions
            .iter()
            .filter(|a| a.is_pending())
            .min_by_key(|a| a.sequence_order)
            .cloned();

        Self {
            next_action,
            first_pending_deadline: first_pending_deadline(task),
            completed_count: task
                .actions
                .iter()
                .filter(|a| a.is_active() && a.status.is_done())
                .count(),
            pending_count: task.actions.iter().filter(|a| a.is_pending()).count(),
        }
    }
}

/// Due date of the first pending action by creation order (the order
/// actions arrive in the snapshot), not by sequence order. May be None
/// even when a later pending action carries a date.
pub fn first_pending_deadline(task: &Task) -> Option<NaiveDate> {
    task.actions
        .iter()
        .find(|a| a.is_pending())
        .and_then(|a| a.due_date)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineState {
    Overdue,
    DueToday,
    Upcoming,
}

/// Banner state for a task's first pending deadline. None when the
/// task is done or carries no resolvable deadline.
pub fn deadline_state(task: &Task, today: NaiveDate) -> Option<DeadlineState> {
    if task.status.is_done() {
        return None;
    }
    let deadline = first_pending_deadline(task)?;
    Some(if deadline < today {
        DeadlineState::Overdue
    } else if deadline == today {
        DeadlineState::DueToday
    } else {
        DeadlineState::Upcoming
    })
}

/// Header counters for a task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub pending: usize,
    pub urgent: usize,
    pub overdue: usize,
}

impl TaskCounts {
    pub fn tally(tasks: &[Task], today: NaiveDate) -> Self {
        Self {
            total: tasks.len(),
            pending: tasks.iter().filter(|t| !t.status.is_done()).count(),
            urgent: tasks
                .iter()
                .filter(|t| t.priority == Priority::Urgent && !t.status.is_done())
                .count(),
            overdue: tasks
                .iter()
                .filter(|t| deadline_state(t, today) == Some(DeadlineState::Overdue))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::ActionStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_with_actions(actions: Vec<Action>) -> Task {
        let mut task = Task::new("u1", "test");
        task.actions = actions;
        task
    }

    #[test]
    fn next_action_is_lowest_pending_sequence() {
        let task_id = uuid::Uuid::new_v4();
        let mut done = Action::new(task_id, "APPELER", 1);
        done.complete();
        let pending = Action::new(task_id, "CONTROLER", 2);
        let task = task_with_actions(vec![done, pending]);

        let view = TaskView::build(&task);
        let next = view.next_action.unwrap();
        assert_eq!(next.sequence_order, 2);
        assert_eq!(next.action, "CONTROLER");
        assert_eq!(view.completed_count, 1);
        assert_eq!(view.pending_count, 1);
    }

    #[test]
    fn next_action_none_when_all_done() {
        let task_id = uuid::Uuid::new_v4();
        let mut a = Action::new(task_id, "APPELER", 1);
        a.complete();
        let task = task_with_actions(vec![a]);
        assert!(TaskView::build(&task).next_action.is_none());
    }

    #[test]
    fn first_pending_deadline_uses_creation_order() {
        let task_id = uuid::Uuid::new_v4();
        // First action in creation order has no date; a later pending
        // one does. The derived deadline stays absent.
        let undated = Action::new(task_id, "APPELER", 2);
        let mut dated = Action::new(task_id, "CONTROLER", 1);
        dated.due_date = Some(date(2026, 9, 1));
        let task = task_with_actions(vec![undated, dated]);
        assert_eq!(first_pending_deadline(&task), None);
    }

    #[test]
    fn deadline_states() {
        let today = date(2026, 8, 23);
        let task_id = uuid::Uuid::new_v4();

        let mut a = Action::new(task_id, "APPELER", 1);
        a.due_date = Some(date(2026, 8, 22));
        let task = task_with_actions(vec![a.clone()]);
        assert_eq!(deadline_state(&task, today), Some(DeadlineState::Overdue));

        a.due_date = Some(today);
        let task = task_with_actions(vec![a.clone()]);
        assert_eq!(deadline_state(&task, today), Some(DeadlineState::DueToday));

        a.due_date = Some(date(2026, 8, 25));
        let task = task_with_actions(vec![a.clone()]);
        assert_eq!(deadline_state(&task, today), Some(DeadlineState::Upcoming));

        a.status = ActionStatus::Done;
        let task = task_with_actions(vec![a]);
        assert_eq!(deadline_state(&task, today), None);
    }

    #[test]
    fn soft_deleted_actions_are_invisible() {
        let task_id = uuid::Uuid::new_v4();
        let mut tombstoned = Action::new(task_id, "APPELER", 1);
        tombstoned.due_date = Some(date(2026, 8, 1));
        tombstoned.deleted = Some(chrono::Local::now().naive_local());
        let task = task_with_actions(vec![tombstoned]);

        let view = TaskView::build(&task);
        assert!(view.next_action.is_none());
        assert_eq!(view.pending_count, 0);
        assert_eq!(first_pending_deadline(&task), None);
    }

    #[test]
    fn tally_counts() {
        let today = date(2026, 8, 23);
        let mut urgent = Task::new("u1", "a");
        urgent.priority = Priority::Urgent;
        let mut overdue = Task::new("u1", "b");
        let mut act = Action::new(overdue.id, "APPELER", 1);
        act.due_date = Some(date(2026, 8, 20));
        overdue.actions.push(act);
        let mut done = Task::new("u1", "c");
        done.complete();

        let counts = TaskCounts::tally(&[urgent, overdue, done], today);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.urgent, 1);
        assert_eq!(counts.overdue, 1);
    }
}
