use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::task::{Priority, Task, TaskStatus};
use super::view::first_pending_deadline;

/// Filter dimensions applied to a task list. Each dimension is
/// vacuously true when empty; the four predicates are ANDed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Category-name allowlist.
    pub categories: Vec<String>,
    pub statuses: Vec<TaskStatus>,
    pub priorities: Vec<Priority>,
    /// Substring search over title, patient fields and action texts.
    pub search: String,
}

impl FilterSpec {
    fn matches(&self, task: &Task, categories: &[Category]) -> bool {
        if !self.categories.is_empty() {
            let name = task
                .category_id
                .and_then(|id| categories.iter().find(|c| c.id == id))
                .map(|c| c.name.as_str());
            match name {
                Some(name) if self.categories.iter().any(|c| c == name) => {}
                _ => return false,
            }
        }

        if !self.statuses.is_empty() && !self.statuses.contains(&task.status) {
            return false;
        }

        if !self.priorities.is_empty() && !self.priorities.contains(&task.priority) {
            return false;
        }

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let mut haystack = String::new();
            haystack.push_str(&task.title);
            haystack.push(' ');
            if let Some(ref initials) = task.patient_initials {
                haystack.push_str(initials);
                haystack.push(' ');
            }
            if let Some(ref number) = task.patient_number {
                haystack.push_str(number);
                haystack.push(' ');
            }
            for action in task.actions.iter().filter(|a| a.is_active()) {
                haystack.push_str(&action.action);
                haystack.push(' ');
                if let Some(ref ctx) = action.context {
                    haystack.push_str(ctx);
                    haystack.push(' ');
                }
            }
            if !haystack.to_lowercase().contains(&needle) {
                return false;
            }
        }

        true
    }
}

/// Filter and order a task snapshot for display.
///
/// Active tasks passing every filter dimension, sorted: pending before
/// done, then urgent before normal, then earliest first-pending
/// deadline (tasks without one last), then newest created first. The
/// sort is stable.
pub fn select_and_sort(tasks: &[Task], categories: &[Category], filter: &FilterSpec) -> Vec<Task> {
    let mut selected: Vec<Task> = tasks
        .iter()
        .filter(|t| t.is_active() && filter.matches(t, categories))
        .cloned()
        .collect();

    selected.sort_by(compare_tasks);
    selected
}

fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    let done = a.status.is_done().cmp(&b.status.is_done());
    if done != Ordering::Equal {
        return done;
    }

    let priority = a.priority.cmp(&b.priority);
    if priority != Ordering::Equal {
        return priority;
    }

    match (first_pending_deadline(a), first_pending_deadline(b)) {
        (Some(da), Some(db)) if da != db => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => b.created.cmp(&a.created),
    }
}
