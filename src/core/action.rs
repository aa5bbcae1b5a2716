use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Todo,
    Done,
}

impl ActionStatus {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Done => "done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// A single step in a task's life: one normalized action verb plus its
/// context, deadline and position in the task's sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: Uuid,
    pub task_id: Uuid,
    /// The raw input line the action was parsed from, when it came
    /// from the free-text parser.
    pub original_text: Option<String>,
    pub action: String,
    pub context: Option<String>,
    pub notes: Option<String>,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub status: ActionStatus,
    /// 1-based position within the task. Unique per task; assigned
    /// max existing + 1 at creation, rewritten wholesale on reorder.
    pub sequence_order: u32,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub completed: Option<NaiveDateTime>,
    pub deleted: Option<NaiveDateTime>,
}

impl Action {
    pub fn new(task_id: Uuid, action: impl Into<String>, sequence_order: u32) -> Self {
        let now = chrono::Local::now().naive_local();
        Self {
            id: Uuid::new_v4(),
            task_id,
            original_text: None,
            action: action.into(),
            context: None,
            notes: None,
            priority: Priority::Normal,
            due_date: None,
            status: ActionStatus::Todo,
            sequence_order,
            created: now,
            updated: now,
            completed: None,
            deleted: None,
        }
    }

    pub fn complete(&mut self) {
        let now = chrono::Local::now().naive_local();
        self.status = ActionStatus::Done;
        self.completed = Some(now);
        self.updated = now;
    }

    pub fn is_active(&self) -> bool {
        self.deleted.is_none()
    }

    pub fn is_pending(&self) -> bool {
        self.is_active() && !self.status.is_done()
    }
}
