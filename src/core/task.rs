use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    Normal,
}

impl Priority {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Normal => "normal",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "urgent" => Some(Self::Urgent),
            "normal" => Some(Self::Normal),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub owner: String,
    pub title: String,
    pub category_id: Option<Uuid>,
    pub patient_initials: Option<String>,
    pub patient_number: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub recurring: bool,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
    pub completed: Option<NaiveDateTime>,
    /// Soft-delete tombstone. Tombstoned tasks are filtered out at the
    /// store boundary and never reach the engine.
    pub deleted: Option<NaiveDateTime>,
    /// Embedded action list, in creation order. Owned by the actions
    /// collection; the store fills this in when delivering snapshots.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Task {
    pub fn new(owner: impl Into<String>, title: impl Into<String>) -> Self {
        let now = chrono::Local::now().naive_local();
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            title: title.into(),
            category_id: None,
            patient_initials: None,
            patient_number: None,
            priority: Priority::Normal,
            status: TaskStatus::Todo,
            recurring: false,
            created: now,
            updated: now,
            completed: None,
            deleted: None,
            actions: Vec::new(),
        }
    }

    pub fn complete(&mut self) {
        let now = chrono::Local::now().naive_local();
        self.status = TaskStatus::Done;
        self.completed = Some(now);
        self.updated = now;
    }

    pub fn is_active(&self) -> bool {
        self.deleted.is_none()
    }
}
