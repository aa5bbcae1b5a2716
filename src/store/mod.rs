pub mod memory;
pub mod service;

use thiserror::Error;
use uuid::Uuid;

use crate::core::action::Action;
use crate::core::category::{ActionTemplate, Category};
use crate::core::task::Task;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(Uuid),
    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Snapshot listener for a user's task list, invoked after every
/// change with the fresh active snapshot.
pub type TaskCallback = Box<dyn FnMut(&[Task]) + Send>;

/// Narrow contract over the hosted document store: single-document
/// create/update/soft-delete plus live snapshots, over the three
/// collections (tasks, task actions, catalogs), scoped by owner.
///
/// No transactions: callers composing multiple writes get no
/// atomicity. Tombstoned records are filtered out here, once, so the
/// engine above only ever sees active records.
pub trait DocumentStore {
    fn create_task(&mut self, task: Task) -> StoreResult<Uuid>;
    fn update_task(&mut self, task: Task) -> StoreResult<()>;
    fn soft_delete_task(&mut self, id: Uuid) -> StoreResult<()>;
    fn task(&self, id: Uuid) -> StoreResult<Task>;
    /// Active tasks for an owner, newest first, actions embedded in
    /// creation order.
    fn tasks(&self, owner: &str) -> StoreResult<Vec<Task>>;
    /// Register a listener; it fires immediately with the current
    /// snapshot, then after every mutation.
    fn subscribe_tasks(&mut self, owner: &str, callback: TaskCallback);

    fn create_action(&mut self, action: Action) -> StoreResult<Uuid>;
    fn update_action(&mut self, action: Action) -> StoreResult<()>;
    fn soft_delete_action(&mut self, id: Uuid) -> StoreResult<()>;
    fn action(&self, id: Uuid) -> StoreResult<Action>;
    /// Active actions of a task, in creation order.
    fn task_actions(&self, task_id: Uuid) -> StoreResult<Vec<Action>>;

    fn create_category(&mut self, category: Category) -> StoreResult<Uuid>;
    fn soft_delete_category(&mut self, id: Uuid) -> StoreResult<()>;
    fn categories(&self, owner: &str) -> StoreResult<Vec<Category>>;

    fn create_template(&mut self, template: ActionTemplate) -> StoreResult<Uuid>;
    fn soft_delete_template(&mut self, id: Uuid) -> StoreResult<()>;
    fn templates(&self, owner: &str) -> StoreResult<Vec<ActionTemplate>>;
}
