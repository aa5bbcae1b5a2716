use std::collections::HashMap;

use uuid::Uuid;

use crate::core::action::Action;
use crate::core::category::{ActionTemplate, Category};
use crate::core::task::Task;

use super::{DocumentStore, StoreError, StoreResult, TaskCallback};

/// In-memory document store: the reference stand-in for the hosted
/// backend, with the same listener semantics (every mutation replays
/// a full active snapshot to each subscriber).
#[derive(Default)]
pub struct MemoryStore {
    tasks: HashMap<Uuid, Task>,
    actions: HashMap<Uuid, Action>,
    categories: HashMap<Uuid, Category>,
    templates: HashMap<Uuid, ActionTemplate>,
    subscribers: Vec<(String, TaskCallback)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active tasks for an owner, newest first, with their active
    /// actions embedded in creation order.
    fn task_snapshot(&self, owner: &str) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|t| t.owner == owner && t.is_active())
            .cloned()
            .collect();

        for task in &mut tasks {
            task.actions = self.action_snapshot(task.id);
        }
        tasks.sort_by(|a, b| b.created.cmp(&a.created));
        tasks
    }

    fn action_snapshot(&self, task_id: Uuid) -> Vec<Action> {
        let mut actions: Vec<Action> = self
            .actions
            .values()
            .filter(|a| a.task_id == task_id && a.is_active())
            .cloned()
            .collect();
        actions.sort_by(|a, b| a.created.cmp(&b.created));
        actions
    }

    fn notify(&mut self) {
        let owners: Vec<String> = self
            .subscribers
            .iter()
            .map(|(owner, _)| owner.clone())
            .collect();
        let mut snapshots: HashMap<String, Vec<Task>> = HashMap::new();
        for owner in &owners {
            if !snapshots.contains_key(owner) {
                snapshots.insert(owner.clone(), self.task_snapshot(owner));
            }
        }

        log::debug!("notifying {} task subscriber(s)", self.subscribers.len());
        for (owner, callback) in &mut self.subscribers {
            if let Some(snapshot) = snapshots.get(owner) {
                callback(snapshot);
            }
        }
    }
}

impl DocumentStore for MemoryStore {
    fn create_task(&mut self, task: Task) -> StoreResult<Uuid> {
        let id = task.id;
        let mut stored = task;
        // Actions live in their own collection.
        stored.actions.clear();
        self.tasks.insert(id, stored);
        self.notify();
        Ok(id)
    }

    fn update_task(&mut self, task: Task) -> StoreResult<()> {
        match self.tasks.get(&task.id) {
            Some(existing) if existing.is_active() => {}
            _ => return Err(StoreError::NotFound(task.id)),
        }
        let mut stored = task;
        stored.actions.clear();
        stored.updated = chrono::Local::now().naive_local();
        self.tasks.insert(stored.id, stored);
        self.notify();
        Ok(())
    }

    fn soft_delete_task(&mut self, id: Uuid) -> StoreResult<()> {
        let task = self.tasks.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let now = chrono::Local::now().naive_local();
        task.deleted = Some(now);
        task.updated = now;
        self.notify();
        Ok(())
    }

    fn task(&self, id: Uuid) -> StoreResult<Task> {
        let mut task = self
            .tasks
            .get(&id)
            .filter(|t| t.is_active())
            .cloned()
            .ok_or(StoreError::NotFound(id))?;
        task.actions = self.action_snapshot(id);
        Ok(task)
    }

    fn tasks(&self, owner: &str) -> StoreResult<Vec<Task>> {
        Ok(self.task_snapshot(owner))
    }

    fn subscribe_tasks(&mut self, owner: &str, mut callback: TaskCallback) {
        callback(&self.task_snapshot(owner));
        self.subscribers.push((owner.to_string(), callback));
    }

    fn create_action(&mut self, action: Action) -> StoreResult<Uuid> {
        match self.tasks.get(&action.task_id) {
            Some(parent) if parent.is_active() => {}
            _ => return Err(StoreError::NotFound(action.task_id)),
        }
        let id = action.id;
        self.actions.insert(id, action);
        self.notify();
        Ok(id)
    }

    fn update_action(&mut self, action: Action) -> StoreResult<()> {
        match self.actions.get(&action.id) {
            Some(existing) if existing.is_active() => {}
            _ => return Err(StoreError::NotFound(action.id)),
        }
        let mut stored = action;
        stored.updated = chrono::Local::now().naive_local();
        self.actions.insert(stored.id, stored);
        self.notify();
        Ok(())
    }

    fn soft_delete_action(&mut self, id: Uuid) -> StoreResult<()> {
        let action = self.actions.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let now = chrono::Local::now().naive_local();
        action.deleted = Some(now);
        action.updated = now;
        self.notify();
        Ok(())
    }

    fn action(&self, id: Uuid) -> StoreResult<Action> {
        self.actions
            .get(&id)
            .filter(|a| a.is_active())
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn task_actions(&self, task_id: Uuid) -> StoreResult<Vec<Action>> {
        Ok(self.action_snapshot(task_id))
    }

    fn create_category(&mut self, category: Category) -> StoreResult<Uuid> {
        let id = category.id;
        self.categories.insert(id, category);
        Ok(id)
    }

    fn soft_delete_category(&mut self, id: Uuid) -> StoreResult<()> {
        let category = self
            .categories
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        category.deleted = Some(chrono::Local::now().naive_local());
        Ok(())
    }

    fn categories(&self, owner: &str) -> StoreResult<Vec<Category>> {
        let mut categories: Vec<Category> = self
            .categories
            .values()
            .filter(|c| c.owner == owner && c.is_active())
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.rank);
        Ok(categories)
    }

    fn create_template(&mut self, template: ActionTemplate) -> StoreResult<Uuid> {
        let id = template.id;
        self.templates.insert(id, template);
        Ok(id)
    }

    fn soft_delete_template(&mut self, id: Uuid) -> StoreResult<()> {
        let template = self
            .templates
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        template.deleted = Some(chrono::Local::now().naive_local());
        Ok(())
    }

    fn templates(&self, owner: &str) -> StoreResult<Vec<ActionTemplate>> {
        let mut templates: Vec<ActionTemplate> = self
            .templates
            .values()
            .filter(|t| t.owner == owner && t.is_active())
            .cloned()
            .collect();
        templates.sort_by_key(|t| t.rank);
        Ok(templates)
    }
}
