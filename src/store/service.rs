use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::action::Action;
use crate::core::category::{Category, default_action_templates, default_categories};
use crate::core::task::{Priority, Task};
use crate::parse::ParsedTask;

use super::{DocumentStore, StoreResult};

/// Task and action operations over a document store. Thin: every
/// method is one or two single-document writes, no transactions.
pub struct TaskService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Seed the stock catalogs for a user with none yet.
    pub fn seed_defaults(&mut self, owner: &str) -> StoreResult<()> {
        if self.store.categories(owner)?.is_empty() {
            for category in default_categories(owner) {
                self.store.create_category(category)?;
            }
            log::info!("seeded default categories for {owner}");
        }
        if self.store.templates(owner)?.is_empty() {
            for template in default_action_templates(owner) {
                self.store.create_template(template)?;
            }
            log::info!("seeded default action templates for {owner}");
        }
        Ok(())
    }

    /// Persist a parse result as a task, plus its initial action when
    /// the parse produced a verb.
    ///
    /// The detected category is matched against the real catalog by
    /// name; no match means the task is simply created uncategorized.
    /// The two writes are independent: if the initial action fails the
    /// task stays, and the error is logged and swallowed.
    pub fn create_from_parse(
        &mut self,
        owner: &str,
        parsed: &ParsedTask,
        categories: &[Category],
    ) -> StoreResult<Uuid> {
        let mut task = Task::new(owner, parsed.title.clone());
        task.category_id = parsed
            .detected_category
            .as_ref()
            .and_then(|name| categories.iter().find(|c| c.is_active() && c.name == *name))
            .map(|c| c.id);
        task.patient_initials = parsed.patient_initials.clone();
        task.patient_number = parsed.patient_number.clone();
        task.priority = parsed.priority;

        let task_id = self.store.create_task(task)?;
        log::info!("task created: {task_id}");

        if let Some(ref verb) = parsed.action {
            let initial = self.add_action(
                task_id,
                verb,
                parsed.context.clone(),
                parsed.priority,
                parsed.due_date,
            );
            if let Err(e) = initial {
                log::warn!("initial action for task {task_id} not created: {e}");
            }
        }

        Ok(task_id)
    }

    /// Append an action to a task, sequenced after every existing one.
    pub fn add_action(
        &mut self,
        task_id: Uuid,
        text: &str,
        context: Option<String>,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> StoreResult<Uuid> {
        let existing = self.store.task_actions(task_id)?;
        let next_order = existing
            .iter()
            .map(|a| a.sequence_order)
            .max()
            .unwrap_or(0)
            + 1;

        let mut action = Action::new(task_id, text, next_order);
        action.original_text = Some(text.to_string());
        action.context = context;
        action.priority = priority;
        action.due_date = due_date;
        self.store.create_action(action)
    }

    pub fn complete_action(&mut self, id: Uuid) -> StoreResult<()> {
        let mut action = self.store.action(id)?;
        action.complete();
        self.store.update_action(action)
    }

    pub fn complete_task(&mut self, id: Uuid) -> StoreResult<()> {
        let mut task = self.store.task(id)?;
        task.complete();
        self.store.update_task(task)
    }

    /// Rewrite sequence orders to the 1-based positions of `ids`.
    pub fn reorder_actions(&mut self, ids: &[Uuid]) -> StoreResult<()> {
        for (index, id) in ids.iter().enumerate() {
            let mut action = self.store.action(*id)?;
            action.sequence_order = index as u32 + 1;
            self.store.update_action(action)?;
        }
        log::info!("reordered {} action(s)", ids.len());
        Ok(())
    }

    pub fn delete_task(&mut self, id: Uuid) -> StoreResult<()> {
        self.store.soft_delete_task(id)
    }

    pub fn delete_action(&mut self, id: Uuid) -> StoreResult<()> {
        self.store.soft_delete_action(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::task::TaskStatus;
    use crate::parse::TaskParser;
    use crate::store::memory::MemoryStore;

    fn parser() -> TaskParser {
        let actions: Vec<String> = default_action_templates("u1")
            .into_iter()
            .map(|t| t.name)
            .collect();
        TaskParser::new(&actions, &[])
    }

    fn service() -> TaskService<MemoryStore> {
        let mut service = TaskService::new(MemoryStore::new());
        service.seed_defaults("u1").unwrap();
        service
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()
    }

    #[test]
    fn create_from_parse_spawns_initial_action() {
        let mut service = service();
        let categories = service.store().categories("u1").unwrap();
        let parsed = parser().parse_at("Appeler Mme D. 2022458 résultat ECBU urgent vendredi", today());

        let task_id = service.create_from_parse("u1", &parsed, &categories).unwrap();
        let task = service.store().task(task_id).unwrap();

        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.patient_initials.as_deref(), Some("Mme D."));
        let patient = categories.iter().find(|c| c.name == "Patient").unwrap();
        assert_eq!(task.category_id, Some(patient.id));

        assert_eq!(task.actions.len(), 1);
        let action = &task.actions[0];
        assert_eq!(action.action, "APPELER");
        assert_eq!(action.context.as_deref(), Some("résultat ECBU"));
        assert_eq!(action.sequence_order, 1);
        assert_eq!(
            action.due_date,
            NaiveDate::from_ymd_opt(2026, 8, 28)
        );
    }

    #[test]
    fn create_from_parse_without_action_or_category() {
        let mut service = service();
        let categories = service.store().categories("u1").unwrap();
        let parsed = parser().parse_at("fax au labo", today());

        let task_id = service.create_from_parse("u1", &parsed, &categories).unwrap();
        let task = service.store().task(task_id).unwrap();
        assert_eq!(task.category_id, None);
        assert!(task.actions.is_empty());
    }

    #[test]
    fn unknown_detected_category_leaves_task_uncategorized() {
        let mut service = service();
        // Empty real catalog: the detected name can't resolve.
        let parsed = parser().parse_at("appeler patient", today());
        assert_eq!(parsed.detected_category.as_deref(), Some("Patient"));

        let task_id = service.create_from_parse("u1", &parsed, &[]).unwrap();
        let task = service.store().task(task_id).unwrap();
        assert_eq!(task.category_id, None);
    }

    #[test]
    fn add_action_sequences_after_existing() {
        let mut service = service();
        let task_id = service.store_mut().create_task(Task::new("u1", "t")).unwrap();
        service
            .add_action(task_id, "APPELER", None, Priority::Normal, None)
            .unwrap();
        let second = service
            .add_action(task_id, "CONTROLER", None, Priority::Normal, None)
            .unwrap();

        let action = service.store().action(second).unwrap();
        assert_eq!(action.sequence_order, 2);
    }

    #[test]
    fn reorder_rewrites_one_based_positions() {
        let mut service = service();
        let task_id = service.store_mut().create_task(Task::new("u1", "t")).unwrap();
        let a1 = service.add_action(task_id, "A1", None, Priority::Normal, None).unwrap();
        let a2 = service.add_action(task_id, "A2", None, Priority::Normal, None).unwrap();
        let a3 = service.add_action(task_id, "A3", None, Priority::Normal, None).unwrap();

        service.reorder_actions(&[a3, a1, a2]).unwrap();

        let order = |id| service.store().action(id).unwrap().sequence_order;
        assert_eq!(order(a3), 1);
        assert_eq!(order(a1), 2);
        assert_eq!(order(a2), 3);
    }

    #[test]
    fn complete_task_and_action_stamp_completion() {
        let mut service = service();
        let task_id = service.store_mut().create_task(Task::new("u1", "t")).unwrap();
        let action_id = service
            .add_action(task_id, "APPELER", None, Priority::Normal, None)
            .unwrap();

        service.complete_action(action_id).unwrap();
        service.complete_task(task_id).unwrap();

        let task = service.store().task(task_id).unwrap();
        assert_eq!(task.status, TaskStatus::Done);
        assert!(task.completed.is_some());
        assert!(task.actions[0].completed.is_some());
    }

    /// Delegating store whose action writes always fail, standing in
    /// for a backend outage between the two independent writes.
    struct FlakyActions(MemoryStore);

    impl DocumentStore for FlakyActions {
        fn create_task(&mut self, task: Task) -> StoreResult<Uuid> {
            self.0.create_task(task)
        }
        fn update_task(&mut self, task: Task) -> StoreResult<()> {
            self.0.update_task(task)
        }
        fn soft_delete_task(&mut self, id: Uuid) -> StoreResult<()> {
            self.0.soft_delete_task(id)
        }
        fn task(&self, id: Uuid) -> StoreResult<Task> {
            self.0.task(id)
        }
        fn tasks(&self, owner: &str) -> StoreResult<Vec<Task>> {
            self.0.tasks(owner)
        }
        fn subscribe_tasks(&mut self, owner: &str, callback: crate::store::TaskCallback) {
            self.0.subscribe_tasks(owner, callback)
        }
        fn create_action(&mut self, _action: Action) -> StoreResult<Uuid> {
            Err(crate::store::StoreError::Backend("offline".into()))
        }
        fn update_action(&mut self, action: Action) -> StoreResult<()> {
            self.0.update_action(action)
        }
        fn soft_delete_action(&mut self, id: Uuid) -> StoreResult<()> {
            self.0.soft_delete_action(id)
        }
        fn action(&self, id: Uuid) -> StoreResult<Action> {
            self.0.action(id)
        }
        fn task_actions(&self, task_id: Uuid) -> StoreResult<Vec<Action>> {
            self.0.task_actions(task_id)
        }
        fn create_category(&mut self, category: Category) -> StoreResult<Uuid> {
            self.0.create_category(category)
        }
        fn soft_delete_category(&mut self, id: Uuid) -> StoreResult<()> {
            self.0.soft_delete_category(id)
        }
        fn categories(&self, owner: &str) -> StoreResult<Vec<Category>> {
            self.0.categories(owner)
        }
        fn create_template(&mut self, template: crate::core::category::ActionTemplate) -> StoreResult<Uuid> {
            self.0.create_template(template)
        }
        fn soft_delete_template(&mut self, id: Uuid) -> StoreResult<()> {
            self.0.soft_delete_template(id)
        }
        fn templates(&self, owner: &str) -> StoreResult<Vec<crate::core::category::ActionTemplate>> {
            self.0.templates(owner)
        }
    }

    #[test]
    fn initial_action_failure_keeps_the_task() {
        let mut service = TaskService::new(FlakyActions(MemoryStore::new()));
        let parsed = parser().parse_at("appeler le labo demain", today());
        assert!(parsed.action.is_some());

        let task_id = service.create_from_parse("u1", &parsed, &[]).unwrap();
        let task = service.store().task(task_id).unwrap();
        assert!(task.actions.is_empty());
    }

    #[test]
    fn seed_defaults_is_idempotent() {
        let mut service = service();
        service.seed_defaults("u1").unwrap();
        assert_eq!(service.store().categories("u1").unwrap().len(), 4);
        assert_eq!(service.store().templates("u1").unwrap().len(), 7);
    }
}
