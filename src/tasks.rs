// Task collection state with write-through persistence

use crate::filter::{FilterOption, filter};
use crate::models::{Task, normalize_description};
use crate::store::Store;
use tracing::debug;
use uuid::Uuid;

/// Source of fresh task identifiers
pub trait IdGenerator {
    fn generate(&self) -> String;
}

/// Time-ordered UUID v7 identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn generate(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Canonical ordered task collection, newest first
///
/// Every mutation saves the full collection through `S` before returning.
/// Operations on an unknown id do nothing and still count as success.
pub struct TaskList<S: Store<Vec<Task>>> {
    tasks: Vec<Task>,
    store: S,
    ids: Box<dyn IdGenerator>,
}

impl<S: Store<Vec<Task>>> TaskList<S> {
    /// Load the collection from `store`
    pub fn load(store: S) -> Self {
        Self::with_id_generator(store, Box::new(UuidV7Generator))
    }

    pub fn with_id_generator(store: S, ids: Box<dyn IdGenerator>) -> Self {
        let tasks = store.load();
        debug!(count = tasks.len(), "Loaded task collection");
        Self { tasks, store, ids }
    }

    /// Current collection in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn active_count(&self) -> usize {
        self.len() - self.completed_count()
    }

    /// Tasks passing `option`, in collection order
    pub fn filtered(&self, option: FilterOption) -> Vec<&Task> {
        filter(&self.tasks, option)
    }

    /// Prepend a new task and return its id
    ///
    /// The title is taken as given; callers validate it first.
    pub fn add(&mut self, title: impl Into<String>, description: Option<String>) -> String {
        let id = self.fresh_id();
        let task = Task::new(id.clone(), title.into(), description);
        debug!(id = %task.id, "Adding task");

        self.tasks.insert(0, task);
        self.persist();
        id
    }

    /// Flip the completion flag of `id`
    pub fn toggle(&mut self, id: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
            debug!(id, completed = task.completed, "Toggled task");
        } else {
            debug!(id, "toggle: no such task");
        }
        self.persist();
    }

    /// Replace title and description of `id`
    pub fn update(&mut self, id: &str, title: impl Into<String>, description: Option<String>) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.title = title.into();
            task.description = normalize_description(description);
            debug!(id, "Updated task");
        } else {
            debug!(id, "update: no such task");
        }
        self.persist();
    }

    /// Remove `id` from the collection
    pub fn delete(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        debug!(id, removed = before - self.tasks.len(), "Deleted task");
        self.persist();
    }

    /// Remove every completed task, keeping the rest in order
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        debug!(removed, "Cleared completed tasks");
        self.persist();
        removed
    }

    fn persist(&self) {
        self.store.save(&self.tasks);
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = self.ids.generate();
            if self.get(&id).is_none() {
                return id;
            }
            debug!(id = %id, "Generated id already in use, retrying");
        }
    }
}
