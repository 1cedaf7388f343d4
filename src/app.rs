// Composition root: owns the task list, theme and active filter

use crate::config::{Backend, Config};
use crate::file_kv::FileKv;
use crate::filter::FilterOption;
use crate::input::TaskInput;
use crate::kv::{KvBackend, TASKS_KEY, THEME_KEY};
use crate::models::Task;
use crate::sqlite_kv::SqliteKv;
use crate::store::{KvStore, Store};
use crate::tasks::TaskList;
use crate::theme::Theme;
use chrono::{Datelike, NaiveDate};
use eyre::{Result, eyre};
use std::rc::Rc;

const QUOTES: [&str; 4] = [
    "Small steps every day add up to big results.",
    "Focus on progress, not perfection.",
    "Your future self will thank you.",
    "Done is better than perfect.",
];

/// Shown when a view has no tasks
pub const EMPTY_MESSAGE: &str = "You're all caught up. Add a new task to get started.";

/// App wired to a durable substrate
pub type PersistentApp = App<KvStore<Vec<Task>>, KvStore<bool>>;

/// Counts shown next to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// All session state, passed explicitly to whatever renders it
///
/// Task records are only reachable read-only; every change goes through the
/// methods here.
pub struct App<T: Store<Vec<Task>>, P: Store<bool>> {
    tasks: TaskList<T>,
    theme: Theme<P>,
    filter: FilterOption,
}

impl App<KvStore<Vec<Task>>, KvStore<bool>> {
    /// Open the configured substrate and load state from it
    pub fn open(config: &Config) -> Result<PersistentApp> {
        let backend: Rc<dyn KvBackend> = match config.backend {
            Backend::File => Rc::new(FileKv::open(&config.data_dir)?),
            Backend::Sqlite => Rc::new(SqliteKv::open(&config.data_dir)?),
        };
        Ok(Self::with_backend(backend))
    }

    /// Bind both persisted keys to one substrate
    pub fn with_backend(backend: Rc<dyn KvBackend>) -> PersistentApp {
        App::new(
            KvStore::new(backend.clone(), TASKS_KEY, Vec::new()),
            KvStore::new(backend, THEME_KEY, false),
        )
    }
}

impl<T: Store<Vec<Task>>, P: Store<bool>> App<T, P> {
    pub fn new(task_store: T, theme_store: P) -> Self {
        Self {
            tasks: TaskList::load(task_store),
            theme: Theme::load(theme_store),
            filter: FilterOption::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    /// Tasks passing the active filter
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks.filtered(self.filter)
    }

    pub fn filter(&self) -> FilterOption {
        self.filter
    }

    pub fn select_filter(&mut self, filter: FilterOption) {
        self.filter = filter;
    }

    pub fn theme(&self) -> &Theme<P> {
        &self.theme
    }

    /// Flip the theme, returning whether dark mode is now on
    pub fn toggle_theme(&mut self) -> bool {
        self.theme.toggle()
    }

    pub fn add_task(&mut self, input: TaskInput) -> String {
        self.tasks.add(input.title, input.description)
    }

    pub fn toggle_task(&mut self, id: &str) {
        self.tasks.toggle(id);
    }

    pub fn update_task(&mut self, id: &str, input: TaskInput) {
        self.tasks.update(id, input.title, input.description);
    }

    pub fn delete_task(&mut self, id: &str) {
        self.tasks.delete(id);
    }

    pub fn clear_completed(&mut self) -> usize {
        self.tasks.clear_completed()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total: self.tasks.len(),
            active: self.tasks.active_count(),
            completed: self.tasks.completed_count(),
        }
    }

    /// Expand a full id or unique id prefix to the task's id
    pub fn resolve_id(&self, prefix: &str) -> Result<String> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(eyre!("Task id cannot be empty"));
        }
        if let Some(task) = self.tasks.get(prefix) {
            return Ok(task.id.clone());
        }

        let matches: Vec<&Task> = self
            .tasks()
            .iter()
            .filter(|t| t.id.starts_with(prefix))
            .collect();

        match matches.as_slice() {
            [task] => Ok(task.id.clone()),
            [] => Err(eyre!("No task matches id {}", prefix)),
            _ => Err(eyre!("Id prefix {} is ambiguous ({} tasks match)", prefix, matches.len())),
        }
    }
}

/// Quote of the day, rotating by day of month
pub fn quote_for(date: NaiveDate) -> &'static str {
    QUOTES[date.day() as usize % QUOTES.len()]
}

/// e.g. "Friday, May 3"
pub fn date_heading(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}
