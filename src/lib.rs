// focuslist - single-user to-do list with write-through local persistence

pub mod app;
pub mod config;
pub mod file_kv;
pub mod filter;
pub mod input;
pub mod kv;
pub mod models;
pub mod sqlite_kv;
pub mod store;
pub mod tasks;
pub mod theme;

// Re-export main types for convenience
pub use app::{App, PersistentApp, Summary};
pub use config::{Backend, Config};
pub use filter::{FilterOption, filter};
pub use input::TaskInput;
pub use kv::{KvBackend, MemoryKv, TASKS_KEY, THEME_KEY};
pub use models::{Task, now_iso};
pub use store::{KvStore, MemoryStore, Store};
pub use tasks::{IdGenerator, TaskList, UuidV7Generator};
pub use theme::Theme;
