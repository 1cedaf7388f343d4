// Write-through persistence policy

use crate::kv::{self, KvBackend};
use serde::{Serialize, de::DeserializeOwned};
use std::cell::RefCell;
use std::rc::Rc;

/// Durable home for one piece of state
///
/// `load` never fails: missing or unreadable state yields the default.
/// `save` never fails either: the caller's in-memory value stays
/// authoritative if persistence is unavailable.
pub trait Store<T> {
    fn load(&self) -> T;

    fn save(&self, value: &T);
}

/// A [`Store`] bound to one fixed key of a shared [`KvBackend`]
pub struct KvStore<T> {
    backend: Rc<dyn KvBackend>,
    key: &'static str,
    default: T,
}

impl<T> KvStore<T> {
    pub fn new(backend: Rc<dyn KvBackend>, key: &'static str, default: T) -> Self {
        Self {
            backend,
            key,
            default,
        }
    }
}

impl<T> Store<T> for KvStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    fn load(&self) -> T {
        kv::read(self.backend.as_ref(), self.key, self.default.clone())
    }

    fn save(&self, value: &T) {
        kv::write(self.backend.as_ref(), self.key, value);
    }
}

/// In-memory [`Store`] fake that also counts saves
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    value: RefCell<T>,
    saves: RefCell<usize>,
}

impl<T: Clone> MemoryStore<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: RefCell::new(initial),
            saves: RefCell::new(0),
        }
    }

    /// Last saved (or initial) value
    pub fn snapshot(&self) -> T {
        self.value.borrow().clone()
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl<T: Clone> Store<T> for MemoryStore<T> {
    fn load(&self) -> T {
        self.value.borrow().clone()
    }

    fn save(&self, value: &T) {
        *self.value.borrow_mut() = value.clone();
        *self.saves.borrow_mut() += 1;
    }
}

/// Lets a caller keep a handle on a store it hands to a `TaskList` or `Theme`
impl<T, S: Store<T> + ?Sized> Store<T> for Rc<S> {
    fn load(&self) -> T {
        (**self).load()
    }

    fn save(&self, value: &T) {
        (**self).save(value)
    }
}
