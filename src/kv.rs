// Typed, fail-soft bridge over a durable key-value substrate

use eyre::{Result, eyre};
use serde::{Serialize, de::DeserializeOwned};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Key holding the ordered task collection
pub const TASKS_KEY: &str = "codex.tasks";

/// Key holding the dark-theme flag
pub const THEME_KEY: &str = "codex.theme.dark";

/// Raw string storage keyed by fixed identifiers
///
/// Implementations report substrate failures; callers that must never fail
/// go through [`read`] and [`write`] instead.
pub trait KvBackend {
    /// Fetch the raw value stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Read and decode `key`, falling back to `default` when it is absent,
/// unreadable or does not parse as `T`
pub fn read<T: DeserializeOwned>(backend: &dyn KvBackend, key: &str, default: T) -> T {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored value, using default");
            return default;
        }
        Err(e) => {
            warn!(key, error = ?e, "Failed to read stored value, using default");
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = ?e, "Failed to parse stored value, using default");
            default
        }
    }
}

/// Encode `value` and store it under `key`; failures are logged and dropped
pub fn write<T: Serialize + ?Sized>(backend: &dyn KvBackend, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            warn!(key, error = ?e, "Failed to serialize value, not persisting");
            return;
        }
    };

    if let Err(e) = backend.set(key, &json) {
        warn!(key, error = ?e, "Failed to persist value, keeping in-memory state");
    }
}

/// Validate a storage key
///
/// Keys become file names for the file backend, so they are restricted to a
/// safe character set.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(eyre!("Storage key cannot be empty"));
    }
    if key.len() > 128 {
        return Err(eyre!("Storage key too long: {} (max 128 chars)", key));
    }
    if key.starts_with('.') {
        return Err(eyre!("Storage key cannot start with '.': {}", key));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
    {
        return Err(eyre!("Invalid storage key: {} (must be alphanumeric with ./_/-)", key));
    }
    Ok(())
}

/// In-process substrate, used by tests and as a scratch backend
///
/// An optional quota (in bytes, summed over all stored values) makes writes
/// fail once exceeded, the way a full browser storage area would.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl KvBackend for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;

        if let Some(quota) = self.quota {
            let needed = self.used_without(key) + value.len();
            if needed > quota {
                return Err(eyre!(
                    "Storage quota exceeded: {} bytes needed, {} allowed",
                    needed,
                    quota
                ));
            }
        }

        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
