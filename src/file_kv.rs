// Directory-backed substrate: one JSON document per key

use crate::kv::{KvBackend, validate_key};
use eyre::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key-value substrate storing each key as `<key>.json` under a directory
///
/// Writes go to `<key>.json.tmp` and are renamed over the document, so a
/// failed write leaves the previously stored value in place.
pub struct FileKv {
    base_path: PathBuf,
}

impl FileKv {
    /// Open or create a file substrate rooted at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create data directory")?;

        info!(data_dir = %base_path.display(), "Opened file store");
        Ok(Self { base_path })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }

    fn write_temp(tmp_path: &Path, file: &mut File, value: &str) -> Result<()> {
        file.set_len(0)?;
        file.write_all(value.as_bytes())
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        file.sync_all()?;
        Ok(())
    }
}

impl KvBackend for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;

        // Documents are only ever replaced by rename, so a plain read sees a whole one
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(key, bytes = content.len(), "Read stored document");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read stored document"),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp_path = self.base_path.join(format!("{}.json.tmp", key));

        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&tmp_path)
            .context("Failed to open temporary document for writing")?;

        // Exclusive lock on the temp file serializes concurrent writers
        file.lock_exclusive().context("Failed to acquire file lock")?;

        if let Err(e) = Self::write_temp(&tmp_path, &mut file, value) {
            drop(file);
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp_path, &path) {
            drop(file);
            let _ = fs::remove_file(&tmp_path);
            return Err(e).context("Failed to replace stored document");
        }

        // Lock is automatically released when file is dropped
        debug!(key, bytes = value.len(), "Wrote stored document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{self, TASKS_KEY, THEME_KEY};
    use crate::models::Task;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested/data");

        let store = FileKv::open(&dir).unwrap();
        assert!(dir.is_dir());
        store.set("k", "1").unwrap();
        assert!(dir.join("k.json").exists());
    }

    #[test]
    fn test_get_missing_key() {
        let temp = TempDir::new().unwrap();
        let store = FileKv::open(temp.path()).unwrap();
        assert!(store.get(THEME_KEY).unwrap().is_none());
    }

    #[test]
    fn test_set_and_get() {
        let temp = TempDir::new().unwrap();
        let store = FileKv::open(temp.path()).unwrap();

        store.set(THEME_KEY, "true").unwrap();
        assert!(temp.path().join("codex.theme.dark.json").exists());
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_set_replaces_longer_value() {
        let temp = TempDir::new().unwrap();
        let store = FileKv::open(temp.path()).unwrap();

        store.set("k", "a much longer previous value").unwrap();
        store.set("k", "[]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = FileKv::open(temp.path()).unwrap();

        store.set(THEME_KEY, "true").unwrap();
        assert!(!temp.path().join("codex.theme.dark.json.tmp").exists());
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let temp = TempDir::new().unwrap();
        let store = FileKv::open(temp.path()).unwrap();

        let tasks = vec![Task::new("a".to_string(), "Saved earlier".to_string(), None)];
        kv::write(&store, TASKS_KEY, &tasks);

        // A directory squatting on the temp path makes the next write fail
        let blocker = temp.path().join("codex.tasks.json.tmp");
        fs::create_dir(&blocker).unwrap();
        assert!(store.set(TASKS_KEY, "[]").is_err());

        // Swallowed by the typed layer too
        kv::write(&store, TASKS_KEY, &Vec::<Task>::new());

        let reopened = FileKv::open(temp.path()).unwrap();
        let loaded: Vec<Task> = kv::read(&reopened, TASKS_KEY, Vec::new());
        assert_eq!(loaded, tasks);
        assert!(blocker.is_dir());
    }

    #[test]
    fn test_rejects_escaping_key() {
        let temp = TempDir::new().unwrap();
        let store = FileKv::open(temp.path()).unwrap();
        assert!(store.set("../outside", "1").is_err());
        assert!(store.get("../outside").is_err());
    }

    #[test]
    fn test_corrupt_document_falls_back() {
        let temp = TempDir::new().unwrap();
        let store = FileKv::open(temp.path()).unwrap();

        fs::write(temp.path().join("codex.tasks.json"), "[{malformed json}").unwrap();
        let tasks: Vec<Task> = kv::read(&store, TASKS_KEY, Vec::new());
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_round_trip_survives_reopen() {
        let temp = TempDir::new().unwrap();
        let tasks = vec![
            Task::new("b".to_string(), "Second".to_string(), Some("details".to_string())),
            Task::new("a".to_string(), "First".to_string(), None),
        ];

        {
            let store = FileKv::open(temp.path()).unwrap();
            kv::write(&store, TASKS_KEY, &tasks);
        }

        let store = FileKv::open(temp.path()).unwrap();
        let loaded: Vec<Task> = kv::read(&store, TASKS_KEY, Vec::new());
        assert_eq!(loaded, tasks);
    }
}
