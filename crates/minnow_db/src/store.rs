//! One-file-per-record disk store.
//!
//! Layout for a store rooted at `db/notes` with three records:
//!
//! ```text
//! db/notes/
//! ├─ 1.ddps
//! ├─ 2.ddps
//! └─ 3.ddps
//! ```
//!
//! Each file holds exactly the record's serialized text, UTF-8, no
//! envelope. All mutations go through the store's [`ActionQueue`], so
//! only the worker thread ever touches the files and writes for a
//! store are never interleaved.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::{DbError, DbResult};
use crate::queue::ActionQueue;
use crate::record::DiskRecord;

/// Default suffix applied to every record file.
pub const RECORD_FILE_SUFFIX: &str = ".ddps";

/// Configuration for a [`DiskStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding one file per record.
    pub directory: PathBuf,
    /// File suffix for record files.
    pub suffix: String,
}

impl StoreConfig {
    /// Creates a configuration for the given directory with the default
    /// suffix.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            suffix: RECORD_FILE_SUFFIX.to_string(),
        }
    }

    /// Sets the record file suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

/// Persists records of type `T` as individual files in one directory.
///
/// Mutating calls (`persist`, `update`, `delete`) only enqueue work and
/// return immediately; the store's worker thread performs the disk I/O
/// in submission order. Durability for queued work requires calling
/// [`stop`](DiskStore::stop) before process exit.
///
/// [`load_all`](DiskStore::load_all) is synchronous and meant for
/// startup, before any writers are active; reading concurrently with
/// pending writes may observe a stale snapshot.
pub struct DiskStore<T: DiskRecord> {
    config: StoreConfig,
    queue: ActionQueue,
    _record: PhantomData<fn() -> T>,
}

impl<T: DiskRecord> DiskStore<T> {
    /// Creates a store over the given directory.
    ///
    /// Construction always succeeds synchronously. Directory creation is
    /// scheduled on the queue; if it fails, the failure is logged
    /// asynchronously and later writes will surface their own errors.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_config(StoreConfig::new(directory))
    }

    /// Creates a store from an explicit configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        let queue = ActionQueue::new(format!("store writer {}", config.directory.display()));

        let directory = config.directory.clone();
        queue.enqueue(
            format!("create directory {}", directory.display()),
            move || {
                if let Err(err) = fs::create_dir_all(&directory) {
                    error!(
                        directory = %directory.display(),
                        error = %err,
                        "failed to create store directory"
                    );
                }
                Ok(())
            },
        );

        Self {
            config,
            queue,
            _record: PhantomData,
        }
    }

    /// Returns the directory this store owns.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    fn record_path(&self, index: u64) -> PathBuf {
        self.config
            .directory
            .join(format!("{}{}", index, self.config.suffix))
    }

    /// Writes a record to disk, overwriting any existing file for its
    /// index.
    ///
    /// There is no existence check: a second `persist` for the same
    /// index silently overwrites, and because the queue is FIFO the
    /// last-submitted value wins.
    pub fn persist(&self, record: &T) {
        let path = self.record_path(record.index());
        let text = record.serialize();
        self.queue
            .enqueue(format!("persist record to {}", path.display()), move || {
                fs::write(&path, text)?;
                Ok(())
            });
    }

    /// Overwrites a record that must already exist on disk.
    ///
    /// If the file is missing when the queued action runs, the action
    /// fails with [`DbError::UpdateMissingFile`]; the worker logs it as
    /// a usage error. The calling thread has already returned, so the
    /// failure cannot raise here.
    pub fn update(&self, record: &T) {
        let path = self.record_path(record.index());
        let text = record.serialize();
        self.queue
            .enqueue(format!("update record at {}", path.display()), move || {
                if !path.exists() {
                    return Err(DbError::UpdateMissingFile { path });
                }
                fs::write(&path, text)?;
                Ok(())
            });
    }

    /// Removes a record's file from disk, best effort.
    ///
    /// A failed removal (file already gone, permissions) is logged and
    /// swallowed, making delete idempotent from the caller's view.
    pub fn delete(&self, record: &T) {
        let path = self.record_path(record.index());
        self.queue
            .enqueue(format!("delete record at {}", path.display()), move || {
                if let Err(err) = fs::remove_file(&path) {
                    error!(
                        path = %path.display(),
                        error = %err,
                        "failed to delete record file"
                    );
                }
                Ok(())
            });
    }

    /// Reads every record file in the directory and deserializes it.
    ///
    /// Startup-only: call before any writers are active. A missing
    /// directory yields an empty collection, since a fresh store has no
    /// prior data. Blank files are skipped as incomplete writes. One
    /// file that fails to deserialize aborts the whole load with the
    /// offending path and content; partial loads would hide corruption.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Deserialize`] for a corrupt file, or
    /// [`DbError::Io`] if the directory walk or a file read fails.
    pub fn load_all(&self) -> DbResult<Vec<T>> {
        if !self.config.directory.exists() {
            debug!(
                directory = %self.config.directory.display(),
                "store directory missing, loading empty record set"
            );
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&self.config.directory)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                debug!(path = %path.display(), "record file exists but is blank, skipping");
                continue;
            }
            match T::deserialize(&content) {
                Ok(record) => records.push(record),
                Err(err) => {
                    return Err(DbError::Deserialize {
                        path,
                        content,
                        reason: err.to_string(),
                    })
                }
            }
        }
        Ok(records)
    }

    /// Drains the write queue and stops the worker.
    ///
    /// Blocks until every queued write has hit the filesystem. Must be
    /// called before process exit; the store holds no durability
    /// guarantee for work still queued when the process dies.
    pub fn stop(&self) {
        self.queue.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeserializeError;
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    struct Note {
        id: u64,
        title: String,
        done: bool,
    }

    impl Note {
        fn new(id: u64, title: &str) -> Self {
            Self {
                id,
                title: title.to_string(),
                done: false,
            }
        }
    }

    impl DiskRecord for Note {
        fn index(&self) -> u64 {
            self.id
        }

        fn serialize(&self) -> String {
            serde_json::to_string(self).unwrap()
        }

        fn deserialize(text: &str) -> Result<Self, DeserializeError> {
            serde_json::from_str(text).map_err(|e| DeserializeError::new(e.to_string()))
        }
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store: DiskStore<Note> = DiskStore::new(dir.path().join("notes"));

        let note = Note::new(1, "buy milk");
        store.persist(&note);
        store.stop();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, vec![note]);
    }

    #[test]
    fn persist_writes_expected_file() {
        let dir = tempdir().unwrap();
        let store: DiskStore<Note> = DiskStore::new(dir.path().join("notes"));

        let note = Note::new(42, "answer");
        store.persist(&note);
        store.stop();

        let path = dir.path().join("notes").join("42.ddps");
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content, note.serialize());
    }

    #[test]
    fn repeat_persist_last_value_wins() {
        let dir = tempdir().unwrap();
        let store: DiskStore<Note> = DiskStore::new(dir.path().join("notes"));

        store.persist(&Note::new(1, "first"));
        store.persist(&Note::new(1, "second"));
        store.stop();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "second");
    }

    #[test]
    fn update_overwrites_existing_record() {
        let dir = tempdir().unwrap();
        let store: DiskStore<Note> = DiskStore::new(dir.path().join("notes"));

        store.persist(&Note::new(1, "draft"));
        let mut revised = Note::new(1, "final");
        revised.done = true;
        store.update(&revised);
        store.stop();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, vec![revised]);
    }

    #[test]
    fn update_of_missing_record_writes_nothing() {
        let dir = tempdir().unwrap();
        let store: DiskStore<Note> = DiskStore::new(dir.path().join("notes"));

        store.update(&Note::new(9, "never persisted"));
        store.stop();

        // The invariant failure is logged by the worker; no file appears
        // and the caller was never raised to.
        assert!(!dir.path().join("notes").join("9.ddps").exists());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn delete_removes_the_record_file() {
        let dir = tempdir().unwrap();
        let store: DiskStore<Note> = DiskStore::new(dir.path().join("notes"));

        let note = Note::new(3, "ephemeral");
        store.persist(&note);
        store.delete(&note);
        store.stop();

        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn delete_of_never_persisted_record_is_harmless() {
        let dir = tempdir().unwrap();
        let store: DiskStore<Note> = DiskStore::new(dir.path().join("notes"));

        let kept = Note::new(1, "kept");
        store.persist(&kept);
        store.delete(&Note::new(2, "never existed"));
        store.stop();

        assert_eq!(store.load_all().unwrap(), vec![kept]);
    }

    #[test]
    fn load_from_missing_directory_is_empty() {
        let dir = tempdir().unwrap();
        // A regular file where the parent directory should go makes the
        // queued create_dir_all fail; the store logs it and carries on.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let store: DiskStore<Note> = DiskStore::new(blocker.join("notes"));
        store.stop();

        let loaded = store.load_all().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn blank_file_is_skipped_as_tombstone() {
        let dir = tempdir().unwrap();
        let notes_dir = dir.path().join("notes");
        let store: DiskStore<Note> = DiskStore::new(&notes_dir);

        store.persist(&Note::new(1, "real"));
        store.stop();
        fs::write(notes_dir.join("2.ddps"), "   \n").unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 1);
    }

    #[test]
    fn corrupt_file_aborts_the_whole_load() {
        let dir = tempdir().unwrap();
        let notes_dir = dir.path().join("notes");
        let store: DiskStore<Note> = DiskStore::new(&notes_dir);

        store.persist(&Note::new(1, "fine"));
        store.stop();
        fs::write(notes_dir.join("2.ddps"), "not json at all").unwrap();

        let err = store.load_all().unwrap_err();
        match err {
            DbError::Deserialize { path, content, .. } => {
                assert!(path.ends_with("2.ddps"));
                assert_eq!(content, "not json at all");
            }
            other => panic!("expected Deserialize error, got {other}"),
        }
    }

    #[test]
    fn custom_suffix_is_honored() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("notes")).with_suffix(".rec");
        let store: DiskStore<Note> = DiskStore::with_config(config);

        store.persist(&Note::new(5, "suffixed"));
        store.stop();

        assert!(dir.path().join("notes").join("5.rec").exists());
    }

    #[test]
    fn concurrent_persist_of_distinct_indices() {
        let dir = tempdir().unwrap();
        let store: Arc<DiskStore<Note>> = Arc::new(DiskStore::new(dir.path().join("notes")));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..25 {
                        let id = t * 100 + i;
                        store.persist(&Note::new(id, &format!("note {id}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        store.stop();

        let mut loaded = store.load_all().unwrap();
        loaded.sort_by_key(|n| n.id);
        assert_eq!(loaded.len(), 100);
        for note in &loaded {
            assert_eq!(note.title, format!("note {}", note.id));
        }
    }

    #[test]
    fn per_index_updates_reflect_last_submission() {
        let dir = tempdir().unwrap();
        let store: DiskStore<Note> = DiskStore::new(dir.path().join("notes"));

        store.persist(&Note::new(1, "v1"));
        for v in 2..=20 {
            store.update(&Note::new(1, &format!("v{v}")));
        }
        store.stop();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "v20");
    }

    mod round_trip {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn serialize_deserialize_law(id in any::<u64>(), title in ".*", done in any::<bool>()) {
                let note = Note { id, title, done };
                let back = Note::deserialize(&note.serialize()).unwrap();
                prop_assert_eq!(note, back);
            }
        }
    }
}
