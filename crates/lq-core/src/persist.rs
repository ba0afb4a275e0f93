//! Durable storage for the progress aggregate.
//!
//! Progress is saved as one JSON record under [`STORAGE_KEY`]. A missing or
//! unreadable record is never an error: [`restore`] falls back to fresh
//! defaults.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::ProgressResult;
use crate::progress::Progress;

/// The fixed key progress is stored under.
pub const STORAGE_KEY: &str = "learningquest-progress-v1";

/// A string key-value store.
pub trait KeyValueStore {
    /// Read the value under `key`, if any.
    fn get(&self, key: &str) -> ProgressResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> ProgressResult<()>;

    /// Delete `key`. Deleting a missing key succeeds.
    fn remove(&mut self, key: &str) -> ProgressResult<()>;
}

/// An in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ProgressResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ProgressResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ProgressResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store keeping each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ProgressResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ProgressResult<()> {
        fs::create_dir_all(&self.dir)?;
        // Atomic replace: write a sibling file, then rename over the target.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ProgressResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Read saved progress. Returns `None` when nothing usable is stored.
pub fn restore<S: KeyValueStore + ?Sized>(store: &S) -> Option<Progress> {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no saved progress");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "could not read saved progress, starting fresh");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(progress) => Some(progress),
        Err(e) => {
            warn!(error = %e, "saved progress is corrupt, starting fresh");
            None
        }
    }
}

/// Write progress under [`STORAGE_KEY`].
pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, progress: &Progress) -> ProgressResult<()> {
    let json = serde_json::to_string(progress)?;
    store.set(STORAGE_KEY, &json)
}

/// Delete saved progress.
pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> ProgressResult<()> {
    store.remove(STORAGE_KEY)
}
