//! Failed-attempt counter storage.
//!
//! The gate never owns its counter. Callers inject an `AttemptStore`, keyed
//! by deployment instance, so the count can live in memory for a single
//! process or on disk across invocations.
//!
//! [`AttemptStore::apply`] is the gate's only write path. It reads the
//! count, decides whether the instance is locked and updates the count in
//! one critical section, so parallel attempts cannot slip past the limit.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{LynxError, Result};
use crate::fs::write_atomic;

/// What [`AttemptStore::apply`] did with one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptRecord {
    /// The instance was already at the limit; the count was left as is.
    Locked(u32),
    /// A failure was recorded; holds the new count.
    Failed(u32),
    /// A success cleared the count.
    Cleared,
}

/// Storage for failed authentication attempts, keyed by instance.
///
/// Implementations must be safe to share between request handlers.
pub trait AttemptStore: Send + Sync {
    /// Current failure count for `instance` (0 if never recorded).
    fn failed_attempts(&self, instance: &str) -> Result<u32>;

    /// Increment the failure count for `instance` and return the new value.
    fn record_failure(&self, instance: &str) -> Result<u32>;

    /// Clear the failure count for `instance`.
    fn reset(&self, instance: &str) -> Result<()>;

    /// Settle one attempt atomically.
    ///
    /// If `instance` already has `max` or more failures nothing changes.
    /// Otherwise a success clears the count and a failure increments it.
    fn apply(&self, instance: &str, max: u32, success: bool) -> Result<AttemptRecord>;
}

fn settle(
    counts: &mut HashMap<String, u32>,
    instance: &str,
    max: u32,
    success: bool,
) -> AttemptRecord {
    let current = counts.get(instance).copied().unwrap_or(0);
    if current >= max {
        return AttemptRecord::Locked(current);
    }
    if success {
        counts.remove(instance);
        return AttemptRecord::Cleared;
    }
    let next = current.saturating_add(1);
    counts.insert(instance.to_string(), next);
    AttemptRecord::Failed(next)
}

/// In-process attempt store.
#[derive(Debug, Default)]
pub struct MemoryAttemptStore {
    counts: Mutex<HashMap<String, u32>>,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, u32>>> {
        self.counts
            .lock()
            .map_err(|_| LynxError::AttemptStore("attempt counter lock poisoned".to_string()))
    }
}

impl AttemptStore for MemoryAttemptStore {
    fn failed_attempts(&self, instance: &str) -> Result<u32> {
        Ok(self.lock()?.get(instance).copied().unwrap_or(0))
    }

    fn record_failure(&self, instance: &str) -> Result<u32> {
        let mut counts = self.lock()?;
        let count = counts.entry(instance.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        Ok(*count)
    }

    fn reset(&self, instance: &str) -> Result<()> {
        self.lock()?.remove(instance);
        Ok(())
    }

    fn apply(&self, instance: &str, max: u32, success: bool) -> Result<AttemptRecord> {
        Ok(settle(&mut *self.lock()?, instance, max, success))
    }
}

/// Attempt store persisted as a JSON object of `instance -> count`.
///
/// Every update rewrites the file atomically. A missing file reads as
/// all-zero counters.
///
/// Updates hold an exclusive lock on a sibling `.lock` file for the whole
/// read-modify-write, so separate processes sharing the file never lose
/// each other's counts. Reads take a shared lock.
#[derive(Debug)]
pub struct FileAttemptStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileAttemptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);
        Self { path, lock_path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_lock_file(&self) -> Result<File> {
        if let Some(parent) = self.lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)?;
        Ok(file)
    }

    fn load(&self) -> Result<HashMap<String, u32>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            LynxError::AttemptStore(format!(
                "Failed to parse attempt store {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn save(&self, counts: &HashMap<String, u32>) -> Result<()> {
        let contents = serde_json::to_vec_pretty(counts)
            .map_err(|e| LynxError::AttemptStore(e.to_string()))?;
        write_atomic(&self.path, &contents)?;
        Ok(())
    }

    fn update<T>(&self, apply: impl FnOnce(&mut HashMap<String, u32>) -> T) -> Result<T> {
        // Released when `lock` is dropped.
        let lock = self.open_lock_file()?;
        lock.lock()?;
        let mut counts = self.load()?;
        let result = apply(&mut counts);
        self.save(&counts)?;
        drop(lock);
        Ok(result)
    }
}

impl AttemptStore for FileAttemptStore {
    fn failed_attempts(&self, instance: &str) -> Result<u32> {
        let lock = self.open_lock_file()?;
        lock.lock_shared()?;
        let count = self.load()?.get(instance).copied().unwrap_or(0);
        drop(lock);
        Ok(count)
    }

    fn record_failure(&self, instance: &str) -> Result<u32> {
        self.update(|counts| {
            let count = counts.entry(instance.to_string()).or_insert(0);
            *count = count.saturating_add(1);
            *count
        })
    }

    fn reset(&self, instance: &str) -> Result<()> {
        self.update(|counts| {
            counts.remove(instance);
        })
    }

    fn apply(&self, instance: &str, max: u32, success: bool) -> Result<AttemptRecord> {
        self.update(|counts| settle(counts, instance, max, success))
    }
}
