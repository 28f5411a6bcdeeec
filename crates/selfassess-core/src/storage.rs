//! Key-value storage for survey snapshots.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::snapshot::Snapshot;

/// Where snapshots are kept between runs.
pub trait SnapshotStore {
    /// Persist a snapshot under `key`, replacing any previous one.
    fn save(&mut self, key: &str, snapshot: &Snapshot) -> Result<()>;

    /// Load the snapshot stored under `key`, or `None` if there is none.
    fn load(&self, key: &str) -> Result<Option<Snapshot>>;

    /// Drop the snapshot stored under `key`. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Check that `key` can name a snapshot file: ASCII letters, digits, `-`,
/// `_` and `.`, not starting with `.`.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !key.starts_with('.');
    if !valid {
        anyhow::bail!("invalid storage key: {key:?}");
    }
    Ok(())
}

/// In-memory store holding the serialized JSON, like a browser's local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under a key, bypassing serialization.
    pub fn insert_raw(&mut self, key: &str, raw: impl Into<String>) {
        self.entries.insert(key.to_string(), raw.into());
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, key: &str, snapshot: &Snapshot) -> Result<()> {
        let json = snapshot.to_json()?;
        self.entries.insert(key.to_string(), json);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Snapshot>> {
        self.entries
            .get(key)
            .map(|json| Snapshot::from_json(json).map_err(anyhow::Error::from))
            .transpose()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores each snapshot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&mut self, key: &str, snapshot: &Snapshot) -> Result<()> {
        let path = self.path_for(key)?;
        let json = snapshot.to_json()?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create state directory {}", self.dir.display()))?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<Snapshot>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
        let snapshot = Snapshot::from_json(&content)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
        Ok(Some(snapshot))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("failed to remove snapshot {}", path.display()))?;
        }
        Ok(())
    }
}
