//! Bounded, persisted log of past palettes.
//!
//! The whole log is stored as a single JSON record through a
//! [`HistoryStorage`] backend, most recent entry first.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{PaletteError, Result};
use crate::palette::Palette;
use crate::pipeline::harmony::HarmonyMode;

/// Maximum number of saved palettes.
pub const MAX_HISTORY: usize = 20;

/// An immutable snapshot of a palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPalette {
    pub id: String,
    pub colors: Palette,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmony_type: Option<HarmonyMode>,
}

/// Key-value backend holding the serialized history record.
pub trait HistoryStorage {
    /// The stored record, or `None` if nothing has been written.
    fn load(&self) -> Result<Option<String>>;

    fn save(&mut self, record: &str) -> Result<()>;

    fn clear(&mut self) -> Result<()>;
}

/// History record kept in a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryStorage for FileStorage {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, record: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PaletteError::PersistenceFailure {
                message: format!("failed to create {}: {e}", parent.display()),
            })?;
        }
        std::fs::write(&self.path, record).map_err(|e| PaletteError::PersistenceFailure {
            message: format!("failed to write {}: {e}", self.path.display()),
        })
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PaletteError::PersistenceFailure {
                message: format!("failed to remove {}: {e}", self.path.display()),
            }),
        }
    }
}

/// In-process storage. Can be switched to fail every write, which stands in
/// for an unavailable or full store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Option<String>,
    failing: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
            failing: false,
        }
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            Err(PaletteError::PersistenceFailure {
                message: "storage quota exceeded".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        self.check()?;
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &str) -> Result<()> {
        self.check()?;
        self.record = Some(record.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.check()?;
        self.record = None;
        Ok(())
    }
}

/// Most-recent-first palette log capped at [`MAX_HISTORY`] entries.
pub struct HistoryStore {
    storage: Box<dyn HistoryStorage>,
}

impl HistoryStore {
    pub fn new(storage: Box<dyn HistoryStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileStorage::new(path)))
    }

    /// Snapshot `palette` as the newest entry, evicting the oldest past the cap.
    pub fn append(
        &mut self,
        palette: &Palette,
        harmony_type: Option<HarmonyMode>,
    ) -> Result<SavedPalette> {
        let mut entries = self.read()?;
        let saved = SavedPalette {
            id: Uuid::new_v4().to_string(),
            colors: palette.clone(),
            created_at: Utc::now(),
            harmony_type,
        };
        entries.insert(0, saved.clone());
        entries.truncate(MAX_HISTORY);
        self.write(&entries)?;
        debug!(id = %saved.id, entries = entries.len(), "palette saved to history");
        Ok(saved)
    }

    /// All entries, most recent first. An unreadable record reads as empty.
    pub fn list(&self) -> Vec<SavedPalette> {
        self.read().unwrap_or_else(|e| {
            warn!("failed to read palette history: {e}");
            Vec::new()
        })
    }

    pub fn get(&self, id: &str) -> Option<SavedPalette> {
        self.list().into_iter().find(|p| p.id == id)
    }

    /// Delete the entry with `id`. Missing ids are not an error.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let mut entries = self.read()?;
        entries.retain(|p| p.id != id);
        self.write(&entries)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.storage.clear()
    }

    /// Parsed log. Entries are decoded one at a time so a single bad entry is
    /// dropped without losing the rest. A record that is not a JSON array is
    /// logged and treated as empty.
    fn read(&self) -> Result<Vec<SavedPalette>> {
        let Some(record) = self.storage.load()? else {
            return Ok(Vec::new());
        };
        let raw: Vec<serde_json::Value> = match serde_json::from_str(&record) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("discarding corrupt palette history: {e}");
                return Ok(Vec::new());
            }
        };
        Ok(raw
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("skipping palette history entry {i}: {e}");
                    None
                }
            })
            .collect())
    }

    fn write(&mut self, entries: &[SavedPalette]) -> Result<()> {
        let record = serde_json::to_string(entries)?;
        self.storage.save(&record)
    }
}
