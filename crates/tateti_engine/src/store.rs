//! Persistence of the score tally as a single named record.

use crate::{ScoreTally, StoreError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Record name used when none is given.
pub const DEFAULT_RECORD_NAME: &str = "ticTacToeScores";

/// Key-value storage holding one score record.
pub trait ScoreStore {
    /// Reads the record. `Ok(None)` means it was never written.
    fn load(&self) -> Result<Option<ScoreTally>, StoreError>;

    /// Overwrites the record with `tally`.
    fn save(&mut self, tally: &ScoreTally) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> Result<Option<ScoreTally>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, tally: &ScoreTally) -> Result<(), StoreError> {
        (**self).save(tally)
    }
}

/// Score record stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Creating JsonFileStore");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store for record `name` inside `dir`, at `<dir>/<name>.json`.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn in_dir(dir: impl AsRef<Path>, name: &str) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", name)))
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ScoreStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Option<ScoreTally>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No score record yet");
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::new(format!(
                    "Failed to read '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let tally: ScoreTally = serde_json::from_str(&content).map_err(|e| {
            StoreError::new(format!("Corrupt score record '{}': {}", self.path.display(), e))
        })?;

        debug!(x = tally.x(), o = tally.o(), draw = tally.draw(), "Score record loaded");
        Ok(Some(tally))
    }

    #[instrument(skip(self, tally), fields(path = %self.path.display()))]
    fn save(&mut self, tally: &ScoreTally) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(tally)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            warn!(error = %e, "Rename failed, removing temporary record");
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(x = tally.x(), o = tally.o(), draw = tally.draw(), "Score record saved");
        Ok(())
    }
}

/// In-memory score record.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<ScoreTally>,
    fail_saves: bool,
    saves: usize,
}

impl MemoryStore {
    /// Empty store with no record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store already holding `tally`.
    pub fn with_record(tally: ScoreTally) -> Self {
        Self {
            record: Some(tally),
            ..Self::default()
        }
    }

    /// Makes every later `save` fail (or succeed again).
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// The stored record, if any.
    pub fn record(&self) -> Option<ScoreTally> {
        self.record
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<ScoreTally>, StoreError> {
        Ok(self.record)
    }

    fn save(&mut self, tally: &ScoreTally) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::new("Memory store configured to fail"));
        }
        self.record = Some(*tally);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);

        store.save(&ScoreTally::new(1, 2, 3)).unwrap();
        assert_eq!(store.load().unwrap(), Some(ScoreTally::new(1, 2, 3)));
        assert_eq!(store.saves(), 1);
    }

    #[test]
    fn test_memory_store_failure_keeps_old_record() {
        let mut store = MemoryStore::with_record(ScoreTally::new(1, 0, 0));
        store.set_fail_saves(true);

        assert!(store.save(&ScoreTally::new(9, 9, 9)).is_err());
        assert_eq!(store.record(), Some(ScoreTally::new(1, 0, 0)));
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn test_in_dir_uses_record_name() {
        let store = JsonFileStore::in_dir("/var/lib/tateti", DEFAULT_RECORD_NAME);
        assert_eq!(store.path(), Path::new("/var/lib/tateti/ticTacToeScores.json"));
        assert_eq!(
            store.temp_path(),
            Path::new("/var/lib/tateti/ticTacToeScores.json.tmp")
        );
    }
}
