//! Best-score persistence.
//!
//! The session only sees the `BestScoreStore` trait; where the number lives is
//! up to the embedding application. Two implementations ship with the crate:
//! an in-memory store and a JSON file store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Reads and writes the all-time best score.
pub trait BestScoreStore {
    /// Current best score. Absent records read as 0.
    fn load_best_score(&self) -> Result<u64, StoreError>;

    /// Overwrite the best score.
    fn save_best_score(&mut self, score: u64) -> Result<(), StoreError>;
}

impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load_best_score(&self) -> Result<u64, StoreError> {
        (**self).load_best_score()
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        (**self).save_best_score(score)
    }
}

/// Process-local store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    best: u64,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a known best score.
    pub fn with_best_score(best: u64) -> Self {
        Self { best, writes: 0 }
    }

    /// Number of successful writes.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best_score(&self) -> Result<u64, StoreError> {
        Ok(self.best)
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        self.best = score;
        self.writes += 1;
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u64,
}

/// Stores the best score as a small JSON document on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best_score(&self) -> Result<u64, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let record: BestScoreRecord = serde_json::from_str(&content).map_err(|e| StoreError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(record.best_score)
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        let record = BestScoreRecord { best_score: score };
        let json = serde_json::to_string(&record).map_err(|e| StoreError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_best_score().unwrap(), 0);

        store.save_best_score(512).unwrap();
        assert_eq!(store.load_best_score().unwrap(), 512);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_file_store_missing_file_reads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("best.json"));
        assert_eq!(store.load_best_score().unwrap(), 0);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("best.json"));

        store.save_best_score(2048).unwrap();
        assert_eq!(store.load_best_score().unwrap(), 2048);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"best_score":2048}"#);
    }

    #[test]
    fn test_file_store_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::new(&path).load_best_score().unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[test]
    fn test_file_store_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("missing").join("best.json"));

        let err = store.save_best_score(4).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
