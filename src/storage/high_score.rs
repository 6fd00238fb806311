//! Best-score storage
//!
//! The game only ever reads the stored value once when it starts up and
//! writes it back when a finished game beats it. How the number is kept is up
//! to the [`HighScoreStore`] implementation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// A single persisted best score
pub trait HighScoreStore {
    /// Stored score, or 0 if nothing was saved yet
    fn get(&self) -> Result<u32>;

    fn set(&mut self, score: u32) -> Result<()>;
}

/// On-disk layout of the high score file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Keeps the high score in a small JSON file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn get(&self) -> Result<u32> {
        if !self.path.exists() {
            return Ok(0);
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read high score from {:?}", self.path))?;
        let record: HighScoreRecord = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse high score file {:?}", self.path))?;

        Ok(record.high_score)
    }

    fn set(&mut self, score: u32) -> Result<()> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        Ok(())
    }
}

/// In-memory store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    score: Arc<AtomicU32>,
    writes: Arc<AtomicUsize>,
}

impl MemoryHighScoreStore {
    pub fn new(initial: u32) -> Self {
        Self {
            score: Arc::new(AtomicU32::new(initial)),
            writes: Arc::default(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score.load(Ordering::SeqCst)
    }

    /// How many times `set` has been called
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn get(&self) -> Result<u32> {
        Ok(self.score())
    }

    fn set(&mut self, score: u32) -> Result<()> {
        self.score.store(score, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_zero() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHighScoreStore::new(temp_dir.path().join("high_score.json"));

        assert_eq!(store.get().unwrap(), 0);
    }

    #[test]
    fn test_file_store_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("high_score.json");

        let mut store = FileHighScoreStore::new(&path);
        store.set(130).unwrap();
        assert!(path.exists());

        let reopened = FileHighScoreStore::new(&path);
        assert_eq!(reopened.get().unwrap(), 130);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("high_score.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileHighScoreStore::new(&path);
        assert!(store.get().is_err());
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let store = MemoryHighScoreStore::new(40);
        let mut handle = store.clone();

        handle.set(90).unwrap();

        assert_eq!(store.get().unwrap(), 90);
        assert_eq!(store.write_count(), 1);
    }
}
