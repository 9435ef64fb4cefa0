//! Durable match snapshots
//!
//! One pretty-printed JSON file per match id, overwritten after every
//! mutating operation, so a match is recoverable after each discrete step
//! rather than only at shutdown. The encoding is a lossless round-trip of
//! the whole match: zones, phase, day, first player and the RNG state.

use crate::core::MatchId;
use crate::game::state::MatchState;
use std::path::{Path, PathBuf};

/// File-per-match snapshot store rooted at a games directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        SnapshotStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &MatchId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Serialize the full match state, overwriting any prior snapshot.
    pub fn save(&self, state: &MatchState) -> Result<(), SnapshotError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| SnapshotError::Io(e.to_string()))?;

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))?;

        std::fs::write(self.path_for(&state.id), json)
            .map_err(|e| SnapshotError::Io(e.to_string()))?;

        Ok(())
    }

    /// Reconstruct a match from its most recent snapshot.
    pub fn load(&self, id: &MatchId) -> Result<MatchState, SnapshotError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(SnapshotError::NotFound(id.to_string()));
        }

        let json = std::fs::read_to_string(&path).map_err(|e| SnapshotError::Io(e.to_string()))?;

        let state = serde_json::from_str(&json)
            .map_err(|e| SnapshotError::Deserialization(e.to_string()))?;

        Ok(state)
    }

    /// Ids of every match with a snapshot on disk.
    pub fn list(&self) -> Result<Vec<MatchId>, SnapshotError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        let entries = std::fs::read_dir(&self.dir).map_err(|e| SnapshotError::Io(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| SnapshotError::Io(e.to_string()))?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(MatchId::from(stem));
                }
            }
        }
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(ids)
    }
}

/// Errors that can occur during snapshot operations
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to serialize snapshot: {0}")]
    Serialization(String),

    #[error("Failed to deserialize snapshot: {0}")]
    Deserialization(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("No snapshot for match: {0}")]
    NotFound(String),
}
