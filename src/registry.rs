//! Registry of live matches
//!
//! Maps match ids to lock-guarded match state. Matches are independent:
//! callers lock exactly one match at a time, and the registry's own lock is
//! held only for the lookup. Inserted on create, never implicitly removed;
//! expiry is an operator policy, not engine behavior.

use crate::core::MatchId;
use crate::game::state::MatchState;
use crate::{EngineError, Result};
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A match behind its per-match lock
pub type SharedMatch = Arc<Mutex<MatchState>>;

/// Concurrency-safe map of all running matches
#[derive(Debug, Default)]
pub struct MatchRegistry {
    matches: RwLock<FxHashMap<MatchId, SharedMatch>>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        MatchRegistry::default()
    }

    /// Insert (or replace, for recovery) a match; returns the shared handle.
    pub fn insert(&self, state: MatchState) -> SharedMatch {
        let id = state.id.clone();
        let shared = Arc::new(Mutex::new(state));
        self.matches.write().insert(id, shared.clone());
        shared
    }

    /// Look up a match by id.
    pub fn get(&self, id: &MatchId) -> Result<SharedMatch> {
        self.matches
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::MatchNotFound(id.clone()))
    }

    pub fn contains(&self, id: &MatchId) -> bool {
        self.matches.read().contains_key(id)
    }

    /// Ids of all live matches, in no particular order.
    pub fn ids(&self) -> Vec<MatchId> {
        self.matches.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.matches.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.read().is_empty()
    }
}
