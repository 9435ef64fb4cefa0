//! Participant representation

use crate::core::{ActionBatch, CardId, PlayerId, PlayerName};
use crate::{EngineError, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Join/create input for one participant: a display name and the starting
/// deck. Everything else about a participant is engine-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantPayload {
    pub name: String,
    pub deck: Vec<CardId>,
}

impl ParticipantPayload {
    pub fn new(name: impl Into<String>, deck: Vec<CardId>) -> Self {
        ParticipantPayload {
            name: name.into(),
            deck,
        }
    }

    /// Reject malformed payloads before they touch match state.
    pub fn validate(&self) -> Result<()> {
        if self.name.chars().count() > PlayerName::MAX_LEN {
            return Err(EngineError::InvalidParticipant(format!(
                "name '{}' exceeds {} characters",
                self.name,
                PlayerName::MAX_LEN
            )));
        }
        if self.deck.is_empty() {
            return Err(EngineError::InvalidParticipant(
                "starting deck is empty".to_string(),
            ));
        }
        let mut seen = FxHashSet::default();
        for card in &self.deck {
            if !seen.insert(card) {
                return Err(EngineError::InvalidParticipant(format!(
                    "duplicate card id {card} in starting deck"
                )));
            }
        }
        Ok(())
    }
}

/// Per-match mutable participant state, minus the zones (those live next to
/// the player in the match, keyed by the same id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Seat number, 1-based in join order
    pub id: PlayerId,

    /// Display name
    pub name: PlayerName,

    /// Pending message to show this participant
    pub message: Option<String>,

    /// Triggered effects waiting to be resolved or passed (noon phase)
    pub effects_available: Vec<String>,

    /// Submitted-but-unprocessed action batch
    pub queued_actions: Option<ActionBatch>,

    /// Has this participant passed for the current afternoon round?
    pub has_passed: bool,

    /// Expedition track position, advanced by the dusk comparison
    pub expedition_progress: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>) -> Self {
        Player {
            id,
            name: name.into(),
            message: None,
            effects_available: Vec::new(),
            queued_actions: None,
            has_passed: false,
            expedition_progress: 0,
        }
    }
}
