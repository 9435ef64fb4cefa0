//! Action batches submitted by participants
//!
//! The wire format mirrors what clients send: a list of tagged intents, each
//! either a card move between two named zones or an explicit pass. Zone names
//! stay as labels here; they are parsed and checked when the batch is
//! resolved, so a bad label surfaces as a structured error rather than a
//! deserialization failure.

use crate::core::CardId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single intent inside an action batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionIntent {
    /// Move one card from a source zone to a destination zone.
    MoveCard {
        card: CardId,
        from: String,
        to: String,
    },

    /// Pass: resolve nothing. Clears the participant's pending noon effects,
    /// or ends their afternoon participation, depending on phase.
    Pass,
}

impl fmt::Display for ActionIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionIntent::MoveCard { card, from, to } => {
                write!(f, "move_card {card} {from} -> {to}")
            }
            ActionIntent::Pass => write!(f, "pass"),
        }
    }
}

/// An ordered batch of intents, consumed in one resolution pass.
pub type ActionBatch = Vec<ActionIntent>;
