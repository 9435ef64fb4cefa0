//! Day phases of a match

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of a match, in daily order. `Lobby` is the pre-game waiting room;
/// everything from `Setup` on repeats once per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for enough participants
    Lobby,
    /// Mana-discard sub-phase; participants bank their starting mana
    Setup,
    /// "At noon" triggered effects resolve
    Noon,
    /// Main play phase, one card per turn, round-robin from the first player
    Afternoon,
    /// End-of-round biome comparison / expedition advance
    Dusk,
    /// Rest and cleanup, then the next day begins
    Night,
}

impl Phase {
    /// The phase that follows this one in the daily cycle.
    /// `Night` wraps to `Setup`: a new day, never back to the lobby.
    pub fn next(&self) -> Phase {
        match self {
            Phase::Lobby => Phase::Setup,
            Phase::Setup => Phase::Noon,
            Phase::Noon => Phase::Afternoon,
            Phase::Afternoon => Phase::Dusk,
            Phase::Dusk => Phase::Night,
            Phase::Night => Phase::Setup,
        }
    }

    /// Has the match left the lobby? Membership is frozen once this is true.
    pub fn in_play(&self) -> bool {
        !matches!(self, Phase::Lobby)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Lobby => "lobby",
            Phase::Setup => "setup",
            Phase::Noon => "noon",
            Phase::Afternoon => "afternoon",
            Phase::Dusk => "dusk",
            Phase::Night => "night",
        };
        write!(f, "{name}")
    }
}
