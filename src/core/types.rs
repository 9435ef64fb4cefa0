//! Strongly-typed wrappers for engine concepts
//!
//! Bare strings and integers for different identifier kinds are easy to mix
//! up; these newtypes keep card ids, match ids, player names and seat numbers
//! distinct at the type level.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

/// Card identifier, owned by exactly one zone of one participant at a time.
///
/// Card ids are opaque to the engine (e.g. "c81"); their meaning lives in the
/// external card-rules corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    pub fn new(s: impl Into<String>) -> Self {
        CardId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        CardId(s)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId(s.to_string())
    }
}

/// Match identifier: a random uuid plus the UTC creation timestamp, so the
/// id alone tells an operator when the match was created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(String);

impl MatchId {
    /// Generate a fresh id, e.g. `3f2b…_20260807T101500`.
    pub fn generate() -> Self {
        let now = OffsetDateTime::now_utc();
        MatchId(format!(
            "{}_{:04}{:02}{:02}T{:02}{:02}{:02}",
            Uuid::new_v4().simple(),
            now.year(),
            u8::from(now.month()),
            now.day(),
            now.hour(),
            now.minute(),
            now.second()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MatchId {
    fn from(s: String) -> Self {
        MatchId(s)
    }
}

impl From<&str> for MatchId {
    fn from(s: &str) -> Self {
        MatchId(s.to_string())
    }
}

/// Player name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    /// Maximum accepted name length; longer names are rejected at join time.
    pub const MAX_LEN: usize = 12;

    pub fn new(s: impl Into<String>) -> Self {
        PlayerName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerName {
    fn from(s: String) -> Self {
        PlayerName(s)
    }
}

impl From<&str> for PlayerName {
    fn from(s: &str) -> Self {
        PlayerName(s.to_string())
    }
}

/// Per-match seat number, 1-based in join order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub fn new(id: u8) -> Self {
        PlayerId(id)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
