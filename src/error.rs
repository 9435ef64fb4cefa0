//! Error types for the match engine

use crate::core::{MatchId, PlayerId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid participant: {0}")]
    InvalidParticipant(String),

    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("Match is full ({capacity} participants)")]
    MatchFull { capacity: usize },

    #[error("Match already started: {0}")]
    MatchAlreadyStarted(String),

    #[error("Participant {0} is not part of this match")]
    UnknownParticipant(PlayerId),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Invalid zone label: {0}")]
    InvalidZone(String),

    #[error("Match {0} is busy: lock wait timed out")]
    MatchBusy(MatchId),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] crate::game::snapshot::SnapshotError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
