//! Match state machine and action resolution

pub mod actions;
pub mod engine;
pub mod log;
pub mod phase;
pub mod rules;
pub mod snapshot;
pub mod state;

pub use actions::resolve_batch;
pub use engine::{AdvanceOutcome, StartStatus, HAND_DEAL, MANA_REQUIRED, MORNING_DRAW};
pub use log::{LogEntry, MatchLog, OutputMode, VerbosityLevel};
pub use phase::Phase;
pub use rules::{CardOracle, NoRules, BIOME_COUNT};
pub use snapshot::{SnapshotError, SnapshotStore};
pub use state::{MatchState, PlayerView, MATCH_CAPACITY};
