//! Boundary operations exposed to the transport layer
//!
//! One method per match-affecting request. Every operation follows the same
//! discipline: resolve the match id, acquire that match's lock (bounded
//! wait), mutate in memory, persist the snapshot, release. Phase progression
//! is explicit: `start_game` and `get_available_actions` perform a single
//! guarded `advance` attempt (the poll-to-advance contract), and
//! `advance_match` is available for transports that want to drive
//! progression after their own mutating calls.

use crate::core::{ActionBatch, MatchId, ParticipantPayload, PlayerId};
use crate::game::engine::{AdvanceOutcome, StartStatus};
use crate::game::log::VerbosityLevel;
use crate::game::rules::{CardOracle, NoRules};
use crate::game::snapshot::{SnapshotError, SnapshotStore};
use crate::game::state::{MatchState, PlayerView};
use crate::registry::MatchRegistry;
use crate::{EngineError, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Service-wide settings
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory for durable match snapshots
    pub games_dir: PathBuf,
    /// Bounded wait when acquiring a match's lock
    pub lock_timeout: Duration,
    /// Verbosity applied to every match's log
    pub verbosity: VerbosityLevel,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            games_dir: PathBuf::from("games"),
            lock_timeout: Duration::from_secs(5),
            verbosity: VerbosityLevel::default(),
        }
    }
}

/// The engine's front door: match registry + snapshot store + rules seam.
#[derive(Debug)]
pub struct GameService {
    registry: MatchRegistry,
    store: SnapshotStore,
    oracle: Arc<dyn CardOracle>,
    config: ServiceConfig,
    seed: Option<u64>,
}

impl GameService {
    pub fn new(config: ServiceConfig) -> Self {
        GameService::with_oracle(config, Arc::new(NoRules))
    }

    pub fn with_oracle(config: ServiceConfig, oracle: Arc<dyn CardOracle>) -> Self {
        GameService {
            registry: MatchRegistry::new(),
            store: SnapshotStore::new(&config.games_dir),
            oracle,
            config,
            seed: None,
        }
    }

    /// Seed every created match's RNG (deterministic tests and demos).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn registry(&self) -> &MatchRegistry {
        &self.registry
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Create a new match with the payload's sender as participant 1.
    pub fn create_game(&self, payload: ParticipantPayload) -> Result<PlayerView> {
        let mut state = MatchState::new(payload)?;
        if let Some(seed) = self.seed {
            state.seed_rng(seed);
        }
        state.log.set_verbosity(self.config.verbosity);

        let view = state.player_view(PlayerId::new(1))?;
        self.store.save(&state)?;
        self.registry.insert(state);
        Ok(view)
    }

    /// Ids of every live match.
    pub fn list_running_matches(&self) -> Vec<MatchId> {
        self.registry.ids()
    }

    /// Join an existing match.
    pub fn join_game(&self, id: &MatchId, payload: ParticipantPayload) -> Result<PlayerView> {
        let shared = self.registry.get(id)?;
        let mut state = self.lock(id, &shared)?;

        let player_id = state.add_player(payload)?;
        self.store.save(&state)?;
        state.player_view(player_id)
    }

    /// Attempt the lobby exit. Idempotent; reports how many seats are still
    /// missing while the participant count is wrong.
    pub fn start_game(&self, id: &MatchId) -> Result<StartStatus> {
        let shared = self.registry.get(id)?;
        let mut state = self.lock(id, &shared)?;

        let before = state.phase;
        let status = state.start(self.oracle.as_ref())?;
        if state.phase != before {
            self.store.save(&state)?;
        }
        Ok(status)
    }

    /// Resolve a participant's action batch (all-or-nothing) and persist.
    pub fn submit_actions(
        &self,
        id: &MatchId,
        player_id: PlayerId,
        batch: ActionBatch,
    ) -> Result<PlayerView> {
        let shared = self.registry.get(id)?;
        let mut state = self.lock(id, &shared)?;

        state.submit_actions(player_id, batch)?;
        self.store.save(&state)?;
        state.player_view(player_id)
    }

    /// Report what a participant may do. Performs a single guarded advance
    /// attempt first, so polling this is what moves a ready match forward.
    pub fn get_available_actions(&self, id: &MatchId, player_id: PlayerId) -> Result<PlayerView> {
        let shared = self.registry.get(id)?;
        let mut state = self.lock(id, &shared)?;

        state.player(player_id)?;
        if state.advance(self.oracle.as_ref())?.advanced() {
            self.store.save(&state)?;
        }
        state.player_view(player_id)
    }

    /// Explicit single-step phase progression for transports that drive it
    /// themselves after mutating calls.
    pub fn advance_match(&self, id: &MatchId) -> Result<AdvanceOutcome> {
        let shared = self.registry.get(id)?;
        let mut state = self.lock(id, &shared)?;

        let outcome = state.advance(self.oracle.as_ref())?;
        if outcome.advanced() {
            self.store.save(&state)?;
        }
        Ok(outcome)
    }

    /// Reload one match from its snapshot into the registry.
    pub fn recover(&self, id: &MatchId) -> Result<()> {
        let mut state = self.store.load(id).map_err(|e| match e {
            SnapshotError::NotFound(_) => EngineError::MatchNotFound(id.clone()),
            other => other.into(),
        })?;
        state.log.set_verbosity(self.config.verbosity);
        self.registry.insert(state);
        Ok(())
    }

    /// Reload every saved match. A corrupt snapshot fails only that match's
    /// recovery, never the sweep.
    pub fn recover_all(&self) -> Result<RecoveryReport> {
        let mut report = RecoveryReport::default();
        for id in self.store.list()? {
            match self.recover(&id) {
                Ok(()) => report.recovered.push(id),
                Err(e) => report.failed.push((id, e.to_string())),
            }
        }
        Ok(report)
    }

    fn lock<'a>(
        &self,
        id: &MatchId,
        shared: &'a crate::registry::SharedMatch,
    ) -> Result<parking_lot::MutexGuard<'a, MatchState>> {
        shared
            .try_lock_for(self.config.lock_timeout)
            .ok_or_else(|| EngineError::MatchBusy(id.clone()))
    }
}

/// Outcome of a recovery sweep
#[derive(Debug, Default)]
pub struct RecoveryReport {
    pub recovered: Vec<MatchId>,
    pub failed: Vec<(MatchId, String)>,
}

/// Wire envelope mirroring what the transport returns to clients: either the
/// domain object or an explicit failure with a human-readable message,
/// never a bare internal fault.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl<T: Serialize> From<Result<T>> for ApiResponse<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(e) => ApiResponse::err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use crate::game::phase::Phase;

    fn temp_config(tag: &str) -> ServiceConfig {
        ServiceConfig {
            games_dir: std::env::temp_dir()
                .join(format!("altered-api-{tag}-{}", uuid::Uuid::new_v4())),
            ..ServiceConfig::default()
        }
    }

    fn quiet_service(tag: &str) -> GameService {
        let mut config = temp_config(tag);
        config.verbosity = VerbosityLevel::Silent;
        GameService::new(config).with_seed(11)
    }

    fn payload(name: &str) -> ParticipantPayload {
        let deck = (0..40).map(|i| CardId::new(format!("{name}{i}"))).collect();
        ParticipantPayload::new(name, deck)
    }

    #[test]
    fn test_create_persists_and_registers() {
        let service = quiet_service("create");
        let view = service.create_game(payload("Alice")).unwrap();

        assert_eq!(view.id, PlayerId::new(1));
        assert_eq!(view.deck.len(), 40);
        assert_eq!(service.list_running_matches(), vec![view.game_id.clone()]);
        // snapshot written before the call returned
        assert!(service.store().load(&view.game_id).is_ok());

        std::fs::remove_dir_all(service.store().dir()).ok();
    }

    #[test]
    fn test_join_and_start_flow() {
        let service = quiet_service("flow");
        let a = service.create_game(payload("Alice")).unwrap();

        let status = service.start_game(&a.game_id).unwrap();
        assert_eq!(status, StartStatus::Waiting { needed: 1 });
        assert_eq!(status.message(), "waiting for 1 more participants");

        let b = service.join_game(&a.game_id, payload("Bob")).unwrap();
        assert_eq!(b.id, PlayerId::new(2));

        assert_eq!(
            service.start_game(&a.game_id).unwrap(),
            StartStatus::Initialized
        );
        let shared = service.registry().get(&a.game_id).unwrap();
        assert_eq!(shared.lock().phase, Phase::Setup);

        // joining after start is rejected
        let err = service.join_game(&a.game_id, payload("Carol"));
        assert!(matches!(err, Err(EngineError::MatchAlreadyStarted(_))));

        std::fs::remove_dir_all(service.store().dir()).ok();
    }

    #[test]
    fn test_unknown_match() {
        let service = quiet_service("unknown");
        let err = service.start_game(&MatchId::from("nope"));
        assert!(matches!(err, Err(EngineError::MatchNotFound(_))));
    }

    #[test]
    fn test_recover_round_trip() {
        let games_dir;
        let match_id;
        {
            let service = quiet_service("recover");
            games_dir = service.store().dir().to_path_buf();
            let view = service.create_game(payload("Alice")).unwrap();
            match_id = view.game_id;
            service.join_game(&match_id, payload("Bob")).unwrap();
            service.start_game(&match_id).unwrap();
        }

        // a fresh service over the same directory: registry starts empty
        let mut config = temp_config("recover2");
        config.games_dir = games_dir.clone();
        config.verbosity = VerbosityLevel::Silent;
        let service = GameService::new(config);
        assert!(service.list_running_matches().is_empty());

        let report = service.recover_all().unwrap();
        assert_eq!(report.recovered, vec![match_id.clone()]);
        assert!(report.failed.is_empty());

        let shared = service.registry().get(&match_id).unwrap();
        let state = shared.lock();
        assert_eq!(state.phase, Phase::Setup);
        assert_eq!(state.players.len(), 2);

        std::fs::remove_dir_all(games_dir).ok();
    }

    #[test]
    fn test_corrupt_snapshot_only_fails_that_match() {
        let service = quiet_service("corrupt");
        let a = service.create_game(payload("Alice")).unwrap();
        let b = service.create_game(payload("Bob")).unwrap();
        std::fs::write(
            service.store().dir().join(format!("{}.json", a.game_id)),
            "garbage",
        )
        .unwrap();

        let report = service.recover_all().unwrap();
        assert_eq!(report.recovered, vec![b.game_id.clone()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, a.game_id);

        std::fs::remove_dir_all(service.store().dir()).ok();
    }

    #[test]
    fn test_api_response_envelope() {
        let ok: ApiResponse<u32> = ApiResponse::from(Ok(7));
        assert!(ok.success);
        assert_eq!(ok.data, Some(7));

        let err: ApiResponse<u32> =
            ApiResponse::from(Err(EngineError::InvalidZone("attic".to_string())));
        assert!(!err.success);
        assert!(err.message.unwrap().contains("attic"));
    }
}
