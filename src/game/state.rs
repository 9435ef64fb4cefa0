//! Authoritative match state
//!
//! This is the central structure for one match: participants, their zones,
//! the current phase, and the serialized RNG so a recovered match replays
//! deterministically. All mutation happens through logged primitives; a card
//! never changes zone except through `move_card` (or the deck draw built on
//! it).

use crate::core::{MatchId, ParticipantPayload, Player, PlayerId};
use crate::game::log::MatchLog;
use crate::game::phase::Phase;
use crate::zones::{PlayerZones, Zone};
use crate::{EngineError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Hard cap on participants per match
pub const MATCH_CAPACITY: usize = 4;

/// Complete state of one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Opaque unique id, embeds the creation timestamp
    pub id: MatchId,

    /// Participants in join order (Vec for stable seating)
    pub players: Vec<Player>,

    /// Zones for each participant
    pub player_zones: Vec<(PlayerId, PlayerZones)>,

    /// Current phase
    pub phase: Phase,

    /// Day (round) counter; 0 while in the lobby, 1 once play starts
    pub day: u32,

    /// Index into `players` of the first player for the current day
    pub first_player_idx: usize,

    /// Winner, unset until game end (win conditions live in the rules corpus)
    pub winner: Option<PlayerId>,

    /// Match RNG (serializable for deterministic recovery).
    ///
    /// Wrapped in RefCell so shuffling can borrow the RNG while zones are
    /// borrowed mutably.
    pub rng: RefCell<ChaCha12Rng>,

    /// Event log; not part of the durable snapshot
    #[serde(skip, default)]
    pub log: MatchLog,
}

impl MatchState {
    /// Create a new match in the lobby with the creator as participant 1.
    pub fn new(creator: ParticipantPayload) -> Result<Self> {
        let mut state = MatchState {
            id: MatchId::generate(),
            players: Vec::new(),
            player_zones: Vec::new(),
            phase: Phase::Lobby,
            day: 0,
            first_player_idx: 0,
            winner: None,
            rng: RefCell::new(ChaCha12Rng::from_entropy()),
            log: MatchLog::new(),
        };
        state.add_player(creator)?;
        Ok(state)
    }

    /// Reseed the match RNG for deterministic tests and replays.
    pub fn seed_rng(&mut self, seed: u64) {
        *self.rng.borrow_mut() = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Append a participant with the next sequential seat number.
    ///
    /// Membership is frozen once the match leaves the lobby; capacity is
    /// fixed at [`MATCH_CAPACITY`].
    pub fn add_player(&mut self, payload: ParticipantPayload) -> Result<PlayerId> {
        if self.phase.in_play() {
            return Err(EngineError::MatchAlreadyStarted(self.phase.to_string()));
        }
        if self.players.len() >= MATCH_CAPACITY {
            return Err(EngineError::MatchFull {
                capacity: MATCH_CAPACITY,
            });
        }
        payload.validate()?;

        let id = PlayerId::new(self.players.len() as u8 + 1);
        let mut zones = PlayerZones::new(id);
        for card in payload.deck {
            zones.deck.add(card);
        }
        self.players.push(Player::new(id, payload.name));
        self.player_zones.push((id, zones));
        self.log
            .normal(&format!("match {}: participant {id} joined", self.id));
        Ok(id)
    }

    /// Get a participant by seat number
    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(EngineError::UnknownParticipant(id))
    }

    /// Get a mutable participant by seat number
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(EngineError::UnknownParticipant(id))
    }

    /// Get a participant's zones
    pub fn zones(&self, id: PlayerId) -> Result<&PlayerZones> {
        self.player_zones
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, z)| z)
            .ok_or(EngineError::UnknownParticipant(id))
    }

    /// Get a participant's zones mutably
    pub fn zones_mut(&mut self, id: PlayerId) -> Result<&mut PlayerZones> {
        self.player_zones
            .iter_mut()
            .find(|(pid, _)| *pid == id)
            .map(|(_, z)| z)
            .ok_or(EngineError::UnknownParticipant(id))
    }

    /// Seat indices starting from the current first player, wrapping around.
    pub fn seat_order(&self) -> impl Iterator<Item = usize> + '_ {
        let n = self.players.len();
        let first = self.first_player_idx;
        (0..n).map(move |i| (first + i) % n)
    }

    /// Move a card between two of a participant's zones.
    ///
    /// This is the only mutation primitive for zone contents; every call is
    /// logged. Fails if the card is not in the source zone.
    pub fn move_card(&mut self, id: PlayerId, card: &crate::core::CardId, from: Zone, to: Zone) -> Result<()> {
        {
            let zones = self.zones_mut(id)?;
            if !zones.get_zone_mut(from).remove(card) {
                return Err(EngineError::InvalidMove(format!(
                    "card {card} not in {from}"
                )));
            }
            zones.get_zone_mut(to).add(card.clone());
        }
        self.log
            .verbose(&format!("p{id}: {card} {from} -> {to}"));
        Ok(())
    }

    /// Draw the top card of a participant's deck into their hand.
    /// Returns `None` if the deck is empty.
    pub fn draw_card(&mut self, id: PlayerId) -> Result<Option<crate::core::CardId>> {
        let drawn = {
            let zones = self.zones_mut(id)?;
            match zones.deck.draw_top() {
                Some(card) => {
                    zones.hand.add(card.clone());
                    Some(card)
                }
                None => None,
            }
        };
        if let Some(card) = &drawn {
            self.log.verbose(&format!("p{id}: drew {card}"));
        }
        Ok(drawn)
    }

    /// Shuffle a participant's deck with the match RNG.
    pub fn shuffle_deck(&mut self, id: PlayerId) {
        use rand::seq::SliceRandom;
        if let Some(zones) = self
            .player_zones
            .iter_mut()
            .find(|(pid, _)| *pid == id)
            .map(|(_, z)| z)
        {
            zones.deck.cards.shuffle(&mut *self.rng.borrow_mut());
        }
    }

    /// Zone-exclusivity invariant: no card id duplicated within or across a
    /// participant's zones.
    pub fn zone_integrity_ok(&self) -> bool {
        self.player_zones.iter().all(|(_, zones)| {
            let mut seen = FxHashSet::default();
            zones
                .iter()
                .flat_map(|(_, zone)| zone.cards.iter())
                .all(|card| seen.insert(card))
        })
    }

    pub(crate) fn debug_assert_integrity(&self) {
        debug_assert!(self.zone_integrity_ok(), "zone exclusivity violated");
    }

    /// Full record returned to a participant: identity, zones, prompts and
    /// the currently available actions.
    pub fn player_view(&self, id: PlayerId) -> Result<PlayerView> {
        let player = self.player(id)?;
        let zones = self.zones(id)?;
        Ok(PlayerView {
            game_id: self.id.clone(),
            id: player.id,
            name: player.name.clone(),
            deck: zones.deck.cards.clone(),
            hand: zones.hand.cards.clone(),
            reserve: zones.reserve.cards.clone(),
            mana_pile: zones.mana_pile.cards.clone(),
            discard_pile: zones.discard_pile.cards.clone(),
            landmarks: zones.landmarks.cards.clone(),
            expedition_hero: zones.expedition_hero.cards.clone(),
            expedition_companion: zones.expedition_companion.cards.clone(),
            message: player.message.clone(),
            available_actions: self.available_actions(id)?,
            effects_available: player.effects_available.clone(),
            queued_actions: player.queued_actions.clone(),
            has_passed: player.has_passed,
            expedition_progress: player.expedition_progress,
        })
    }
}

/// Serializable join of a participant's record and zones, as returned by
/// every boundary operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub game_id: MatchId,
    pub id: PlayerId,
    pub name: crate::core::PlayerName,
    pub deck: Vec<crate::core::CardId>,
    pub hand: Vec<crate::core::CardId>,
    pub reserve: Vec<crate::core::CardId>,
    pub mana_pile: Vec<crate::core::CardId>,
    pub discard_pile: Vec<crate::core::CardId>,
    pub landmarks: Vec<crate::core::CardId>,
    pub expedition_hero: Vec<crate::core::CardId>,
    pub expedition_companion: Vec<crate::core::CardId>,
    pub message: Option<String>,
    pub available_actions: Vec<String>,
    pub effects_available: Vec<String>,
    pub queued_actions: Option<crate::core::ActionBatch>,
    pub has_passed: bool,
    pub expedition_progress: u32,
}
