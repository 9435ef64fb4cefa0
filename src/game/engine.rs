//! Phase state machine
//!
//! The daily cycle is driven by a declarative transition table: one row per
//! phase with an optional guard and an entry action, executed by
//! [`MatchState::advance`]. A failed guard is a normal "waiting" outcome,
//! never an error; phase progression only ever happens through `advance`
//! (or `start`, which is the lobby's guarded attempt), so read queries stay
//! side-effect free.

use crate::core::{ActionBatch, PlayerId};
use crate::game::actions::resolve_batch;
use crate::game::phase::Phase;
use crate::game::rules::{CardOracle, BIOME_COUNT};
use crate::game::state::MatchState;
use crate::zones::Zone;
use crate::Result;
use rand::Rng;
use serde::Serialize;

/// Cards dealt to every hand when play begins
pub const HAND_DEAL: usize = 6;

/// Mana pile size every participant must reach to leave setup
pub const MANA_REQUIRED: usize = 3;

/// Cards drawn per participant when a new day's setup completes
pub const MORNING_DRAW: usize = 2;

/// Night cleanup caps
pub const RESERVE_CAP: usize = 2;
pub const LANDMARK_CAP: usize = 2;

const SETUP_PROMPT: &str = "Discard 3 cards to mana and/or wait for other players to do so";

/// Result of one guarded transition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The guard held (or was absent) and the phase changed
    Advanced { from: Phase, to: Phase },
    /// The guard failed; the state is untouched and the reason reportable
    Waiting(&'static str),
}

impl AdvanceOutcome {
    pub fn advanced(&self) -> bool {
        matches!(self, AdvanceOutcome::Advanced { .. })
    }
}

/// Outcome of a start request. Never an error for a legal call: while the
/// lobby guard fails the caller just gets the waiting report back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StartStatus {
    Initialized,
    Waiting { needed: usize },
}

impl StartStatus {
    pub fn message(&self) -> String {
        match self {
            StartStatus::Initialized => "initialized, now poll available actions".to_string(),
            StartStatus::Waiting { needed } => {
                format!("waiting for {needed} more participants")
            }
        }
    }
}

type Guard = fn(&MatchState) -> bool;
type Entry = fn(&mut MatchState, &dyn CardOracle) -> Result<()>;

/// One row of the transition table
struct Transition {
    to: Phase,
    guard: Option<(Guard, &'static str)>,
    entry: Option<Entry>,
}

fn transition_for(phase: Phase) -> Transition {
    match phase {
        Phase::Lobby => Transition {
            to: Phase::Setup,
            guard: Some((
                two_or_four_players,
                "waiting for the right number of participants (2 or 4)",
            )),
            entry: Some(enter_setup),
        },
        Phase::Setup => Transition {
            to: Phase::Noon,
            guard: Some((
                all_players_banked_mana,
                "waiting for every participant to bank 3 mana",
            )),
            entry: Some(enter_noon),
        },
        Phase::Noon => Transition {
            to: Phase::Afternoon,
            guard: Some((
                all_noon_effects_done,
                "waiting for noon effects to be resolved",
            )),
            entry: Some(enter_afternoon),
        },
        Phase::Afternoon => Transition {
            to: Phase::Dusk,
            guard: Some((
                all_players_done_for_today,
                "waiting for every participant to pass",
            )),
            entry: Some(enter_dusk),
        },
        Phase::Dusk => Transition {
            to: Phase::Night,
            guard: None,
            entry: Some(enter_night),
        },
        Phase::Night => Transition {
            to: Phase::Setup,
            guard: None,
            entry: Some(begin_new_day),
        },
    }
}

// Guards

fn two_or_four_players(state: &MatchState) -> bool {
    matches!(state.players.len(), 2 | 4)
}

fn all_players_banked_mana(state: &MatchState) -> bool {
    state
        .player_zones
        .iter()
        .all(|(_, zones)| zones.mana_pile.len() == MANA_REQUIRED)
}

fn all_noon_effects_done(state: &MatchState) -> bool {
    state.players.iter().all(|p| p.effects_available.is_empty())
}

fn all_players_done_for_today(state: &MatchState) -> bool {
    state.players.iter().all(|p| {
        p.has_passed
            || state
                .zones(p.id)
                .map(|z| z.hand.is_empty() && z.reserve.is_empty())
                .unwrap_or(true)
    })
}

// Entry actions

/// Leaving the lobby: pick the first player, shuffle every deck, deal the
/// opening hands and prompt for the mana discard.
fn enter_setup(state: &mut MatchState, _oracle: &dyn CardOracle) -> Result<()> {
    let n = state.players.len();
    state.first_player_idx = state.rng.borrow_mut().gen_range(0..n);
    state.day = 1;

    let ids: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
    for id in &ids {
        state.shuffle_deck(*id);
    }
    for id in &ids {
        for _ in 0..HAND_DEAL {
            if state.draw_card(*id)?.is_none() {
                break;
            }
        }
    }
    for player in &mut state.players {
        player.message = Some(SETUP_PROMPT.to_string());
    }
    state.log.minimal(&format!(
        "match {}: day 1, first player p{}",
        state.id,
        state.players[state.first_player_idx].id
    ));
    Ok(())
}

/// Mana is banked: everyone draws the morning cards, then noon effects are
/// gathered starting from the first player in seating order.
fn enter_noon(state: &mut MatchState, oracle: &dyn CardOracle) -> Result<()> {
    let ids: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
    for id in &ids {
        for _ in 0..MORNING_DRAW {
            if state.draw_card(*id)?.is_none() {
                break;
            }
        }
    }

    let order: Vec<usize> = state.seat_order().collect();
    for idx in order {
        let id = state.players[idx].id;
        let effects = oracle.noon_effects(state.zones(id)?);
        let player = &mut state.players[idx];
        player.message = Some(if effects.is_empty() {
            "No noon effects for you this day".to_string()
        } else {
            "Resolve or pass your noon effects".to_string()
        });
        player.effects_available = effects;
    }
    Ok(())
}

fn enter_afternoon(state: &mut MatchState, _oracle: &dyn CardOracle) -> Result<()> {
    for player in &mut state.players {
        player.has_passed = false;
        player.message = Some("Play one card per turn, or pass".to_string());
    }
    Ok(())
}

/// End of the round: compare biome statistics. A participant whose stat
/// strictly beats every opponent on some biome advances their expedition.
fn enter_dusk(state: &mut MatchState, oracle: &dyn CardOracle) -> Result<()> {
    let mut stats: Vec<[i32; BIOME_COUNT]> = Vec::with_capacity(state.players.len());
    for player in &state.players {
        stats.push(oracle.biome_stats(state.zones(player.id)?));
    }

    let mut advanced: Vec<PlayerId> = Vec::new();
    for (i, player) in state.players.iter_mut().enumerate() {
        let beats_all = (0..BIOME_COUNT)
            .any(|b| stats.iter().enumerate().all(|(j, s)| j == i || stats[i][b] > s[b]));
        if beats_all {
            player.expedition_progress += 1;
            advanced.push(player.id);
        }
        player.message = None;
    }
    for id in advanced {
        state.log.normal(&format!("p{id}: expedition advances"));
    }
    Ok(())
}

/// Rest and cleanup: expeditions return to the reserve (fleeting cards are
/// discarded), then reserve and landmarks are trimmed to their caps.
fn enter_night(state: &mut MatchState, oracle: &dyn CardOracle) -> Result<()> {
    let ids: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();
    for id in &ids {
        for zone in [Zone::ExpeditionHero, Zone::ExpeditionCompanion] {
            let cards = state.zones(*id)?.get_zone(zone).cards.clone();
            for card in cards {
                let dest = if oracle.is_fleeting(&card) {
                    Zone::DiscardPile
                } else {
                    Zone::Reserve
                };
                state.move_card(*id, &card, zone, dest)?;
            }
        }

        // discard down to the caps, newest cards first
        for (zone, cap) in [(Zone::Reserve, RESERVE_CAP), (Zone::Landmarks, LANDMARK_CAP)] {
            while state.zones(*id)?.get_zone(zone).len() > cap {
                let overflow = state.zones(*id)?.get_zone(zone).cards.last().cloned();
                match overflow {
                    Some(card) => state.move_card(*id, &card, zone, Zone::DiscardPile)?,
                    None => break,
                }
            }
        }
    }
    for player in &mut state.players {
        player.message = Some("Night falls; resting expeditions".to_string());
    }
    Ok(())
}

fn begin_new_day(state: &mut MatchState, _oracle: &dyn CardOracle) -> Result<()> {
    state.day += 1;
    state.first_player_idx = (state.first_player_idx + 1) % state.players.len();
    for player in &mut state.players {
        player.message = Some("A new day dawns".to_string());
    }
    state.log.minimal(&format!(
        "match {}: day {}, first player p{}",
        state.id,
        state.day,
        state.players[state.first_player_idx].id
    ));
    Ok(())
}

impl MatchState {
    /// Attempt at most one guarded transition from the current phase.
    pub fn advance(&mut self, oracle: &dyn CardOracle) -> Result<AdvanceOutcome> {
        let transition = transition_for(self.phase);
        if let Some((guard, waiting)) = transition.guard {
            if !guard(self) {
                return Ok(AdvanceOutcome::Waiting(waiting));
            }
        }
        let from = self.phase;
        self.phase = transition.to;
        if let Some(entry) = transition.entry {
            entry(self, oracle)?;
        }
        self.log
            .normal(&format!("match {}: {from} -> {}", self.id, transition.to));
        self.debug_assert_integrity();
        Ok(AdvanceOutcome::Advanced {
            from,
            to: transition.to,
        })
    }

    /// Attempt the lobby exit. Idempotent: while the participant count is
    /// wrong this just re-reports how many seats are missing, and calling it
    /// on a started match reports `Initialized` again.
    pub fn start(&mut self, oracle: &dyn CardOracle) -> Result<StartStatus> {
        if self.phase == Phase::Lobby {
            self.advance(oracle)?;
        }
        Ok(if self.phase == Phase::Lobby {
            StartStatus::Waiting {
                needed: self.seats_needed(),
            }
        } else {
            StartStatus::Initialized
        })
    }

    /// Seats missing until the nearest legal participant count
    fn seats_needed(&self) -> usize {
        let n = self.players.len();
        if n < 2 {
            2 - n
        } else {
            4 - n
        }
    }

    /// What a participant may currently do; pure, phase-dependent.
    ///
    /// During setup the implicit "pass" is withheld until the mana
    /// requirement is met (and by then the phase has moved on), so the list
    /// is hand + reserve only.
    pub fn available_actions(&self, id: PlayerId) -> Result<Vec<String>> {
        let player = self.player(id)?;
        let zones = self.zones(id)?;

        let hand_and_reserve = || {
            let mut actions: Vec<String> =
                zones.hand.cards.iter().map(|c| c.to_string()).collect();
            actions.extend(zones.reserve.cards.iter().map(|c| c.to_string()));
            actions
        };

        Ok(match self.phase {
            Phase::Lobby => Vec::new(),
            Phase::Setup => hand_and_reserve(),
            Phase::Noon => {
                let mut actions = player.effects_available.clone();
                if !actions.is_empty() {
                    actions.push("pass".to_string());
                }
                actions
            }
            Phase::Afternoon => {
                if player.has_passed {
                    Vec::new()
                } else {
                    let mut actions = hand_and_reserve();
                    actions.push("pass".to_string());
                    actions
                }
            }
            Phase::Dusk | Phase::Night => Vec::new(),
        })
    }

    /// Resolve a submitted batch against this participant's zones.
    /// All-or-nothing: see [`resolve_batch`].
    pub fn submit_actions(&mut self, id: PlayerId, batch: ActionBatch) -> Result<()> {
        self.player_mut(id)?.queued_actions = Some(batch.clone());
        resolve_batch(self, id, &batch)?;
        let player = self.player_mut(id)?;
        player.queued_actions = None;
        Ok(())
    }
}
