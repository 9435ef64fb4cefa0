//! Game zones (Deck, Hand, Reserve, Mana pile, Discard pile, Landmarks, Expeditions)

use crate::core::{CardId, PlayerId};
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Different zones where a participant's cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Deck,
    Hand,
    Reserve,
    ManaPile,
    DiscardPile,
    Landmarks,
    ExpeditionHero,
    ExpeditionCompanion,
}

impl Zone {
    /// All zones, in a stable order (used for iteration and integrity checks)
    pub const ALL: [Zone; 8] = [
        Zone::Deck,
        Zone::Hand,
        Zone::Reserve,
        Zone::ManaPile,
        Zone::DiscardPile,
        Zone::Landmarks,
        Zone::ExpeditionHero,
        Zone::ExpeditionCompanion,
    ];

    /// The label clients use on the wire
    pub fn label(&self) -> &'static str {
        match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Reserve => "reserve",
            Zone::ManaPile => "mana_pile",
            Zone::DiscardPile => "discard_pile",
            Zone::Landmarks => "landmarks",
            Zone::ExpeditionHero => "expedition_hero",
            Zone::ExpeditionCompanion => "expedition_companion",
        }
    }

    /// Parse a wire label; anything outside the fixed zone set is rejected.
    pub fn from_label(label: &str) -> Result<Zone> {
        Zone::ALL
            .iter()
            .copied()
            .find(|z| z.label() == label)
            .ok_or_else(|| EngineError::InvalidZone(label.to_string()))
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A zone containing cards. Order always matters: the deck draws from the
/// top, every other zone preserves insertion order so clients see stable
/// listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardZone {
    /// Zone type
    pub zone_type: Zone,

    /// Owner of this zone (each participant has their own zones)
    pub owner: PlayerId,

    /// Cards in this zone
    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone, owner: PlayerId) -> Self {
        CardZone {
            zone_type,
            owner,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    /// Remove a specific card, preserving the order of the rest.
    pub fn remove(&mut self, card_id: &CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|id| id == card_id) {
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.cards.contains(card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from the top (for the deck)
    pub fn draw_top(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    /// Shuffle the zone (for the deck)
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }
}

/// Collection of all zones for one participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: CardZone,
    pub hand: CardZone,
    pub reserve: CardZone,
    pub mana_pile: CardZone,
    pub discard_pile: CardZone,
    pub landmarks: CardZone,
    pub expedition_hero: CardZone,
    pub expedition_companion: CardZone,
}

impl PlayerZones {
    pub fn new(player_id: PlayerId) -> Self {
        PlayerZones {
            deck: CardZone::new(Zone::Deck, player_id),
            hand: CardZone::new(Zone::Hand, player_id),
            reserve: CardZone::new(Zone::Reserve, player_id),
            mana_pile: CardZone::new(Zone::ManaPile, player_id),
            discard_pile: CardZone::new(Zone::DiscardPile, player_id),
            landmarks: CardZone::new(Zone::Landmarks, player_id),
            expedition_hero: CardZone::new(Zone::ExpeditionHero, player_id),
            expedition_companion: CardZone::new(Zone::ExpeditionCompanion, player_id),
        }
    }

    pub fn get_zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Reserve => &self.reserve,
            Zone::ManaPile => &self.mana_pile,
            Zone::DiscardPile => &self.discard_pile,
            Zone::Landmarks => &self.landmarks,
            Zone::ExpeditionHero => &self.expedition_hero,
            Zone::ExpeditionCompanion => &self.expedition_companion,
        }
    }

    pub fn get_zone_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Reserve => &mut self.reserve,
            Zone::ManaPile => &mut self.mana_pile,
            Zone::DiscardPile => &mut self.discard_pile,
            Zone::Landmarks => &mut self.landmarks,
            Zone::ExpeditionHero => &mut self.expedition_hero,
            Zone::ExpeditionCompanion => &mut self.expedition_companion,
        }
    }

    /// Iterate over all zones with their types
    pub fn iter(&self) -> impl Iterator<Item = (Zone, &CardZone)> {
        Zone::ALL.iter().map(move |&z| (z, self.get_zone(z)))
    }

    /// Which zone currently holds this card, if any
    pub fn find_card(&self, card_id: &CardId) -> Option<Zone> {
        self.iter()
            .find(|(_, zone)| zone.contains(card_id))
            .map(|(z, _)| z)
    }

    /// Total cards across all zones
    pub fn card_count(&self) -> usize {
        self.iter().map(|(_, zone)| zone.len()).sum()
    }
}
