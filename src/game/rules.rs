//! Seam to the external card-rules corpus
//!
//! The engine only knows generic move/validate/resolve mechanics; what a
//! given card *does* is supplied from outside through this trait. The
//! default oracle knows nothing, which leaves noon a pass-through, the dusk
//! comparison a tie, and no card fleeting.

use crate::core::CardId;
use crate::zones::PlayerZones;
use std::fmt;

/// Number of biomes compared at dusk
pub const BIOME_COUNT: usize = 3;

/// Card-knowledge hooks consulted at phase boundaries.
pub trait CardOracle: fmt::Debug + Send + Sync {
    /// "At noon" triggered effects currently available to a participant,
    /// as opaque effect descriptors the client can act on.
    fn noon_effects(&self, zones: &PlayerZones) -> Vec<String> {
        let _ = zones;
        Vec::new()
    }

    /// Per-biome statistics for the dusk expedition comparison.
    fn biome_stats(&self, zones: &PlayerZones) -> [i32; BIOME_COUNT] {
        let _ = zones;
        [0; BIOME_COUNT]
    }

    /// Fleeting cards are discarded instead of resting to the reserve.
    fn is_fleeting(&self, card: &CardId) -> bool {
        let _ = card;
        false
    }
}

/// Oracle with no card knowledge at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRules;

impl CardOracle for NoRules {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_default_oracle_is_inert() {
        let oracle = NoRules;
        let zones = PlayerZones::new(PlayerId::new(1));
        assert!(oracle.noon_effects(&zones).is_empty());
        assert_eq!(oracle.biome_stats(&zones), [0; BIOME_COUNT]);
        assert!(!oracle.is_fleeting(&CardId::new("c1")));
    }
}
