//! Action-batch resolution
//!
//! Batches resolve all-or-nothing: the whole batch is first validated
//! against a scratch copy of the participant's zones, with earlier intents
//! visible to later ones, and only a fully legal batch is committed through
//! the logged move primitive. One bad intent rejects the batch and leaves
//! every zone exactly as it was.

use crate::core::{ActionIntent, CardId, PlayerId};
use crate::game::phase::Phase;
use crate::game::state::MatchState;
use crate::zones::Zone;
use crate::{EngineError, Result};
use smallvec::SmallVec;

/// What a validated `Pass` will do at commit time
enum PassEffect {
    /// Noon: the participant waives their remaining triggered effects
    ClearNoonEffects,
    /// Afternoon: the participant is done playing cards for this round
    EndAfternoon,
}

/// Resolve an ordered batch of intents for one participant.
pub fn resolve_batch(state: &mut MatchState, id: PlayerId, batch: &[ActionIntent]) -> Result<()> {
    // Stage 1: validate everything against a scratch copy of the zones.
    let mut scratch = state.zones(id)?.clone();
    let mut staged: SmallVec<[(CardId, Zone, Zone); 8]> = SmallVec::new();
    let mut pass: Option<PassEffect> = None;

    for (i, intent) in batch.iter().enumerate() {
        match intent {
            ActionIntent::Pass => {
                pass = Some(match state.phase {
                    Phase::Noon => PassEffect::ClearNoonEffects,
                    Phase::Afternoon => PassEffect::EndAfternoon,
                    phase => {
                        return Err(EngineError::InvalidMove(format!(
                            "intent {i}: cannot pass during {phase}"
                        )))
                    }
                });
            }
            ActionIntent::MoveCard { card, from, to } => {
                let from_zone = Zone::from_label(from)?;
                let to_zone = Zone::from_label(to)?;
                if !scratch.get_zone(from_zone).contains(card) {
                    return Err(EngineError::InvalidMove(format!(
                        "intent {i}: card {card} not in {from_zone}"
                    )));
                }
                scratch.get_zone_mut(from_zone).remove(card);
                scratch.get_zone_mut(to_zone).add(card.clone());
                staged.push((card.clone(), from_zone, to_zone));
            }
        }
    }

    // Stage 2: commit. Every staged move was checked against the state the
    // batch itself produces, so none of these can fail.
    for (card, from, to) in staged {
        state.move_card(id, &card, from, to)?;
    }
    match pass {
        Some(PassEffect::ClearNoonEffects) => {
            state.player_mut(id)?.effects_available.clear();
            state.log.normal(&format!("p{id}: passed on noon effects"));
        }
        Some(PassEffect::EndAfternoon) => {
            state.player_mut(id)?.has_passed = true;
            state.log.normal(&format!("p{id}: passed for the afternoon"));
        }
        None => {}
    }

    state.debug_assert_integrity();
    Ok(())
}
