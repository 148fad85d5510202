//! Loop prevention for self-tapping untap abilities.
//!
//! Two objects that each say "{T}: untap target permanent" can untap each
//! other forever. Such partners are removed from the pool before ranking.

use log::trace;

use super::pool::CandidatePool;
use crate::cards::GameObject;
use crate::core::GameState;
use crate::effects::{AbilityInstance, CostKind, EffectType};

/// Removes candidates that could immediately return the favour.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecursionGuard;

impl RecursionGuard {
    /// Whether the guard is active for this node: an untap paid for by
    /// tapping the source and nothing else.
    #[must_use]
    pub fn applies(instance: &AbilityInstance, node: usize) -> bool {
        instance.node(node).is_some_and(|n| n.effect == EffectType::Untap)
            && instance.ability.cost.consists_solely_of(CostKind::TapSelf)
    }

    /// Whether `candidate` grants an ability with the same effect, a cost
    /// of solely tapping itself, that could target `source`.
    #[must_use]
    pub fn would_recurse(state: &GameState, candidate: &GameObject, source: &GameObject, effect: EffectType) -> bool {
        candidate.abilities.iter().any(|ability| {
            ability.root().effect == effect
                && ability.cost.consists_solely_of(CostKind::TapSelf)
                && ability.can_target(state, candidate, source)
        })
    }

    /// Filter `pool` for the given node. A no-op when the guard does not
    /// apply.
    #[must_use]
    pub fn apply(state: &GameState, instance: &AbilityInstance, node: usize, pool: &CandidatePool) -> CandidatePool {
        if !Self::applies(instance, node) {
            return pool.clone();
        }
        let Some(source) = state.object(instance.source) else {
            return pool.clone();
        };
        let effect = instance.ability.nodes()[node].effect;

        let guarded = pool.narrowed(state, |candidate| !Self::would_recurse(state, candidate, source, effect));
        trace!("recursion guard: {} -> {} candidates", pool.len(), guarded.len());
        guarded
    }
}
