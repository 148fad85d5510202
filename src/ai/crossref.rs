//! Cross-reference against effects that have not resolved yet.
//!
//! Untapping something the same chain already untaps is wasted, and
//! untapping something a pending tap effect is about to tap is worse. Both
//! sets of objects come out of the pool. Pending effects are assumed to
//! resolve as they stand; a later counter is not anticipated.

use log::trace;
use rustc_hash::FxHashSet;

use super::pool::CandidatePool;
use crate::core::{GameState, ObjectId};
use crate::effects::AbilityInstance;

/// Objects already claimed by sibling nodes or pending opposite effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct PendingActionCrossReference;

impl PendingActionCrossReference {
    /// Targets chosen by every other node of `instance` sharing the
    /// effect of `node`.
    #[must_use]
    pub fn chain_targets(instance: &AbilityInstance, node: usize) -> FxHashSet<ObjectId> {
        let Some(effect) = instance.node(node).map(|n| n.effect) else {
            return FxHashSet::default();
        };
        instance
            .iter_nodes()
            .filter(|&(i, n, _)| i != node && n.effect == effect)
            .flat_map(|(_, _, selection)| selection.iter())
            .collect()
    }

    /// Targets of pending stack entries whose effect is the opposite of
    /// the effect of `node`.
    #[must_use]
    pub fn stack_targets(state: &GameState, instance: &AbilityInstance, node: usize) -> FxHashSet<ObjectId> {
        let Some(opposite) = instance.node(node).and_then(|n| n.effect.opposite()) else {
            return FxHashSet::default();
        };
        state
            .stack
            .iter()
            .flat_map(|entry| entry.targets_for(opposite))
            .collect()
    }

    /// Union of both passes.
    #[must_use]
    pub fn claimed(state: &GameState, instance: &AbilityInstance, node: usize) -> FxHashSet<ObjectId> {
        let mut claimed = Self::chain_targets(instance, node);
        claimed.extend(Self::stack_targets(state, instance, node));
        claimed
    }

    /// Filter `pool` for the given node.
    #[must_use]
    pub fn apply(state: &GameState, instance: &AbilityInstance, node: usize, pool: &CandidatePool) -> CandidatePool {
        let claimed = Self::claimed(state, instance, node);
        if claimed.is_empty() {
            return pool.clone();
        }
        let filtered = pool.without(&claimed);
        trace!("cross reference: {} -> {} candidates", pool.len(), filtered.len());
        filtered
    }
}
