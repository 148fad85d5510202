//! Candidate pools.
//!
//! A `CandidatePool` is an owned, ordered snapshot of object ids. Every
//! stage of target selection narrows a pool into a new one; nothing ever
//! mutates the game state while a pool is alive, and reordering never
//! happens, so two builds against the same state compare equal.

use log::trace;
use rustc_hash::FxHashSet;

use crate::cards::GameObject;
use crate::core::{GameState, ObjectId, PlayerId};
use crate::effects::{can_be_targeted, AbilityInstance};
use crate::zones::Zone;

/// Ordered snapshot of candidate object ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidatePool {
    ids: Vec<ObjectId>,
}

impl CandidatePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.ids
    }

    /// Keep the ids whose object satisfies `keep`. Ids no longer in the
    /// state are dropped.
    #[must_use]
    pub fn narrowed(&self, state: &GameState, mut keep: impl FnMut(&GameObject) -> bool) -> Self {
        self.ids
            .iter()
            .copied()
            .filter(|&id| state.object(id).is_some_and(&mut keep))
            .collect()
    }

    /// Pool minus every id in `excluded`.
    #[must_use]
    pub fn without(&self, excluded: &FxHashSet<ObjectId>) -> Self {
        self.ids.iter().copied().filter(|id| !excluded.contains(id)).collect()
    }

    /// Resolve ids to objects, in pool order.
    pub fn objects<'s>(&self, state: &'s GameState) -> Vec<&'s GameObject> {
        self.ids.iter().filter_map(|&id| state.object(id)).collect()
    }
}

impl FromIterator<ObjectId> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Whose battlefield a pool is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolScope {
    /// Objects controlled by one player.
    ControlledBy(PlayerId),
    /// Every object on the battlefield.
    Battlefield,
}

/// Builds the initial legal pool for one ability node.
#[derive(Clone, Copy, Debug)]
pub struct CandidatePoolBuilder<'a> {
    state: &'a GameState,
}

impl<'a> CandidatePoolBuilder<'a> {
    #[must_use]
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    /// Scope a node targets by default: the controller's own battlefield, or
    /// the next opponent's for curses. `None` if a curse has no opponent.
    #[must_use]
    pub fn default_scope(&self, instance: &AbilityInstance, node: usize) -> Option<PoolScope> {
        let curse = instance.node(node).is_some_and(|n| n.curse);
        if curse {
            self.state
                .next_opponent(instance.controller)
                .map(PoolScope::ControlledBy)
        } else {
            Some(PoolScope::ControlledBy(instance.controller))
        }
    }

    /// Pool in the node's default scope.
    #[must_use]
    pub fn build(&self, instance: &AbilityInstance, node: usize) -> CandidatePool {
        match self.default_scope(instance, node) {
            Some(scope) => self.build_in(instance, node, scope),
            None => CandidatePool::new(),
        }
    }

    /// Battlefield objects in `scope` that are targetable by the instance's
    /// source and pass the node's restrictions, in zone order.
    ///
    /// Untargeted nodes and instances whose source no longer exists get an
    /// empty pool.
    #[must_use]
    pub fn build_in(&self, instance: &AbilityInstance, node: usize, scope: PoolScope) -> CandidatePool {
        let Some(restrictions) = instance.node(node).and_then(|n| n.target.as_ref()) else {
            return CandidatePool::new();
        };
        let Some(source) = self.state.object(instance.source) else {
            return CandidatePool::new();
        };

        let owner = match scope {
            PoolScope::ControlledBy(player) => Some(player),
            PoolScope::Battlefield => None,
        };
        let zone = self.state.objects_in(Zone::Battlefield, owner);
        let zone_size = zone.len();

        let targetable = zone
            .into_iter()
            .filter(|o| can_be_targeted(self.state, o, source, instance.controller));
        let pool: CandidatePool = restrictions
            .filter_valid(self.state, targetable, instance.controller, source.id)
            .into_iter()
            .map(|o| o.id)
            .collect();

        trace!(
            "candidate pool for {} node {}: {} of {} in {:?}",
            instance.source,
            node,
            pool.len(),
            zone_size,
            scope
        );
        pool
    }
}
