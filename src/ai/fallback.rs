//! Fallback targeting for mandatory abilities.
//!
//! When preferred targeting falls short and the ability must have targets,
//! the pool widens through three tiers, each visited once in order:
//!
//! | State               | Candidates                                    |
//! |---------------------|-----------------------------------------------|
//! | `LowImpact`         | low-impact types (enchantments, planeswalkers) |
//! | `AlreadyInEndState` | objects the effect would not change           |
//! | `AnythingValid`     | the whole base pool                           |
//!
//! A tier that ends within bounds stops the machine. A tier that falls
//! short keeps its picks and hands over to the next one. If the last tier
//! falls short the selection is reset.

use log::debug;
use rustc_hash::FxHashSet;

use super::evaluate::CardEvaluator;
use super::outcome::{TargetingFailure, TargetingResult};
use super::pool::CandidatePool;
use super::profile::AiProfile;
use super::select::{FallbackPreference, GreedySelector};
use crate::cards::GameObject;
use crate::core::{GameState, ObjectId};
use crate::effects::{EffectType, TargetRestrictions, TargetSelection};

/// Fallback tiers, in visiting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackState {
    LowImpact,
    AlreadyInEndState,
    AnythingValid,
}

impl FallbackState {
    /// Tier after this one.
    #[must_use]
    pub fn next(self) -> Option<FallbackState> {
        match self {
            FallbackState::LowImpact => Some(FallbackState::AlreadyInEndState),
            FallbackState::AlreadyInEndState => Some(FallbackState::AnythingValid),
            FallbackState::AnythingValid => None,
        }
    }

    /// Whether `object` belongs to this tier's pool.
    #[must_use]
    pub fn admits(self, object: &GameObject, profile: &AiProfile, effect: EffectType) -> bool {
        match self {
            FallbackState::LowImpact => object.is_any_type(&profile.low_impact_types),
            FallbackState::AlreadyInEndState => effect
                .resulting_tapped_state()
                .is_some_and(|tapped| object.tapped == tapped),
            FallbackState::AnythingValid => true,
        }
    }
}

/// Drives the fallback tiers.
#[derive(Debug)]
pub struct FallbackTargetingPolicy<'a, E> {
    evaluator: &'a E,
    profile: &'a AiProfile,
}

impl<'a, E: CardEvaluator> FallbackTargetingPolicy<'a, E> {
    #[must_use]
    pub fn new(evaluator: &'a E, profile: &'a AiProfile) -> Self {
        Self { evaluator, profile }
    }

    /// Run every tier against `base` until one ends within bounds.
    ///
    /// `selection` may already hold preferred picks; they count towards
    /// the bounds and are never chosen again.
    pub fn run(
        &self,
        state: &GameState,
        base: &CandidatePool,
        restrictions: &TargetRestrictions,
        effect: EffectType,
        selection: &mut TargetSelection,
    ) -> TargetingResult {
        let ranker = FallbackPreference::new(self.evaluator);
        let mut excluded: FxHashSet<ObjectId> = selection.iter().collect();
        let mut tier = Some(FallbackState::LowImpact);

        while let Some(current) = tier {
            let pool = base
                .without(&excluded)
                .narrowed(state, |o| current.admits(o, self.profile, effect));

            if pool.is_empty() {
                debug!("fallback {:?}: empty, advancing", current);
            } else {
                match GreedySelector::new(restrictions, &pool).run(state, &ranker, &mut excluded, selection) {
                    Ok(count) => {
                        debug!("fallback {:?}: {} targets", current, count);
                        return Ok(count);
                    }
                    Err(failure) => debug!("fallback {:?}: {}, advancing", current, failure),
                }
            }
            tier = current.next();
        }

        let chosen = selection.len();
        selection.reset();
        if chosen == 0 {
            Err(TargetingFailure::EmptyCandidatePool)
        } else {
            Err(TargetingFailure::UnderMinimum {
                chosen,
                min: restrictions.min,
            })
        }
    }
}
