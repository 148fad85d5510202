//! Runaway-activation veto.
//!
//! An ability that can be activated for free over and over would let the
//! AI spin forever within one turn. Past a per-turn limit each further
//! activation is refused with growing probability. Granted abilities carry
//! a small flat veto chance regardless of count.

use log::debug;

use super::profile::AiProfile;
use crate::core::{GameRng, GameState};
use crate::effects::{AbilityInstance, ActivationKind};

/// Probabilistic gate consulted before targeting starts.
#[derive(Clone, Copy, Debug)]
pub struct RunawayGuard<'a> {
    profile: &'a AiProfile,
}

impl<'a> RunawayGuard<'a> {
    #[must_use]
    pub fn new(profile: &'a AiProfile) -> Self {
        Self { profile }
    }

    /// Veto probability for an activation after `activations` this turn.
    #[must_use]
    pub fn veto_chance(&self, intrinsic: bool, activations: u32) -> f64 {
        if !intrinsic {
            return self.profile.granted_ability_veto_chance;
        }
        if activations < self.profile.runaway_activation_limit {
            return 0.0;
        }
        let exponent = i32::try_from(activations).unwrap_or(i32::MAX);
        1.0 - self.profile.runaway_decay.powi(exponent)
    }

    /// Whether to refuse this activation. Only activated abilities are
    /// ever vetoed.
    pub fn should_veto(&self, state: &GameState, instance: &AbilityInstance, rng: &mut GameRng) -> bool {
        if instance.ability.kind != ActivationKind::Activated {
            return false;
        }
        let activations = instance
            .origin
            .map_or(0, |origin| state.activations_this_turn(origin));
        let chance = self.veto_chance(instance.ability.intrinsic, activations);
        if chance <= 0.0 {
            return false;
        }

        let veto = rng.gen_bool(chance);
        if veto {
            debug!(
                "vetoed activation from {} after {} this turn (chance {:.3})",
                instance.source, activations, chance
            );
        }
        veto
    }
}
