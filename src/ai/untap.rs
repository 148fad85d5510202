//! Decision maker for untap effects.
//!
//! `UntapAi` answers every question the rules engine asks about an untap
//! ability controlled by the AI:
//!
//! - [`select_targets`](UntapAi::select_targets): fill a node's target
//!   selection, widening through fallback tiers when the node is mandatory
//! - [`choose_single_best`](UntapAi::choose_single_best): one object from
//!   a list the engine already filtered
//! - [`can_play`](UntapAi::can_play), [`do_trigger`](UntapAi::do_trigger),
//!   [`check_drawback`](UntapAi::check_drawback): accept or decline
//! - [`check_activation_logic`](UntapAi::check_activation_logic) and
//!   [`check_cost_willingness`](UntapAi::check_cost_willingness): cheap
//!   gates consulted before targeting
//!
//! ## Usage
//!
//! ```
//! use ccg_target_ai::ai::UntapAi;
//! use ccg_target_ai::cards::{CardType, GameObject};
//! use ccg_target_ai::core::{GameState, PlayerId};
//! use ccg_target_ai::effects::{Ability, AbilityInstance, Cost, EffectType, TargetRestrictions};
//! use ccg_target_ai::zones::Zone;
//!
//! let mut state = GameState::new(2);
//! let me = PlayerId::new(0);
//! let untapper = Ability::activated(EffectType::Untap, Cost::mana(1))
//!     .with_target(TargetRestrictions::single());
//! let source = state.spawn(Zone::Battlefield, GameObject::new("Untapper", me).with_ability(untapper));
//! let bear = state.spawn(
//!     Zone::Battlefield,
//!     GameObject::new("Bear", me).with_type(CardType::Creature).with_stats(2, 2).tapped(),
//! );
//!
//! let ai = UntapAi::new();
//! let mut instance = AbilityInstance::from_object(&state, source, 0).unwrap();
//! assert!(ai.select_targets(&state, &mut instance, 0, false));
//! assert_eq!(instance.selection(0).unwrap().as_slice(), &[bear]);
//! ```

use log::debug;
use rustc_hash::FxHashSet;

use super::crossref::PendingActionCrossReference;
use super::evaluate::{CardEvaluator, HeuristicEvaluator};
use super::fallback::FallbackTargetingPolicy;
use super::guard::RecursionGuard;
use super::outcome::{TargetingFailure, TargetingResult};
use super::pool::{CandidatePoolBuilder, PoolScope};
use super::profile::AiProfile;
use super::select::{GreedySelector, UntapPreference};
use super::veto::RunawayGuard;
use crate::cards::{CounterKind, GameObject};
use crate::core::{GameRng, GameState, ObjectId, Phase, PlayerId};
use crate::effects::{AbilityInstance, AiLogic, Cost, CostPart, Defined, EffectType};
use crate::zones::Zone;

/// Target-selection AI for untap effects.
#[derive(Clone, Debug, Default)]
pub struct UntapAi<E: CardEvaluator = HeuristicEvaluator> {
    evaluator: E,
    profile: AiProfile,
}

impl UntapAi<HeuristicEvaluator> {
    /// AI with the default evaluator and profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: CardEvaluator> UntapAi<E> {
    /// AI with a custom evaluator and the default profile.
    #[must_use]
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            evaluator,
            profile: AiProfile::default(),
        }
    }

    /// Replace the profile (builder pattern).
    #[must_use]
    pub fn with_profile(mut self, profile: AiProfile) -> Self {
        self.profile = profile;
        self
    }

    #[must_use]
    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    // === Targeting ===

    /// Choose targets for `node` of `instance`. Returns `true` when the
    /// selection ends within the node's bounds.
    ///
    /// Only the node's own selection is touched. It starts empty, and on
    /// failure it is left empty.
    pub fn select_targets(&self, state: &GameState, instance: &mut AbilityInstance, node: usize, mandatory: bool) -> bool {
        self.try_select_targets(state, instance, node, mandatory).is_ok()
    }

    /// [`select_targets`](Self::select_targets) with the reason for a
    /// failure.
    pub fn try_select_targets(
        &self,
        state: &GameState,
        instance: &mut AbilityInstance,
        node: usize,
        mandatory: bool,
    ) -> TargetingResult {
        if let Some(selection) = instance.selection_mut(node) {
            selection.reset();
        }
        let preferred = self.preferred_targeting(state, instance, node);
        let result = match preferred {
            Ok(count) => Ok(count),
            Err(failure) if !mandatory => Err(failure),
            Err(failure) => {
                debug!("preferred targeting failed ({}), falling back", failure);
                self.fallback_targeting(state, instance, node)
            }
        };

        if result.is_err() {
            if let Some(selection) = instance.selection_mut(node) {
                selection.reset();
            }
        }
        result
    }

    /// Greedy pass over tapped relevant permanents in the node's default
    /// scope, after the recursion guard and cross reference.
    fn preferred_targeting(&self, state: &GameState, instance: &mut AbilityInstance, node: usize) -> TargetingResult {
        let Some(ability_node) = instance.node(node) else {
            return Err(TargetingFailure::EmptyCandidatePool);
        };
        let Some(restrictions) = ability_node.target.clone() else {
            return Err(TargetingFailure::EmptyCandidatePool);
        };
        let effect = ability_node.effect;

        let base = CandidatePoolBuilder::new(state).build(instance, node);
        let preferred = base.narrowed(state, |o| {
            !already_in_end_state(o, effect) && o.is_any_type(&self.profile.relevant_types)
        });
        let preferred = RecursionGuard::apply(state, instance, node, &preferred);
        let preferred = PendingActionCrossReference::apply(state, instance, node, &preferred);

        let ranker = UntapPreference::new(&self.evaluator, &self.profile, state, instance, node);
        let Some(selection) = instance.selection_mut(node) else {
            return Err(TargetingFailure::EmptyCandidatePool);
        };
        let mut excluded: FxHashSet<ObjectId> = FxHashSet::default();

        GreedySelector::new(&restrictions, &preferred)
            .with_base(&base)
            .run(state, &ranker, &mut excluded, selection)
    }

    /// Fallback tiers over every valid object on the battlefield.
    fn fallback_targeting(&self, state: &GameState, instance: &mut AbilityInstance, node: usize) -> TargetingResult {
        let Some(ability_node) = instance.node(node) else {
            return Err(TargetingFailure::EmptyCandidatePool);
        };
        let Some(restrictions) = ability_node.target.clone() else {
            return Err(TargetingFailure::EmptyCandidatePool);
        };
        let effect = ability_node.effect;

        let base = CandidatePoolBuilder::new(state).build_in(instance, node, PoolScope::Battlefield);
        let Some(selection) = instance.selection_mut(node) else {
            return Err(TargetingFailure::EmptyCandidatePool);
        };
        FallbackTargetingPolicy::new(&self.evaluator, &self.profile).run(state, &base, &restrictions, effect, selection)
    }

    /// Best object among `candidates` controlled by `actor` or its allies.
    #[must_use]
    pub fn choose_single_best(
        &self,
        state: &GameState,
        actor: PlayerId,
        candidates: &[ObjectId],
        optional: bool,
    ) -> Option<ObjectId> {
        let friendly: Vec<&GameObject> = candidates
            .iter()
            .filter_map(|&id| state.object(id))
            .filter(|o| o.controller == actor || state.are_allies(actor, o.controller))
            .collect();

        let best = self.evaluator.best_overall(state, &friendly).map(|o| o.id);
        debug!(
            "single best for {} among {} friendly of {} (optional: {}): {:?}",
            actor,
            friendly.len(),
            candidates.len(),
            optional,
            best
        );
        best
    }

    // === Play decisions ===

    /// Gate on the ability's AI logic hint.
    ///
    /// `EndOfTurn` abilities are only used in the end step right before
    /// `actor`'s own turn.
    #[must_use]
    pub fn check_activation_logic(
        &self,
        state: &GameState,
        actor: PlayerId,
        instance: &AbilityInstance,
        logic: AiLogic,
    ) -> bool {
        let allowed = match logic {
            AiLogic::Default => true,
            AiLogic::Never => false,
            AiLogic::EndOfTurn => state.next_turn_player() == actor && state.turn.phase == Phase::End,
        };
        if !allowed {
            debug!("{:?} logic declines ability of {} now", logic, instance.source);
        }
        allowed
    }

    /// Whether `actor` is willing to pay the non-mana parts of `cost` for
    /// an ability of `source`.
    ///
    /// `-1/-1` counters must not kill the source. Each discarded card must
    /// be one the AI can spare (see [`AiProfile::discard_land_threshold`]),
    /// unless the hand holds more matching cards than the hand size allows.
    #[must_use]
    pub fn check_cost_willingness(&self, state: &GameState, actor: PlayerId, cost: &Cost, source: ObjectId) -> bool {
        let mut hand = state.objects_in(Zone::Hand, Some(actor));

        for part in cost.parts() {
            match part {
                CostPart::AddCounter {
                    kind: CounterKind::M1M1,
                    amount,
                } => {
                    let Some(object) = state.object(source) else {
                        return false;
                    };
                    let amount = i32::try_from(*amount).unwrap_or(i32::MAX);
                    if object.is_creature() && object.net_toughness().saturating_sub(amount) <= 0 {
                        debug!("refusing {} -1/-1 counters on {}", amount, object.name);
                        return false;
                    }
                }
                CostPart::Discard { amount, card_type } => {
                    let mut matching: Vec<&GameObject> = hand
                        .iter()
                        .copied()
                        .filter(|card| card_type.map_or(true, |t| card.is_type(t)))
                        .collect();
                    if matching.len() > state.player(actor).max_hand_size {
                        continue;
                    }
                    for _ in 0..*amount {
                        let Some(discard) = self.spare_card(state, actor, &matching) else {
                            debug!("no card {} is willing to discard", actor);
                            return false;
                        };
                        matching.retain(|card| card.id != discard);
                        hand.retain(|card| card.id != discard);
                    }
                }
                _ => {}
            }
        }
        true
    }

    /// A card from `matching` the AI can discard without hurting itself.
    fn spare_card(&self, state: &GameState, actor: PlayerId, matching: &[&GameObject]) -> Option<ObjectId> {
        let lands_in_play = state
            .objects_in(Zone::Battlefield, Some(actor))
            .iter()
            .filter(|o| o.is_land())
            .count();
        if lands_in_play < self.profile.discard_land_threshold {
            return None;
        }
        self.evaluator.worst_land(matching).map(|o| o.id)
    }

    /// Decide whether to activate `instance`, choosing root targets if it
    /// has any.
    pub fn can_play(&self, state: &GameState, instance: &mut AbilityInstance, rng: &mut GameRng) -> bool {
        let actor = instance.controller;
        if RunawayGuard::new(&self.profile).should_veto(state, instance, rng) {
            return false;
        }
        if !self.check_activation_logic(state, actor, instance, instance.ability.ai_logic) {
            return false;
        }
        if instance.ability.root().target.is_none() {
            return defined_is_worth_untapping(state, actor, instance, 0);
        }
        self.select_targets(state, instance, 0, false)
    }

    /// Decide whether to put a triggered ability on the stack (or, when
    /// `mandatory`, pick the least harmful targets for it).
    pub fn do_trigger(&self, state: &GameState, instance: &mut AbilityInstance, mandatory: bool) -> bool {
        if instance.ability.root().target.is_none() {
            return mandatory || defined_is_worth_untapping(state, instance.controller, instance, 0);
        }
        self.select_targets(state, instance, 0, mandatory)
    }

    /// Decide whether a sub-ability at `node` is worth its place in the
    /// chain. Untargeted sub-abilities always are.
    pub fn check_drawback(&self, state: &GameState, instance: &mut AbilityInstance, node: usize) -> bool {
        let targeted = instance.node(node).is_some_and(|n| n.target.is_some());
        !targeted || self.select_targets(state, instance, node, false)
    }
}

/// Whether an untap-style effect would change `object`.
fn already_in_end_state(object: &GameObject, effect: EffectType) -> bool {
    effect
        .resulting_tapped_state()
        .is_some_and(|tapped| object.tapped == tapped)
}

/// Untargeted node: declined only when the defined object is already
/// untapped under `actor`'s control.
fn defined_is_worth_untapping(state: &GameState, actor: PlayerId, instance: &AbilityInstance, node: usize) -> bool {
    let defined = instance.node(node).and_then(|n| n.defined).map(|d| match d {
        Defined::Source => instance.source,
        Defined::Object(id) => id,
    });
    match defined.and_then(|id| state.object(id)) {
        Some(object) if !object.tapped && object.controller == actor => {
            debug!("{} is already untapped", object.name);
            false
        }
        _ => true,
    }
}
