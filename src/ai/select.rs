//! Greedy target selection.
//!
//! ## Ranking
//!
//! A [`PreferenceRanker`] picks one object per iteration from what is left
//! of the pool, or declines. Two rankers exist:
//!
//! - [`UntapPreference`]: the tiered rules for preferred targeting
//!   (priority identity, best creature, most valuable permanent when the
//!   ability is free of mana or triggered).
//! - [`FallbackPreference`]: always picks (best creature if the pool is all
//!   creatures, otherwise the most valuable permanent).
//!
//! ## Selection
//!
//! [`GreedySelector`] runs a ranker against an immutable pool plus a
//! growing exclusion set. Each pick lands in the node's
//! [`TargetSelection`] and in the exclusion set, so no object is chosen
//! twice within one resolution even across fallback tiers.

use log::{debug, trace};
use rustc_hash::FxHashSet;

use super::evaluate::CardEvaluator;
use super::outcome::{TargetingFailure, TargetingResult};
use super::pool::CandidatePool;
use super::profile::AiProfile;
use crate::cards::GameObject;
use crate::core::{GameState, ObjectId, Phase};
use crate::effects::{AbilityInstance, EffectType, TargetRestrictions, TargetSelection};

/// Which rule produced a pick. Only used for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickRule {
    /// Named in the profile's priority table.
    Priority,
    /// Every remaining candidate is a creature.
    BestCreature,
    /// Highest cost, for free or triggered abilities.
    MostValuable,
    /// Pool exhausted: the least valuable base candidate, to be animated.
    AnimateFollowUp,
}

/// Picks the next target.
pub trait PreferenceRanker {
    /// One candidate from `remaining` (never empty), or `None` to stop.
    fn pick<'s>(&self, state: &'s GameState, remaining: &[&'s GameObject]) -> Option<(&'s GameObject, PickRule)>;

    /// Called once `remaining` is empty, with what is left of the wider
    /// base pool. Declines by default.
    fn pick_exhausted<'s>(
        &self,
        _state: &'s GameState,
        _base_remaining: &[&'s GameObject],
    ) -> Option<(&'s GameObject, PickRule)> {
        None
    }
}

/// Preferred-targeting rules for untap effects.
#[derive(Debug)]
pub struct UntapPreference<'a, E> {
    evaluator: &'a E,
    profile: &'a AiProfile,
    /// The instance's cost has a mana component and it was not triggered.
    paid_with_mana: bool,
    /// The next chain node animates and combat has not started.
    animate_follow_up: bool,
}

impl<'a, E: CardEvaluator> UntapPreference<'a, E> {
    /// Rules for `node` of `instance` in the current game state.
    #[must_use]
    pub fn new(evaluator: &'a E, profile: &'a AiProfile, state: &GameState, instance: &AbilityInstance, node: usize) -> Self {
        let paid_with_mana = instance.ability.cost.has_mana_cost() && !instance.is_triggered();
        let animate_follow_up = instance
            .sub_ability_of(node)
            .is_some_and(|sub| sub.effect == EffectType::Animate)
            && state.turn.phase.is_before(Phase::DeclareAttackers);
        Self {
            evaluator,
            profile,
            paid_with_mana,
            animate_follow_up,
        }
    }
}

impl<E: CardEvaluator> PreferenceRanker for UntapPreference<'_, E> {
    fn pick<'s>(&self, state: &'s GameState, remaining: &[&'s GameObject]) -> Option<(&'s GameObject, PickRule)> {
        for name in &self.profile.priority_targets {
            if let Some(hit) = remaining.iter().find(|o| &o.name == name) {
                return Some((*hit, PickRule::Priority));
            }
        }

        if remaining.iter().all(|o| o.is_creature()) {
            return self
                .evaluator
                .best_creature(remaining)
                .map(|o| (o, PickRule::BestCreature));
        }

        if !self.paid_with_mana {
            return self
                .evaluator
                .most_expensive(state, remaining)
                .map(|o| (o, PickRule::MostValuable));
        }

        None
    }

    fn pick_exhausted<'s>(
        &self,
        state: &'s GameState,
        base_remaining: &[&'s GameObject],
    ) -> Option<(&'s GameObject, PickRule)> {
        if !self.animate_follow_up {
            return None;
        }
        self.evaluator
            .worst_permanent(state, base_remaining)
            .map(|o| (o, PickRule::AnimateFollowUp))
    }
}

/// Rules used inside fallback tiers.
#[derive(Debug)]
pub struct FallbackPreference<'a, E> {
    evaluator: &'a E,
}

impl<'a, E: CardEvaluator> FallbackPreference<'a, E> {
    #[must_use]
    pub fn new(evaluator: &'a E) -> Self {
        Self { evaluator }
    }
}

impl<E: CardEvaluator> PreferenceRanker for FallbackPreference<'_, E> {
    fn pick<'s>(&self, state: &'s GameState, remaining: &[&'s GameObject]) -> Option<(&'s GameObject, PickRule)> {
        if remaining.iter().all(|o| o.is_creature()) {
            self.evaluator
                .best_creature(remaining)
                .map(|o| (o, PickRule::BestCreature))
        } else {
            self.evaluator
                .most_expensive(state, remaining)
                .map(|o| (o, PickRule::MostValuable))
        }
    }
}

/// Greedy loop over one pool.
#[derive(Clone, Copy, Debug)]
pub struct GreedySelector<'p> {
    min: usize,
    max: usize,
    pool: &'p CandidatePool,
    base: Option<&'p CandidatePool>,
}

impl<'p> GreedySelector<'p> {
    #[must_use]
    pub fn new(restrictions: &TargetRestrictions, pool: &'p CandidatePool) -> Self {
        Self {
            min: restrictions.min,
            max: restrictions.max,
            pool,
            base: None,
        }
    }

    /// Wider pool offered to [`PreferenceRanker::pick_exhausted`] once
    /// `pool` runs dry (builder pattern).
    #[must_use]
    pub fn with_base(mut self, base: &'p CandidatePool) -> Self {
        self.base = Some(base);
        self
    }

    /// Pick until `max` is reached, the pool runs dry or the ranker
    /// declines. Every pick is added to `selection` and `excluded`.
    ///
    /// Succeeds when the selection ends with at least `min` and at least
    /// one target. A ranker that refuses every candidate before the first
    /// pick yields [`TargetingFailure::Declined`]. On failure the picks stay
    /// in `selection`; resetting is up to the caller.
    pub fn run<R: PreferenceRanker>(
        &self,
        state: &GameState,
        ranker: &R,
        excluded: &mut FxHashSet<ObjectId>,
        selection: &mut TargetSelection,
    ) -> TargetingResult {
        let mut declined = false;
        while selection.len() < self.max {
            let remaining = self.pool.without(excluded).objects(state);
            let pick = if remaining.is_empty() {
                match self.base {
                    Some(base) => {
                        let base_remaining = base.without(excluded).objects(state);
                        if base_remaining.is_empty() {
                            None
                        } else {
                            ranker.pick_exhausted(state, &base_remaining)
                        }
                    }
                    None => None,
                }
            } else {
                ranker.pick(state, &remaining)
            };

            let Some((choice, rule)) = pick else {
                trace!("no pick with {} remaining", remaining.len());
                declined = !remaining.is_empty();
                break;
            };
            debug!("picked {} ({}) by {:?}", choice.name, choice.id, rule);
            excluded.insert(choice.id);
            selection.add(choice.id);
        }

        let chosen = selection.len();
        if chosen >= self.min && chosen > 0 {
            return Ok(chosen);
        }
        let exhausted = self.pool.without(excluded).is_empty()
            && self.base.map_or(true, |base| base.without(excluded).is_empty());
        if chosen == 0 && declined {
            Err(TargetingFailure::Declined)
        } else if chosen == 0 && exhausted {
            Err(TargetingFailure::EmptyCandidatePool)
        } else {
            Err(TargetingFailure::UnderMinimum { chosen, min: self.min })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::HeuristicEvaluator;
    use crate::cards::CardType;
    use crate::core::PlayerId;
    use crate::effects::{Ability, AbilityNode, Cost};
    use crate::zones::Zone;

    struct Board {
        state: GameState,
        source: ObjectId,
    }

    impl Board {
        fn new() -> Self {
            let mut state = GameState::new(2);
            let source = state.spawn(Zone::Battlefield, GameObject::new("Source", PlayerId::new(0)));
            Self { state, source }
        }

        fn add(&mut self, object: GameObject) -> ObjectId {
            self.state.spawn(Zone::Battlefield, object)
        }

        fn instance(&self, ability: Ability) -> AbilityInstance {
            AbilityInstance::new(self.source, PlayerId::new(0), ability)
        }
    }

    fn creature(name: &str, power: i32) -> GameObject {
        GameObject::new(name, PlayerId::new(0))
            .with_type(CardType::Creature)
            .with_stats(power, power)
            .tapped()
    }

    fn artifact(name: &str, mana_value: u32) -> GameObject {
        GameObject::new(name, PlayerId::new(0))
            .with_type(CardType::Artifact)
            .with_mana_value(mana_value)
            .tapped()
    }

    fn untap(cost: Cost, restrictions: TargetRestrictions) -> Ability {
        Ability::activated(EffectType::Untap, cost).with_target(restrictions)
    }

    fn run_preferred(board: &Board, instance: &AbilityInstance, pool: &CandidatePool) -> (TargetingResult, TargetSelection) {
        let evaluator = HeuristicEvaluator;
        let profile = AiProfile::default();
        let ranker = UntapPreference::new(&evaluator, &profile, &board.state, instance, 0);
        let restrictions = instance.node(0).unwrap().target.clone().unwrap();
        let mut excluded = FxHashSet::default();
        let mut selection = TargetSelection::new();
        let result = GreedySelector::new(&restrictions, pool).run(&board.state, &ranker, &mut excluded, &mut selection);
        (result, selection)
    }

    #[test]
    fn test_priority_identity_wins_over_value() {
        let mut board = Board::new();
        let big = board.add(creature("Giant", 8));
        let vault = board.add(artifact("Time Vault", 2));
        let pool: CandidatePool = [big, vault].into_iter().collect();
        let instance = board.instance(untap(Cost::mana(1), TargetRestrictions::single()));

        let (result, selection) = run_preferred(&board, &instance, &pool);
        assert_eq!(result, Ok(1));
        assert_eq!(selection.as_slice(), &[vault]);
    }

    #[test]
    fn test_all_creatures_picks_best_creature() {
        let mut board = Board::new();
        let small = board.add(creature("Small", 1));
        let big = board.add(creature("Big", 4));
        let pool: CandidatePool = [small, big].into_iter().collect();
        let instance = board.instance(untap(Cost::mana(1), TargetRestrictions::up_to(2)));

        let (result, selection) = run_preferred(&board, &instance, &pool);
        assert_eq!(result, Ok(2));
        assert_eq!(selection.as_slice(), &[big, small]);
    }

    #[test]
    fn test_mixed_pool_with_mana_cost_declines() {
        let mut board = Board::new();
        let bear = board.add(creature("Bear", 2));
        let rock = board.add(artifact("Rock", 3));
        let pool: CandidatePool = [bear, rock].into_iter().collect();
        let instance = board.instance(untap(Cost::mana(1), TargetRestrictions::single()));

        let (result, selection) = run_preferred(&board, &instance, &pool);
        assert_eq!(result, Err(TargetingFailure::Declined));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_mixed_pool_free_cost_picks_most_expensive() {
        let mut board = Board::new();
        let bear = board.add(creature("Bear", 2).with_mana_value(2));
        let rock = board.add(artifact("Rock", 5));
        let pool: CandidatePool = [bear, rock].into_iter().collect();
        let instance = board.instance(untap(Cost::tap_self(), TargetRestrictions::single()));

        let (result, selection) = run_preferred(&board, &instance, &pool);
        assert_eq!(result, Ok(1));
        assert_eq!(selection.as_slice(), &[rock]);
    }

    #[test]
    fn test_triggered_ignores_mana_rule() {
        let mut board = Board::new();
        let bear = board.add(creature("Bear", 2));
        let rock = board.add(artifact("Rock", 5));
        let pool: CandidatePool = [bear, rock].into_iter().collect();
        let mut ability = Ability::triggered(EffectType::Untap).with_target(TargetRestrictions::single());
        ability.cost = Cost::mana(3);
        let instance = board.instance(ability);

        let (result, selection) = run_preferred(&board, &instance, &pool);
        assert_eq!(result, Ok(1));
        assert_eq!(selection.as_slice(), &[rock]);
    }

    #[test]
    fn test_early_stop_once_minimum_met() {
        let mut board = Board::new();
        let bear = board.add(creature("Bear", 2));
        let vault = board.add(artifact("Time Vault", 1));
        let rock = board.add(artifact("Rock", 3));
        let pool: CandidatePool = [bear, vault, rock].into_iter().collect();
        let instance = board.instance(untap(Cost::mana(1), TargetRestrictions::between(1, 3)));

        // Priority pick, then the mixed remainder declines under a mana cost.
        let (result, selection) = run_preferred(&board, &instance, &pool);
        assert_eq!(result, Ok(1));
        assert_eq!(selection.as_slice(), &[vault]);
    }

    #[test]
    fn test_empty_pool() {
        let board = Board::new();
        let instance = board.instance(untap(Cost::mana(1), TargetRestrictions::single()));
        let (result, _) = run_preferred(&board, &instance, &CandidatePool::new());
        assert_eq!(result, Err(TargetingFailure::EmptyCandidatePool));
    }

    #[test]
    fn test_zero_targets_is_never_success() {
        let board = Board::new();
        let instance = board.instance(untap(Cost::mana(1), TargetRestrictions::up_to(1)));
        let (result, _) = run_preferred(&board, &instance, &CandidatePool::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_animate_follow_up_picks_worst_base_permanent() {
        let mut board = Board::new();
        let untapped_land = board.add(GameObject::new("Forest", PlayerId::new(0)).with_type(CardType::Land).basic());
        let untapped_bear = board.add(GameObject::new("Bear", PlayerId::new(0)).with_type(CardType::Creature).with_stats(2, 2));
        let ability = untap(Cost::mana(2), TargetRestrictions::single())
            .then(AbilityNode::new(EffectType::Animate));
        let instance = board.instance(ability);
        board.state.turn.phase = Phase::Main1;

        let evaluator = HeuristicEvaluator;
        let profile = AiProfile::default();
        let ranker = UntapPreference::new(&evaluator, &profile, &board.state, &instance, 0);
        let preferred = CandidatePool::new();
        let base: CandidatePool = [untapped_bear, untapped_land].into_iter().collect();
        let mut excluded = FxHashSet::default();
        let mut selection = TargetSelection::new();

        let result = GreedySelector::new(&TargetRestrictions::single(), &preferred)
            .with_base(&base)
            .run(&board.state, &ranker, &mut excluded, &mut selection);
        assert_eq!(result, Ok(1));
        assert_eq!(selection.as_slice(), &[untapped_bear]);
    }

    #[test]
    fn test_animate_follow_up_not_after_combat_starts() {
        let mut board = Board::new();
        let land = board.add(GameObject::new("Forest", PlayerId::new(0)).with_type(CardType::Land));
        let ability = untap(Cost::mana(2), TargetRestrictions::single()).then(AbilityNode::new(EffectType::Animate));
        let instance = board.instance(ability);
        board.state.turn.phase = Phase::DeclareAttackers;

        let evaluator = HeuristicEvaluator;
        let profile = AiProfile::default();
        let ranker = UntapPreference::new(&evaluator, &profile, &board.state, &instance, 0);
        let preferred = CandidatePool::new();
        let base: CandidatePool = [land].into_iter().collect();
        let mut excluded = FxHashSet::default();
        let mut selection = TargetSelection::new();

        let result = GreedySelector::new(&TargetRestrictions::single(), &preferred)
            .with_base(&base)
            .run(&board.state, &ranker, &mut excluded, &mut selection);
        assert!(result.is_err());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_fallback_ranker_always_picks() {
        let mut board = Board::new();
        let bear = board.add(creature("Bear", 2).with_mana_value(2));
        let rock = board.add(artifact("Rock", 1));
        let pool: CandidatePool = [rock, bear].into_iter().collect();

        let evaluator = HeuristicEvaluator;
        let ranker = FallbackPreference::new(&evaluator);
        let mut excluded = FxHashSet::default();
        let mut selection = TargetSelection::new();
        let result = GreedySelector::new(&TargetRestrictions::up_to(2), &pool).run(&board.state, &ranker, &mut excluded, &mut selection);

        assert_eq!(result, Ok(2));
        // Mixed: most expensive first; then only the artifact remains.
        assert_eq!(selection.as_slice(), &[bear, rock]);
        assert!(excluded.contains(&bear) && excluded.contains(&rock));
    }

    #[test]
    fn test_excluded_objects_are_skipped() {
        let mut board = Board::new();
        let small = board.add(creature("Small", 1));
        let big = board.add(creature("Big", 4));
        let pool: CandidatePool = [small, big].into_iter().collect();

        let evaluator = HeuristicEvaluator;
        let ranker = FallbackPreference::new(&evaluator);
        let mut excluded = FxHashSet::default();
        excluded.insert(big);
        let mut selection = TargetSelection::new();
        let result = GreedySelector::new(&TargetRestrictions::single(), &pool).run(&board.state, &ranker, &mut excluded, &mut selection);

        assert_eq!(result, Ok(1));
        assert_eq!(selection.as_slice(), &[small]);
    }
}
