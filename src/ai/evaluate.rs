//! Value ranking of game objects.
//!
//! `CardEvaluator` supplies two scoring primitives (creatures and lands)
//! and derives every ranking the selector needs from them. All rankings
//! are deterministic: ties go to the object that comes first in the pool.
//!
//! `HeuristicEvaluator` is the default scoring, a hand-tuned formula over
//! power, toughness, keywords and mana value.

use crate::cards::{CardType, GameObject, Keyword};
use crate::core::GameState;

/// Lands on the battlefield beyond which the worst land is the worst
/// permanent overall.
const SURPLUS_LANDS: usize = 6;

/// Scores and ranks objects.
pub trait CardEvaluator {
    /// Desirability of a creature. Higher is better.
    fn creature_value(&self, creature: &GameObject) -> i32;

    /// Desirability of a land. Higher is better.
    fn land_value(&self, land: &GameObject) -> i32;

    /// Mana value plus the mana value of auras its controller attached to it.
    fn permanent_cost(&self, state: &GameState, permanent: &GameObject) -> i32 {
        let auras: u32 = state
            .attachments_of(permanent.id)
            .filter(|a| a.controller == permanent.controller)
            .map(|a| a.mana_value)
            .sum();
        (permanent.mana_value + auras) as i32
    }

    /// Best creature in `pool`.
    fn best_creature<'a>(&self, pool: &[&'a GameObject]) -> Option<&'a GameObject> {
        first_max_by_key(pool.iter().copied().filter(|o| o.is_creature()), |o| {
            self.creature_value(o)
        })
    }

    /// Worst creature in `pool`.
    fn worst_creature<'a>(&self, pool: &[&'a GameObject]) -> Option<&'a GameObject> {
        first_max_by_key(pool.iter().copied().filter(|o| o.is_creature()), |o| {
            -self.creature_value(o)
        })
    }

    /// Best land in `pool`.
    fn best_land<'a>(&self, pool: &[&'a GameObject]) -> Option<&'a GameObject> {
        first_max_by_key(pool.iter().copied().filter(|o| o.is_land()), |o| self.land_value(o))
    }

    /// Worst land in `pool`.
    fn worst_land<'a>(&self, pool: &[&'a GameObject]) -> Option<&'a GameObject> {
        first_max_by_key(pool.iter().copied().filter(|o| o.is_land()), |o| -self.land_value(o))
    }

    /// Permanent with the highest cost (see [`permanent_cost`](Self::permanent_cost)).
    fn most_expensive<'a>(&self, state: &GameState, pool: &[&'a GameObject]) -> Option<&'a GameObject> {
        first_max_by_key(pool.iter().copied(), |o| self.permanent_cost(state, o))
    }

    /// Permanent with the lowest cost.
    fn cheapest<'a>(&self, state: &GameState, pool: &[&'a GameObject]) -> Option<&'a GameObject> {
        first_max_by_key(pool.iter().copied(), |o| -self.permanent_cost(state, o))
    }

    /// Most valuable object: the best creature if all are creatures, the
    /// best land if all are lands, otherwise the most expensive.
    fn best_overall<'a>(&self, state: &GameState, pool: &[&'a GameObject]) -> Option<&'a GameObject> {
        if pool.is_empty() {
            return None;
        }
        if pool.iter().all(|o| o.is_creature()) {
            self.best_creature(pool)
        } else if pool.iter().all(|o| o.is_land()) {
            self.best_land(pool)
        } else {
            self.most_expensive(state, pool)
        }
    }

    /// Least valuable object: a surplus land, then the cheapest artifact or
    /// enchantment, then the worst creature, then the cheapest anything.
    fn worst_permanent<'a>(&self, state: &GameState, pool: &[&'a GameObject]) -> Option<&'a GameObject> {
        if pool.is_empty() {
            return None;
        }

        let lands = pool.iter().filter(|o| o.is_land()).count();
        if lands > SURPLUS_LANDS {
            return self.worst_land(pool);
        }

        let non_creature: Vec<&GameObject> = pool
            .iter()
            .copied()
            .filter(|o| o.is_any_type(&[CardType::Artifact, CardType::Enchantment]))
            .collect();
        if !non_creature.is_empty() {
            return self.cheapest(state, &non_creature);
        }

        self.worst_creature(pool).or_else(|| self.cheapest(state, pool))
    }
}

/// First element with the greatest key.
fn first_max_by_key<'a>(
    items: impl Iterator<Item = &'a GameObject>,
    key: impl Fn(&GameObject) -> i32,
) -> Option<&'a GameObject> {
    let mut best: Option<(&'a GameObject, i32)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}

/// Default hand-tuned evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicEvaluator;

impl CardEvaluator for HeuristicEvaluator {
    fn creature_value(&self, creature: &GameObject) -> i32 {
        let power = creature.net_power();
        let toughness = creature.net_toughness();

        let mut value = 80 + power * 15 + toughness * 10 + creature.mana_value as i32;

        for keyword in &creature.keywords {
            value += match keyword {
                Keyword::Flying => power * 10,
                Keyword::Reach => 5,
                Keyword::FirstStrike => 10 + power * 5,
                Keyword::DoubleStrike => 10 + power * 15,
                Keyword::Deathtouch => 25,
                Keyword::Lifelink => power * 10,
                Keyword::Trample => (power - 1).max(0) * 15 / 2,
                Keyword::Vigilance => power * 5 + toughness * 5,
                Keyword::Haste => 1,
                Keyword::Menace => power * 4,
                Keyword::Indestructible => 70,
                Keyword::Hexproof => 35,
                Keyword::Shroud => 30,
                Keyword::ProtectionFrom(_) => 20,
                Keyword::Defender => -(power * 9 + 40),
            };
        }

        value += 10 * creature.abilities.len() as i32;
        if !creature.tapped {
            value += 1;
        }
        value
    }

    fn land_value(&self, land: &GameObject) -> i32 {
        let mut value = 3;
        if !land.basic {
            value += 4;
        }
        if land.is_creature() {
            value += 15;
        }
        value += 10 * land.abilities.len() as i32;
        if !land.tapped {
            value += 1;
        }
        value
    }
}
