//! Effect targeting: restrictions, legality checks and selections.
//!
//! - `TargetFilter`: declarative predicate over a candidate object
//! - `TargetRestrictions`: min/max count plus filters (all must pass)
//! - `TargetSelection`: the objects chosen for one ability node
//! - `can_be_targeted`: shroud / hexproof / protection rules
//! - `can_target`: full legality of one object for one ability node

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardType, Color, GameObject, Keyword};
use crate::core::{GameState, ObjectId, PlayerId};
use crate::zones::Zone;

/// Filters for valid targets.
///
/// "You" is the controller of the ability; "source" is the object the
/// ability belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFilter {
    /// Target must have at least one of these types.
    AnyType(SmallVec<[CardType; 3]>),
    /// Target must not have this type.
    NotType(CardType),
    /// Target must have this color.
    Color(Color),
    /// Target must be controlled by you.
    YouControl,
    /// Target must be controlled by an opponent of yours.
    OpponentControls,
    /// Target must not be the source.
    Other,
    Tapped,
    Untapped,
}

impl TargetFilter {
    /// Shorthand for `AnyType`.
    pub fn any_type(types: impl IntoIterator<Item = CardType>) -> Self {
        TargetFilter::AnyType(types.into_iter().collect())
    }

    fn matches(&self, state: &GameState, target: &GameObject, controller: PlayerId, source: ObjectId) -> bool {
        match self {
            TargetFilter::AnyType(types) => target.is_any_type(types),
            TargetFilter::NotType(card_type) => !target.is_type(*card_type),
            TargetFilter::Color(color) => target.has_color(*color),
            TargetFilter::YouControl => target.controller == controller,
            TargetFilter::OpponentControls => state.are_opponents(controller, target.controller),
            TargetFilter::Other => target.id != source,
            TargetFilter::Tapped => target.tapped,
            TargetFilter::Untapped => !target.tapped,
        }
    }
}

/// How many targets an ability node takes and which objects qualify.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRestrictions {
    pub min: usize,
    pub max: usize,
    /// All filters must pass. Empty means "any permanent".
    pub valid: Vec<TargetFilter>,
}

impl TargetRestrictions {
    /// Exactly one target.
    #[must_use]
    pub fn single() -> Self {
        Self::between(1, 1)
    }

    /// Between `min` and `max` targets.
    #[must_use]
    pub fn between(min: usize, max: usize) -> Self {
        debug_assert!(min <= max, "min {} exceeds max {}", min, max);
        Self {
            min,
            max,
            valid: Vec::new(),
        }
    }

    /// "Up to `max`" targets.
    #[must_use]
    pub fn up_to(max: usize) -> Self {
        Self::between(0, max)
    }

    /// Add a filter (builder pattern).
    #[must_use]
    pub fn with_filter(mut self, filter: TargetFilter) -> Self {
        self.valid.push(filter);
        self
    }

    /// Whether `target` satisfies every filter for an ability controlled by
    /// `controller` on `source`.
    #[must_use]
    pub fn is_valid(&self, state: &GameState, target: &GameObject, controller: PlayerId, source: ObjectId) -> bool {
        self.valid
            .iter()
            .all(|f| f.matches(state, target, controller, source))
    }

    /// Keep the objects of `pool` that satisfy the filters, in order.
    pub fn filter_valid<'s>(
        &self,
        state: &GameState,
        pool: impl IntoIterator<Item = &'s GameObject>,
        controller: PlayerId,
        source: ObjectId,
    ) -> Vec<&'s GameObject> {
        pool.into_iter()
            .filter(|o| self.is_valid(state, o, controller, source))
            .collect()
    }
}

/// Whether `target` may be targeted by an ability of `source` controlled by
/// `controller`, ignoring the ability's own filters.
///
/// Shroud forbids all targeting, hexproof forbids opponents, protection
/// from a color forbids sources of that color.
#[must_use]
pub fn can_be_targeted(state: &GameState, target: &GameObject, source: &GameObject, controller: PlayerId) -> bool {
    target.keywords.iter().all(|keyword| match keyword {
        Keyword::Shroud => false,
        Keyword::Hexproof => !state.are_opponents(controller, target.controller),
        Keyword::ProtectionFrom(color) => !source.has_color(*color),
        _ => true,
    })
}

/// Full legality: `target` is on the battlefield, targetable, and passes
/// `restrictions`.
#[must_use]
pub fn can_target(
    state: &GameState,
    restrictions: &TargetRestrictions,
    source: &GameObject,
    controller: PlayerId,
    target: &GameObject,
) -> bool {
    state.zone_of(target.id) == Some(Zone::Battlefield)
        && can_be_targeted(state, target, source, controller)
        && restrictions.is_valid(state, target, controller, source.id)
}

/// Objects chosen for one ability node.
///
/// Additions are monotonic; the only way to drop a target is `reset`,
/// which clears the whole selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSelection {
    targets: SmallVec<[ObjectId; 4]>,
}

impl TargetSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target. Returns `false` (and changes nothing) if it was
    /// already chosen.
    pub fn add(&mut self, target: ObjectId) -> bool {
        if self.contains(target) {
            return false;
        }
        self.targets.push(target);
        true
    }

    /// Clear every target.
    pub fn reset(&mut self) {
        self.targets.clear();
    }

    #[must_use]
    pub fn contains(&self, target: ObjectId) -> bool {
        self.targets.contains(&target)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets in the order they were chosen.
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.targets.iter().copied()
    }

    pub fn as_slice(&self) -> &[ObjectId] {
        &self.targets
    }
}

impl FromIterator<ObjectId> for TargetSelection {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.add(id);
        }
        selection
    }
}
