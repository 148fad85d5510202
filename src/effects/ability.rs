//! Abilities and ability instances.
//!
//! An [`Ability`] is the static definition an object grants: one cost and
//! an ordered chain of [`AbilityNode`]s (the root first, then each
//! sub-ability). An [`AbilityInstance`] is one activation of that
//! definition, carrying a [`TargetSelection`] per node. Instances are plain
//! data: the pending-action stack holds them, and target selection fills in
//! the selection of exactly one node.
//!
//! ```
//! use ccg_target_ai::effects::{Ability, AbilityNode, Cost, EffectType, TargetRestrictions};
//!
//! // "{T}: Untap target land. It becomes a creature until end of turn."
//! let ability = Ability::activated(EffectType::Untap, Cost::tap_self())
//!     .with_target(TargetRestrictions::single())
//!     .then(AbilityNode::new(EffectType::Animate));
//!
//! assert_eq!(ability.nodes().len(), 2);
//! assert_eq!(ability.root().effect, EffectType::Untap);
//! ```

use serde::{de, Deserialize, Deserializer, Serialize};
use smallvec::{smallvec, SmallVec};
use thiserror::Error;

use super::cost::Cost;
use super::effect::EffectType;
use super::targeting::{can_target, TargetRestrictions, TargetSelection};
use crate::cards::GameObject;
use crate::core::{GameState, ObjectId, PlayerId};

/// How an ability gets onto the stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationKind {
    /// Paid for and activated by its controller.
    #[default]
    Activated,
    /// Put on the stack by a game event.
    Triggered,
    /// A spell being cast.
    Spell,
}

/// Per-ability hint for the play decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiLogic {
    #[default]
    Default,
    /// Only use at the end of the turn right before the controller's own.
    EndOfTurn,
    /// Never use voluntarily.
    Never,
}

/// Non-targeted object reference for abilities without target restrictions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Defined {
    /// The ability's own source.
    Source,
    Object(ObjectId),
}

/// One link of an ability chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityNode {
    pub effect: EffectType,
    /// `None` for non-targeted effects.
    pub target: Option<TargetRestrictions>,
    /// Aimed at opponents' objects.
    pub curse: bool,
    /// What a non-targeted effect applies to.
    pub defined: Option<Defined>,
}

impl AbilityNode {
    #[must_use]
    pub fn new(effect: EffectType) -> Self {
        Self {
            effect,
            target: None,
            curse: false,
            defined: None,
        }
    }

    /// Set target restrictions (builder pattern).
    #[must_use]
    pub fn with_target(mut self, restrictions: TargetRestrictions) -> Self {
        self.target = Some(restrictions);
        self
    }

    /// Mark as a curse (builder pattern).
    #[must_use]
    pub fn curse(mut self) -> Self {
        self.curse = true;
        self
    }

    /// Set the defined object (builder pattern).
    #[must_use]
    pub fn with_defined(mut self, defined: Defined) -> Self {
        self.defined = Some(defined);
        self
    }
}

/// Static definition of an ability granted by an object.
///
/// The chain always holds at least the root node; deserializing an empty
/// chain fails with [`AbilityError::EmptyChain`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub cost: Cost,
    pub kind: ActivationKind,
    pub ai_logic: AiLogic,
    /// Printed on the card, as opposed to granted by another effect.
    pub intrinsic: bool,
    #[serde(deserialize_with = "non_empty_chain")]
    chain: SmallVec<[AbilityNode; 2]>,
}

/// Malformed ability definition.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum AbilityError {
    #[error("ability has no root node")]
    EmptyChain,
}

fn non_empty_chain<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SmallVec<[AbilityNode; 2]>, D::Error> {
    let chain = SmallVec::<[AbilityNode; 2]>::deserialize(deserializer)?;
    if chain.is_empty() {
        return Err(de::Error::custom(AbilityError::EmptyChain));
    }
    Ok(chain)
}

impl Ability {
    /// An activated ability with a single root node.
    #[must_use]
    pub fn activated(effect: EffectType, cost: Cost) -> Self {
        Self {
            cost,
            kind: ActivationKind::Activated,
            ai_logic: AiLogic::Default,
            intrinsic: true,
            chain: smallvec![AbilityNode::new(effect)],
        }
    }

    /// A triggered ability (no cost) with a single root node.
    #[must_use]
    pub fn triggered(effect: EffectType) -> Self {
        Self {
            kind: ActivationKind::Triggered,
            ..Self::activated(effect, Cost::free())
        }
    }

    /// A spell with a single root node.
    #[must_use]
    pub fn spell(effect: EffectType, cost: Cost) -> Self {
        Self {
            kind: ActivationKind::Spell,
            ..Self::activated(effect, cost)
        }
    }

    /// Set the root node's target restrictions (builder pattern).
    #[must_use]
    pub fn with_target(mut self, restrictions: TargetRestrictions) -> Self {
        self.chain[0].target = Some(restrictions);
        self
    }

    /// Set the root node's defined object (builder pattern).
    #[must_use]
    pub fn with_defined(mut self, defined: Defined) -> Self {
        self.chain[0].defined = Some(defined);
        self
    }

    /// Mark the root node as a curse (builder pattern).
    #[must_use]
    pub fn curse(mut self) -> Self {
        self.chain[0].curse = true;
        self
    }

    /// Set the AI logic hint (builder pattern).
    #[must_use]
    pub fn with_logic(mut self, logic: AiLogic) -> Self {
        self.ai_logic = logic;
        self
    }

    /// Mark as granted by another effect (builder pattern).
    #[must_use]
    pub fn granted(mut self) -> Self {
        self.intrinsic = false;
        self
    }

    /// Append a sub-ability (builder pattern).
    #[must_use]
    pub fn then(mut self, node: AbilityNode) -> Self {
        self.chain.push(node);
        self
    }

    pub fn root(&self) -> &AbilityNode {
        &self.chain[0]
    }

    /// Every node, root first.
    pub fn nodes(&self) -> &[AbilityNode] {
        &self.chain
    }

    /// Whether this ability, activated from `holder`, could legally target
    /// `target` with its root node.
    #[must_use]
    pub fn can_target(&self, state: &GameState, holder: &GameObject, target: &GameObject) -> bool {
        self.root()
            .target
            .as_ref()
            .is_some_and(|r| can_target(state, r, holder, holder.controller, target))
    }
}

/// Which granted ability of which object an instance came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityRef {
    pub source: ObjectId,
    pub index: u16,
}

/// One activation of an ability, with a target selection per node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityInstance {
    pub source: ObjectId,
    pub controller: PlayerId,
    pub ability: Ability,
    /// Set when the instance was built from an object's granted ability.
    pub origin: Option<AbilityRef>,
    selections: SmallVec<[TargetSelection; 2]>,
}

impl AbilityInstance {
    /// Instance of `ability` with empty selections.
    #[must_use]
    pub fn new(source: ObjectId, controller: PlayerId, ability: Ability) -> Self {
        let selections = ability.nodes().iter().map(|_| TargetSelection::new()).collect();
        Self {
            source,
            controller,
            ability,
            origin: None,
            selections,
        }
    }

    /// Instance of the `index`-th ability granted by `source`, controlled by
    /// the source's controller.
    #[must_use]
    pub fn from_object(state: &GameState, source: ObjectId, index: usize) -> Option<Self> {
        let holder = state.object(source)?;
        let ability = holder.abilities.get(index)?.clone();
        let mut instance = Self::new(source, holder.controller, ability);
        instance.origin = Some(AbilityRef {
            source,
            index: index as u16,
        });
        Some(instance)
    }

    /// Pre-fill a node's targets (builder pattern), e.g. for instances
    /// already on the stack.
    #[must_use]
    pub fn with_targets(mut self, node: usize, targets: impl IntoIterator<Item = ObjectId>) -> Self {
        if let Some(selection) = self.selections.get_mut(node) {
            for target in targets {
                selection.add(target);
            }
        }
        self
    }

    pub fn node(&self, index: usize) -> Option<&AbilityNode> {
        self.ability.nodes().get(index)
    }

    /// The node following `index` in the chain.
    pub fn sub_ability_of(&self, index: usize) -> Option<&AbilityNode> {
        self.node(index + 1)
    }

    pub fn selection(&self, index: usize) -> Option<&TargetSelection> {
        self.selections.get(index)
    }

    pub fn selection_mut(&mut self, index: usize) -> Option<&mut TargetSelection> {
        self.selections.get_mut(index)
    }

    /// (node, selection) pairs, root first.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (usize, &AbilityNode, &TargetSelection)> {
        self.ability
            .nodes()
            .iter()
            .zip(self.selections.iter())
            .enumerate()
            .map(|(i, (node, selection))| (i, node, selection))
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.ability.kind == ActivationKind::Triggered
    }

    /// Clear every node's selection.
    pub fn reset_all(&mut self) {
        for selection in &mut self.selections {
            selection.reset();
        }
    }
}
