//! Ability definitions as target selection sees them.
//!
//! - `EffectType`: tag for what an ability node does
//! - `Cost` / `CostPart`: what the controller pays
//! - `Ability` / `AbilityNode`: a granted ability and its chain of sub-abilities
//! - `AbilityInstance`: one activation with per-node target selections
//! - `TargetRestrictions` / `TargetFilter`: how many and which targets
//!
//! The effects themselves are applied by the rules engine; this crate only
//! reads the tags, costs and restrictions.

mod ability;
mod cost;
mod effect;
mod targeting;

pub use ability::{
    Ability, AbilityError, AbilityInstance, AbilityNode, AbilityRef, ActivationKind, AiLogic, Defined,
};
pub use cost::{Cost, CostKind, CostPart};
pub use effect::EffectType;
pub use targeting::{
    can_be_targeted, can_target, TargetFilter, TargetRestrictions, TargetSelection,
};
