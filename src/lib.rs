//! # ccg-target-ai
//!
//! Automated target selection for a turn-based card game simulator.
//!
//! Given a game state and an ability that needs targets, pick targets that
//! are legal, do not undo themselves and are heuristically good, without
//! human input and without stalling the engine. Every call terminates with
//! a definite accept or decline.
//!
//! ## Design Principles
//!
//! 1. **Read-only view**: the AI borrows `&GameState` for one call and only
//!    writes the invoking ability instance's target selection.
//!
//! 2. **Deterministic**: pools keep zone order, ties go to the first
//!    candidate, and the one random decision draws from a seeded `GameRng`.
//!
//! 3. **Configuration over convention**: the priority table, relevant types
//!    and veto knobs live in an `AiProfile`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: objects, zones and the stack use
//!   `im-rs`, so a host can snapshot the state at O(1) cost before asking.
//!
//! - **Explicit tags**: effects are an `EffectType` enum and ability chains
//!   a plain list of nodes, each with its own `TargetSelection`.
//!
//! ## Modules
//!
//! - `core`: object and player ids, turn structure, RNG, game state
//! - `zones`: zone membership in order
//! - `cards`: card characteristics and game objects
//! - `effects`: abilities, costs, targeting restrictions and selections
//! - `stack`: the pending-action stack
//! - `ai`: the target-selection pipeline and `UntapAi`

pub mod ai;
pub mod cards;
pub mod core;
pub mod effects;
pub mod stack;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{GameRng, GameState, ObjectId, Phase, PlayerId, TeamId, TurnInfo};

pub use crate::zones::{Zone, ZoneManager};

pub use crate::cards::{CardType, Color, CounterKind, GameObject, Keyword};

pub use crate::effects::{
    Ability, AbilityError, AbilityInstance, AbilityNode, AbilityRef, ActivationKind, AiLogic, Cost, CostKind,
    CostPart, Defined, EffectType, TargetFilter, TargetRestrictions, TargetSelection,
};

pub use crate::stack::{PendingActionStack, StackEntry, StackEntryId};

pub use crate::ai::{
    AiProfile, CardEvaluator, HeuristicEvaluator, ProfileError, TargetingFailure, UntapAi,
};
