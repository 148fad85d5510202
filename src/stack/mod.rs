//! Pending-action stack.
//!
//! The rules engine owns resolution. This module only models the ordered
//! set of ability instances waiting to resolve, so the AI can see which
//! objects other effects are already about to change.
//!
//! ```
//! use ccg_target_ai::core::{ObjectId, PlayerId};
//! use ccg_target_ai::effects::{Ability, AbilityInstance, Cost, EffectType};
//! use ccg_target_ai::stack::PendingActionStack;
//!
//! let mut stack = PendingActionStack::new();
//! let tap = AbilityInstance::new(ObjectId(1), PlayerId::new(1), Ability::activated(EffectType::Tap, Cost::mana(1)))
//!     .with_targets(0, [ObjectId(4)]);
//! stack.push(tap);
//!
//! let doomed: Vec<_> = stack.iter().flat_map(|e| e.targets_for(EffectType::Tap)).collect();
//! assert_eq!(doomed, vec![ObjectId(4)]);
//! ```

mod pending;

pub use pending::{PendingActionStack, StackEntry, StackEntryId};
