//! Target-selection AI.
//!
//! ## Pipeline
//!
//! ```text
//! CandidatePoolBuilder -> RecursionGuard -> PendingActionCrossReference
//!     -> UntapPreference + GreedySelector
//!     -> (mandatory, short) FallbackTargetingPolicy
//! ```
//!
//! Every stage reads a borrowed `&GameState` and produces a new
//! [`CandidatePool`]; the only mutation is the invoking instance's target
//! selection. [`UntapAi`] wires the stages together and exposes the entry
//! points the rules engine calls.
//!
//! ## Key Types
//!
//! - `UntapAi`: entry points (targeting, play decisions, cost gates)
//! - `AiProfile`: tunable knobs, loadable from JSON
//! - `CardEvaluator` / `HeuristicEvaluator`: value ranking
//! - `TargetingFailure`: why a selection did not happen

mod crossref;
mod evaluate;
mod fallback;
mod guard;
mod outcome;
mod pool;
mod profile;
mod select;
mod untap;
mod veto;

pub use crossref::PendingActionCrossReference;
pub use evaluate::{CardEvaluator, HeuristicEvaluator};
pub use fallback::{FallbackState, FallbackTargetingPolicy};
pub use guard::RecursionGuard;
pub use outcome::{TargetingFailure, TargetingResult};
pub use pool::{CandidatePool, CandidatePoolBuilder, PoolScope};
pub use profile::{AiProfile, ProfileError};
pub use select::{FallbackPreference, GreedySelector, PickRule, PreferenceRanker, UntapPreference};
pub use untap::UntapAi;
pub use veto::RunawayGuard;
