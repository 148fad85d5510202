//! Card system: characteristics and game objects.
//!
//! ## Key Types
//!
//! - `CardType`, `Color`, `Keyword`, `CounterKind`: card characteristics
//! - `GameObject`: a card or permanent with its granted abilities

pub mod object;
pub mod types;

pub use object::GameObject;
pub use types::{CardType, Color, CounterKind, Keyword, TypeLine};
