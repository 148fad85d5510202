//! Card characteristics: types, colors, keywords and counters.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Artifact,
    Battle,
    Creature,
    Enchantment,
    Instant,
    Land,
    Planeswalker,
    Sorcery,
}

impl CardType {
    /// Whether objects of this type can exist on the battlefield.
    #[must_use]
    pub fn is_permanent_type(self) -> bool {
        !matches!(self, CardType::Instant | CardType::Sorcery)
    }
}

/// A (usually short) list of card types.
pub type TypeLine = SmallVec<[CardType; 2]>;

/// The five colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

/// Keyword abilities the AI cares about.
///
/// Targeting keywords (`Hexproof`, `Shroud`, `ProtectionFrom`) are enforced
/// by [`can_be_targeted`](crate::effects::can_be_targeted); the rest feed
/// the creature evaluator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Flying,
    FirstStrike,
    DoubleStrike,
    Deathtouch,
    Lifelink,
    Trample,
    Vigilance,
    Haste,
    Reach,
    Menace,
    Defender,
    Indestructible,
    Hexproof,
    Shroud,
    ProtectionFrom(Color),
}

/// Counter kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    /// +1/+1 counter.
    P1P1,
    /// -1/-1 counter.
    M1M1,
    Charge,
    Loyalty,
}
