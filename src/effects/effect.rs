//! Effect-type tags.
//!
//! Each ability node carries an `EffectType` saying what it does. Target
//! selection only needs the tag, never the effect's implementation, so the
//! tag is a closed enum rather than a trait object.

use serde::{Deserialize, Serialize};

/// What an ability node does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    /// Tap target permanents.
    Tap,
    /// Untap target permanents.
    Untap,
    /// Turn a permanent into a creature until end of turn.
    Animate,
    /// Modify power/toughness.
    Pump,
    Destroy,
    DealDamage,
    Draw,
    /// Anything the AI has no special handling for.
    Other,
}

impl EffectType {
    /// The effect that undoes this one, if any.
    ///
    /// ```
    /// use ccg_target_ai::effects::EffectType;
    ///
    /// assert_eq!(EffectType::Untap.opposite(), Some(EffectType::Tap));
    /// assert_eq!(EffectType::Draw.opposite(), None);
    /// ```
    #[must_use]
    pub fn opposite(self) -> Option<EffectType> {
        match self {
            EffectType::Tap => Some(EffectType::Untap),
            EffectType::Untap => Some(EffectType::Tap),
            _ => None,
        }
    }

    /// Tapped state this effect leaves its targets in, for tap-state effects.
    #[must_use]
    pub fn resulting_tapped_state(self) -> Option<bool> {
        match self {
            EffectType::Tap => Some(true),
            EffectType::Untap => Some(false),
            _ => None,
        }
    }
}

impl std::fmt::Display for EffectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
