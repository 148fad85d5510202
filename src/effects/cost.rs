//! Ability costs.
//!
//! A `Cost` is a list of parts paid together. The AI inspects costs in two
//! ways: "does this cost consist solely of one kind" (loop detection) and
//! "does it include a resource component" (preference rules).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardType, CounterKind};

/// One component of a cost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostPart {
    /// Pay mana.
    Mana { generic: u32, colored: u32 },
    /// Tap the source ({T}).
    TapSelf,
    /// Untap the source ({Q}).
    UntapSelf,
    /// Put counters on the source.
    AddCounter { kind: CounterKind, amount: u32 },
    /// Remove counters from the source.
    RemoveCounter { kind: CounterKind, amount: u32 },
    /// Discard cards, optionally of one type.
    Discard { amount: u32, card_type: Option<CardType> },
    /// Sacrifice the source.
    SacrificeSelf,
    PayLife(u32),
}

/// Discriminant of a [`CostPart`], for kind-level queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostKind {
    Mana,
    TapSelf,
    UntapSelf,
    AddCounter,
    RemoveCounter,
    Discard,
    SacrificeSelf,
    PayLife,
}

impl CostPart {
    #[must_use]
    pub fn kind(&self) -> CostKind {
        match self {
            CostPart::Mana { .. } => CostKind::Mana,
            CostPart::TapSelf => CostKind::TapSelf,
            CostPart::UntapSelf => CostKind::UntapSelf,
            CostPart::AddCounter { .. } => CostKind::AddCounter,
            CostPart::RemoveCounter { .. } => CostKind::RemoveCounter,
            CostPart::Discard { .. } => CostKind::Discard,
            CostPart::SacrificeSelf => CostKind::SacrificeSelf,
            CostPart::PayLife(_) => CostKind::PayLife,
        }
    }
}

/// A complete cost. Empty means "free".
///
/// ```
/// use ccg_target_ai::effects::{Cost, CostKind, CostPart};
///
/// let tap = Cost::tap_self();
/// assert!(tap.consists_solely_of(CostKind::TapSelf));
///
/// let tap_and_mana = Cost::tap_self().with(CostPart::Mana { generic: 1, colored: 0 });
/// assert!(!tap_and_mana.consists_solely_of(CostKind::TapSelf));
/// assert!(tap_and_mana.has_mana_cost());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    parts: SmallVec<[CostPart; 2]>,
}

impl Cost {
    /// A free cost.
    #[must_use]
    pub fn free() -> Self {
        Self::default()
    }

    /// `{T}`.
    #[must_use]
    pub fn tap_self() -> Self {
        Self::free().with(CostPart::TapSelf)
    }

    /// Generic mana only.
    #[must_use]
    pub fn mana(generic: u32) -> Self {
        Self::free().with(CostPart::Mana { generic, colored: 0 })
    }

    /// Add a part (builder pattern).
    #[must_use]
    pub fn with(mut self, part: CostPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn parts(&self) -> &[CostPart] {
        &self.parts
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.parts.is_empty()
    }

    /// True when the cost is non-empty and every part is of `kind`.
    #[must_use]
    pub fn consists_solely_of(&self, kind: CostKind) -> bool {
        !self.parts.is_empty() && self.parts.iter().all(|p| p.kind() == kind)
    }

    /// True when any part is a mana payment.
    #[must_use]
    pub fn has_mana_cost(&self) -> bool {
        self.parts.iter().any(|p| p.kind() == CostKind::Mana)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_cost_is_not_solely_anything() {
        let cost = Cost::free();
        assert!(cost.is_free());
        assert!(!cost.consists_solely_of(CostKind::TapSelf));
        assert!(!cost.has_mana_cost());
    }

    #[test]
    fn test_double_tap_is_solely_tap() {
        let cost = Cost::tap_self().with(CostPart::TapSelf);
        assert!(cost.consists_solely_of(CostKind::TapSelf));
    }

    #[test]
    fn test_mana_detection() {
        assert!(Cost::mana(2).has_mana_cost());
        assert!(!Cost::tap_self().has_mana_cost());
        let counters = Cost::tap_self().with(CostPart::AddCounter {
            kind: CounterKind::M1M1,
            amount: 1,
        });
        assert!(!counters.has_mana_cost());
        assert_eq!(counters.parts().len(), 2);
    }

    #[test]
    fn test_serialization() {
        let cost = Cost::mana(1).with(CostPart::Discard { amount: 1, card_type: Some(CardType::Land) });
        let json = serde_json::to_string(&cost).unwrap();
        let deserialized: Cost = serde_json::from_str(&json).unwrap();
        assert_eq!(cost, deserialized);
    }
}
