//! Turn structure: phases and the turn marker.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Steps of a turn, in order.
///
/// Ordering follows the turn, so `Phase::Main1 < Phase::DeclareAttackers`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Untap,
    Upkeep,
    Draw,
    #[default]
    Main1,
    BeginCombat,
    DeclareAttackers,
    DeclareBlockers,
    CombatDamage,
    EndCombat,
    Main2,
    End,
    Cleanup,
}

impl Phase {
    /// Whether this step comes strictly before `other` in the same turn.
    #[must_use]
    pub fn is_before(self, other: Phase) -> bool {
        self < other
    }
}

/// Whose turn it is and where in the turn we are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInfo {
    /// Turn number (starts at 1).
    pub number: u32,
    /// Active player.
    pub active: PlayerId,
    /// Current step.
    pub phase: Phase,
}

impl Default for TurnInfo {
    fn default() -> Self {
        Self {
            number: 1,
            active: PlayerId::new(0),
            phase: Phase::default(),
        }
    }
}
