//! The pending-action stack.
//!
//! Ability instances waiting to resolve, bottom first. The rules engine
//! pushes and pops; target selection only enumerates entries to see which
//! objects are already about to change state.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::effects::{AbilityInstance, EffectType};
use crate::core::ObjectId;

/// Unique identifier for a stack entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackEntryId(pub u32);

impl StackEntryId {
    /// Create a new stack entry ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for StackEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StackEntry({})", self.0)
    }
}

/// An entry on the stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    pub id: StackEntryId,
    pub instance: AbilityInstance,
}

impl StackEntry {
    /// Targets chosen by every node of this entry whose effect is `effect`.
    pub fn targets_for(&self, effect: EffectType) -> impl Iterator<Item = ObjectId> + '_ {
        self.instance
            .iter_nodes()
            .filter(move |(_, node, _)| node.effect == effect)
            .flat_map(|(_, _, selection)| selection.iter())
    }
}

/// Ordered collection of not-yet-resolved ability instances.
///
/// Index 0 is the bottom; the last entry resolves first.
#[derive(Clone, Debug, Default)]
pub struct PendingActionStack {
    entries: Vector<StackEntry>,
    next_id: u32,
}

impl PendingActionStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an instance on top. Returns its entry id.
    pub fn push(&mut self, instance: AbilityInstance) -> StackEntryId {
        let id = StackEntryId::new(self.next_id);
        self.next_id += 1;
        self.entries.push_back(StackEntry { id, instance });
        id
    }

    /// Remove and return the top entry.
    pub fn pop(&mut self) -> Option<StackEntry> {
        self.entries.pop_back()
    }

    /// Remove an entry wherever it is (countered, fizzled).
    pub fn remove(&mut self, id: StackEntryId) -> Option<StackEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Entries bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &StackEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
