//! Object identification.
//!
//! Every card or permanent in a game has a unique `ObjectId`. Ids are
//! handed out by [`GameState::spawn`](crate::core::GameState::spawn) in
//! increasing order, so sorting by id reproduces creation order.
//!
//! ```
//! use ccg_target_ai::core::ObjectId;
//!
//! let id = ObjectId::new(7);
//! assert_eq!(id.raw(), 7);
//! assert_eq!(format!("{}", id), "Object(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a game object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Create an object id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ObjectId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Object({})", self.0)
    }
}
