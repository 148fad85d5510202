//! Zone manager for object locations.
//!
//! The `ZoneManager` tracks which zone every object is in and keeps each
//! zone's objects in insertion order. Order is what makes candidate pools
//! deterministic: two queries against an unchanged manager return the same
//! sequence.
//!
//! Backed by `im` persistent structures, so cloning a manager (snapshotting
//! a game) is O(1).
//!
//! ```
//! use ccg_target_ai::core::ObjectId;
//! use ccg_target_ai::zones::{Zone, ZoneManager};
//!
//! let mut zones = ZoneManager::new();
//! zones.add(ObjectId(1), Zone::Hand);
//! zones.add(ObjectId(2), Zone::Battlefield);
//! zones.move_to(ObjectId(1), Zone::Battlefield);
//!
//! let order: Vec<_> = zones.objects_in(Zone::Battlefield).collect();
//! assert_eq!(order, vec![ObjectId(2), ObjectId(1)]);
//! ```

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use crate::core::entity::ObjectId;

/// Game zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Battlefield,
    Hand,
    Library,
    Graveyard,
    Exile,
}

/// Tracks object locations, in insertion order per zone.
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    locations: ImHashMap<ObjectId, Zone>,
    order: ImHashMap<Zone, Vector<ObjectId>>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the end of a zone.
    ///
    /// Panics if the object is already tracked.
    pub fn add(&mut self, object: ObjectId, zone: Zone) {
        if self.locations.contains_key(&object) {
            panic!("Object {:?} already exists in zone manager", object);
        }
        self.locations.insert(object, zone);
        self.order.entry(zone).or_insert_with(Vector::new).push_back(object);
    }

    /// Move an object to the end of another zone.
    ///
    /// Returns the old zone, or `None` if the object wasn't found.
    pub fn move_to(&mut self, object: ObjectId, zone: Zone) -> Option<Zone> {
        let old = self.locations.get(&object).copied()?;
        if old == zone {
            return Some(old);
        }
        self.detach(object, old);
        self.locations.insert(object, zone);
        self.order.entry(zone).or_insert_with(Vector::new).push_back(object);
        Some(old)
    }

    /// Remove an object entirely.
    pub fn remove(&mut self, object: ObjectId) -> Option<Zone> {
        let old = self.locations.remove(&object)?;
        self.detach(object, old);
        Some(old)
    }

    fn detach(&mut self, object: ObjectId, zone: Zone) {
        if let Some(list) = self.order.get_mut(&zone) {
            list.retain(|&o| o != object);
        }
    }

    #[must_use]
    pub fn zone_of(&self, object: ObjectId) -> Option<Zone> {
        self.locations.get(&object).copied()
    }

    /// Objects in a zone, in insertion order.
    pub fn objects_in(&self, zone: Zone) -> impl Iterator<Item = ObjectId> + '_ {
        self.order.get(&zone).into_iter().flat_map(|v| v.iter().copied())
    }

    #[must_use]
    pub fn count(&self, zone: Zone) -> usize {
        self.order.get(&zone).map_or(0, Vector::len)
    }
}
