//! Zone system for object locations.
//!
//! ## Key Types
//!
//! - `Zone`: battlefield, hand, library, graveyard, exile
//! - `ZoneManager`: per-zone ordered membership

pub mod manager;

pub use manager::{Zone, ZoneManager};
