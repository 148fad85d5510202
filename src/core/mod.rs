//! Core types: objects, players, turn structure, RNG and game state.

pub mod entity;
pub mod player;
pub mod rng;
pub mod state;
pub mod turn;

pub use entity::ObjectId;
pub use player::{PlayerId, PlayerInfo, PlayerMap, TeamId};
pub use rng::GameRng;
pub use state::GameState;
pub use turn::{Phase, TurnInfo};
