//! Game state as the AI reads it.
//!
//! ## GameState
//!
//! - Players and their teams (allies / opponents)
//! - Objects and the zones they are in
//! - The pending-action stack
//! - Turn marker and per-turn activation counters
//!
//! Objects, zones and the stack use `im` persistent structures, so a host
//! can clone the state before asking the AI for a decision at O(1) cost.
//! The AI itself only ever takes `&GameState`.

use im::HashMap as ImHashMap;

use super::entity::ObjectId;
use super::player::{PlayerId, PlayerInfo, PlayerMap, TeamId};
use super::turn::TurnInfo;
use crate::cards::GameObject;
use crate::effects::AbilityRef;
use crate::stack::PendingActionStack;
use crate::zones::{Zone, ZoneManager};

/// Complete game state.
#[derive(Clone, Debug)]
pub struct GameState {
    players: PlayerMap<PlayerInfo>,
    objects: ImHashMap<ObjectId, GameObject>,
    zones: ZoneManager,
    activations: ImHashMap<AbilityRef, u32>,
    next_object: u32,

    /// Abilities waiting to resolve.
    pub stack: PendingActionStack,

    /// Whose turn, which step.
    pub turn: TurnInfo,
}

impl GameState {
    /// Create a game with `player_count` players, each on its own team.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            players: PlayerMap::new(player_count, PlayerInfo::solo),
            objects: ImHashMap::new(),
            zones: ZoneManager::new(),
            activations: ImHashMap::new(),
            next_object: 1,
            stack: PendingActionStack::new(),
            turn: TurnInfo::default(),
        }
    }

    // === Players ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    pub fn player(&self, player: PlayerId) -> &PlayerInfo {
        &self.players[player]
    }

    /// Put a player on a team.
    pub fn set_team(&mut self, player: PlayerId, team: TeamId) {
        self.players[player].team = team;
    }

    /// Change a player's maximum hand size.
    pub fn set_max_hand_size(&mut self, player: PlayerId, size: usize) {
        self.players[player].max_hand_size = size;
    }

    /// Whether two distinct players share a team.
    #[must_use]
    pub fn are_allies(&self, a: PlayerId, b: PlayerId) -> bool {
        a != b && self.players[a].team == self.players[b].team
    }

    /// Whether two players are on different teams.
    #[must_use]
    pub fn are_opponents(&self, a: PlayerId, b: PlayerId) -> bool {
        self.players[a].team != self.players[b].team
    }

    /// Allies of `player` (excluding itself), in seat order.
    pub fn allies_of(&self, player: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        PlayerId::all(self.player_count()).filter(move |&p| self.are_allies(player, p))
    }

    /// Opponents of `player`, in seat order.
    pub fn opponents_of(&self, player: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        PlayerId::all(self.player_count()).filter(move |&p| self.are_opponents(player, p))
    }

    /// The first opponent after `player` in turn order.
    #[must_use]
    pub fn next_opponent(&self, player: PlayerId) -> Option<PlayerId> {
        let count = self.player_count();
        let mut seat = player.next(count);
        while seat != player {
            if self.are_opponents(player, seat) {
                return Some(seat);
            }
            seat = seat.next(count);
        }
        None
    }

    /// Player who takes the next turn.
    #[must_use]
    pub fn next_turn_player(&self) -> PlayerId {
        self.turn.active.next(self.player_count())
    }

    // === Objects ===

    /// Add an object to a zone, assigning it a fresh id.
    pub fn spawn(&mut self, zone: Zone, mut object: GameObject) -> ObjectId {
        let id = ObjectId::new(self.next_object);
        self.next_object += 1;
        object.id = id;
        self.objects.insert(id, object);
        self.zones.add(id, zone);
        id
    }

    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(&id)
    }

    #[must_use]
    pub fn zone_of(&self, id: ObjectId) -> Option<Zone> {
        self.zones.zone_of(id)
    }

    /// Move an object between zones. Returns the old zone.
    pub fn move_object(&mut self, id: ObjectId, zone: Zone) -> Option<Zone> {
        self.zones.move_to(id, zone)
    }

    /// Objects in a zone in zone order, optionally only those `controller`
    /// controls.
    pub fn objects_in(&self, zone: Zone, controller: Option<PlayerId>) -> Vec<&GameObject> {
        self.zones
            .objects_in(zone)
            .filter_map(|id| self.objects.get(&id))
            .filter(|o| controller.map_or(true, |c| o.controller == c))
            .collect()
    }

    /// Battlefield objects attached to `host`.
    pub fn attachments_of(&self, host: ObjectId) -> impl Iterator<Item = &GameObject> + '_ {
        self.zones
            .objects_in(Zone::Battlefield)
            .filter_map(|id| self.objects.get(&id))
            .filter(move |o| o.attached_to == Some(host))
    }

    // === Activation counters ===

    /// Record one activation of an ability this turn.
    pub fn record_activation(&mut self, ability: AbilityRef) {
        *self.activations.entry(ability).or_insert(0) += 1;
    }

    /// Activations of an ability this turn.
    #[must_use]
    pub fn activations_this_turn(&self, ability: AbilityRef) -> u32 {
        self.activations.get(&ability).copied().unwrap_or(0)
    }

    /// Start the next player's turn: bump the turn number, reset the step
    /// and clear activation counters.
    pub fn advance_turn(&mut self) {
        self.turn.number += 1;
        self.turn.active = self.next_turn_player();
        self.turn.phase = super::turn::Phase::Untap;
        self.activations.clear();
    }
}
