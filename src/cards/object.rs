//! Game objects - cards and permanents as the AI sees them.
//!
//! `GameObject` is a flat snapshot of everything target selection reads:
//! controller, type line, tapped state, name, and the abilities the object
//! grants. It is plain data; the rules engine owns the real card and keeps
//! this view up to date.
//!
//! ## Building objects
//!
//! ```
//! use ccg_target_ai::cards::{CardType, GameObject, Keyword};
//! use ccg_target_ai::core::PlayerId;
//!
//! let bear = GameObject::new("Grizzly Bears", PlayerId::new(0))
//!     .with_type(CardType::Creature)
//!     .with_stats(2, 2)
//!     .with_mana_value(2)
//!     .with_keyword(Keyword::Trample)
//!     .tapped();
//!
//! assert!(bear.is_creature());
//! assert!(bear.tapped);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::types::{CardType, Color, CounterKind, Keyword, TypeLine};
use crate::core::entity::ObjectId;
use crate::core::player::PlayerId;
use crate::effects::Ability;

/// A card or permanent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Unique id (assigned by `GameState::spawn`).
    pub id: ObjectId,

    /// Card name. Identity lookups (priority targets) match on this.
    pub name: String,

    /// Who started the game with this card.
    pub owner: PlayerId,

    /// Who currently controls it.
    pub controller: PlayerId,

    pub types: TypeLine,

    /// Basic supertype (basic lands).
    pub basic: bool,

    pub colors: SmallVec<[Color; 2]>,

    pub keywords: SmallVec<[Keyword; 4]>,

    pub mana_value: u32,

    pub power: i32,

    pub toughness: i32,

    pub counters: SmallVec<[(CounterKind, u32); 2]>,

    pub tapped: bool,

    /// Object this one is attached to (auras, equipment).
    pub attached_to: Option<ObjectId>,

    /// Abilities granted by this object.
    pub abilities: Vec<Ability>,
}

impl GameObject {
    /// Create an untyped, untapped object controlled (and owned) by `controller`.
    ///
    /// The id is a placeholder until the object is spawned into a game.
    #[must_use]
    pub fn new(name: impl Into<String>, controller: PlayerId) -> Self {
        Self {
            id: ObjectId::new(0),
            name: name.into(),
            owner: controller,
            controller,
            types: TypeLine::new(),
            basic: false,
            colors: SmallVec::new(),
            keywords: SmallVec::new(),
            mana_value: 0,
            power: 0,
            toughness: 0,
            counters: SmallVec::new(),
            tapped: false,
            attached_to: None,
            abilities: Vec::new(),
        }
    }

    /// Add a card type (builder pattern).
    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        if !self.types.contains(&card_type) {
            self.types.push(card_type);
        }
        self
    }

    /// Add a color (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        if !self.colors.contains(&color) {
            self.colors.push(color);
        }
        self
    }

    /// Add a keyword (builder pattern).
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    /// Set power and toughness (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, power: i32, toughness: i32) -> Self {
        self.power = power;
        self.toughness = toughness;
        self
    }

    /// Set mana value (builder pattern).
    #[must_use]
    pub fn with_mana_value(mut self, mana_value: u32) -> Self {
        self.mana_value = mana_value;
        self
    }

    /// Mark as a basic land (builder pattern).
    #[must_use]
    pub fn basic(mut self) -> Self {
        self.basic = true;
        self
    }

    /// Start tapped (builder pattern).
    #[must_use]
    pub fn tapped(mut self) -> Self {
        self.tapped = true;
        self
    }

    /// Grant an ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Attach to another object (builder pattern).
    #[must_use]
    pub fn attached_to(mut self, host: ObjectId) -> Self {
        self.attached_to = Some(host);
        self
    }

    /// Put counters on this object (builder pattern).
    #[must_use]
    pub fn with_counters(mut self, kind: CounterKind, amount: u32) -> Self {
        self.add_counters(kind, amount);
        self
    }

    #[must_use]
    pub fn is_type(&self, card_type: CardType) -> bool {
        self.types.contains(&card_type)
    }

    /// Whether the object has at least one of `types`.
    #[must_use]
    pub fn is_any_type(&self, types: &[CardType]) -> bool {
        types.iter().any(|t| self.is_type(*t))
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.is_type(CardType::Creature)
    }

    #[must_use]
    pub fn is_land(&self) -> bool {
        self.is_type(CardType::Land)
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    #[must_use]
    pub fn has_color(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }

    /// Number of counters of a kind.
    #[must_use]
    pub fn counters_of(&self, kind: CounterKind) -> u32 {
        self.counters
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |(_, n)| *n)
    }

    /// Add counters of a kind.
    pub fn add_counters(&mut self, kind: CounterKind, amount: u32) {
        match self.counters.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += amount,
            None => self.counters.push((kind, amount)),
        }
    }

    /// Power after +1/+1 and -1/-1 counters.
    #[must_use]
    pub fn net_power(&self) -> i32 {
        self.power + self.counter_delta()
    }

    /// Toughness after +1/+1 and -1/-1 counters.
    #[must_use]
    pub fn net_toughness(&self) -> i32 {
        self.toughness + self.counter_delta()
    }

    fn counter_delta(&self) -> i32 {
        self.counters_of(CounterKind::P1P1) as i32 - self.counters_of(CounterKind::M1M1) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_dedups() {
        let obj = GameObject::new("Ornithopter", PlayerId::new(0))
            .with_type(CardType::Artifact)
            .with_type(CardType::Creature)
            .with_type(CardType::Artifact)
            .with_keyword(Keyword::Flying)
            .with_keyword(Keyword::Flying);

        assert_eq!(obj.types.len(), 2);
        assert_eq!(obj.keywords.len(), 1);
        assert!(obj.is_creature());
        assert!(obj.is_any_type(&[CardType::Land, CardType::Artifact]));
        assert!(!obj.is_land());
    }

    #[test]
    fn test_net_stats_with_counters() {
        let mut obj = GameObject::new("Bear", PlayerId::new(0))
            .with_type(CardType::Creature)
            .with_stats(2, 2)
            .with_counters(CounterKind::M1M1, 1);

        assert_eq!(obj.net_power(), 1);
        assert_eq!(obj.net_toughness(), 1);

        obj.add_counters(CounterKind::P1P1, 3);
        assert_eq!(obj.counters_of(CounterKind::P1P1), 3);
        assert_eq!(obj.net_toughness(), 4);
    }

    #[test]
    fn test_owner_defaults_to_controller() {
        let obj = GameObject::new("Forest", PlayerId::new(1)).basic().tapped();
        assert_eq!(obj.owner, PlayerId::new(1));
        assert!(obj.basic);
        assert!(obj.tapped);
    }

    #[test]
    fn test_serialization() {
        let obj = GameObject::new("Time Vault", PlayerId::new(0))
            .with_type(CardType::Artifact)
            .with_mana_value(2)
            .tapped();

        let json = serde_json::to_string(&obj).unwrap();
        let deserialized: GameObject = serde_json::from_str(&json).unwrap();
        assert_eq!(obj, deserialized);
    }
}
