//! AI profile: tunable knobs for target selection.
//!
//! Profiles are plain serde data so they can ship as JSON next to the
//! game's other configuration. Missing fields fall back to defaults.
//!
//! ```
//! use ccg_target_ai::ai::AiProfile;
//!
//! let profile = AiProfile::from_json_str(r#"{ "runaway_activation_limit": 4 }"#).unwrap();
//! assert_eq!(profile.runaway_activation_limit, 4);
//! assert_eq!(profile.priority_targets, vec!["Time Vault".to_string()]);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardType;

/// Errors loading or validating a profile.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Profile parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid profile value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunable parameters for the target-selection AI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiProfile {
    /// Object names picked unconditionally whenever they are candidates.
    /// Earlier entries win over later ones.
    pub priority_targets: Vec<String>,

    /// Types whose tapped state matters for preferred targeting.
    pub relevant_types: Vec<CardType>,

    /// Types whose tapped state barely matters (first fallback tier).
    pub low_impact_types: Vec<CardType>,

    /// Activations per turn of one ability before the runaway veto kicks in.
    pub runaway_activation_limit: u32,

    /// Per-activation survival factor past the limit: the veto fires with
    /// probability `1 - runaway_decay^activations`.
    pub runaway_decay: f64,

    /// Chance of vetoing an activation of a granted (non-intrinsic) ability.
    pub granted_ability_veto_chance: f64,

    /// Lands the actor must control before it will discard lands to pay costs.
    pub discard_land_threshold: usize,
}

impl Default for AiProfile {
    fn default() -> Self {
        Self {
            priority_targets: vec!["Time Vault".to_string()],
            relevant_types: vec![CardType::Creature, CardType::Land, CardType::Artifact],
            low_impact_types: vec![CardType::Enchantment, CardType::Planeswalker],
            runaway_activation_limit: 10,
            runaway_decay: 0.95,
            granted_ability_veto_chance: 0.05,
            discard_land_threshold: 5,
        }
    }
}

impl AiProfile {
    /// Parse and validate a JSON profile.
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let profile: AiProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Read, parse and validate a JSON profile file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(self.runaway_decay > 0.0 && self.runaway_decay <= 1.0) {
            return Err(ProfileError::Invalid {
                field: "runaway_decay",
                reason: format!("{} is outside (0, 1]", self.runaway_decay),
            });
        }
        if !(0.0..=1.0).contains(&self.granted_ability_veto_chance) {
            return Err(ProfileError::Invalid {
                field: "granted_ability_veto_chance",
                reason: format!("{} is outside [0, 1]", self.granted_ability_veto_chance),
            });
        }
        if self.relevant_types.is_empty() {
            return Err(ProfileError::Invalid {
                field: "relevant_types",
                reason: "at least one type is required".to_string(),
            });
        }
        Ok(())
    }

    /// Add a priority target (builder pattern).
    #[must_use]
    pub fn with_priority_target(mut self, name: impl Into<String>) -> Self {
        self.priority_targets.push(name.into());
        self
    }

    /// Set the runaway activation limit (builder pattern).
    #[must_use]
    pub fn with_runaway_limit(mut self, limit: u32) -> Self {
        self.runaway_activation_limit = limit;
        self
    }

    /// Set the granted-ability veto chance (builder pattern). The chance
    /// is clamped to `[0, 1]`; NaN means never.
    #[must_use]
    pub fn with_granted_veto_chance(mut self, chance: f64) -> Self {
        self.granted_ability_veto_chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
        self
    }

    /// Set the discard land threshold (builder pattern).
    #[must_use]
    pub fn with_discard_land_threshold(mut self, lands: usize) -> Self {
        self.discard_land_threshold = lands;
        self
    }

    /// Index of `name` in the priority table, if listed.
    #[must_use]
    pub fn priority_rank(&self, name: &str) -> Option<usize> {
        self.priority_targets.iter().position(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let profile = AiProfile::default();
        assert_eq!(profile.priority_targets, vec!["Time Vault".to_string()]);
        assert_eq!(profile.runaway_activation_limit, 10);
        assert!(profile.validate().is_ok());
        assert_eq!(profile.priority_rank("Time Vault"), Some(0));
        assert_eq!(profile.priority_rank("Mox Pearl"), None);
    }

    #[test]
    fn test_builder_pattern() {
        let profile = AiProfile::default()
            .with_priority_target("Mana Vault")
            .with_runaway_limit(3)
            .with_granted_veto_chance(0.0)
            .with_discard_land_threshold(2);

        assert_eq!(profile.priority_rank("Mana Vault"), Some(1));
        assert_eq!(profile.runaway_activation_limit, 3);
        assert_eq!(profile.granted_ability_veto_chance, 0.0);
        assert_eq!(profile.discard_land_threshold, 2);
    }

    #[test]
    fn test_veto_chance_builder_stays_valid() {
        assert_eq!(AiProfile::default().with_granted_veto_chance(f64::NAN).granted_ability_veto_chance, 0.0);
        assert_eq!(AiProfile::default().with_granted_veto_chance(3.0).granted_ability_veto_chance, 1.0);
        assert!(AiProfile::default().with_granted_veto_chance(-1.0).validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let profile = AiProfile::from_json_str(r#"{ "low_impact_types": ["Enchantment"] }"#).unwrap();
        assert_eq!(profile.low_impact_types, vec![CardType::Enchantment]);
        assert_eq!(profile.relevant_types.len(), 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = AiProfile::from_json_str(r#"{ "runaway_decay": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ProfileError::Invalid { field: "runaway_decay", .. }));

        let err = AiProfile::from_json_str(r#"{ "relevant_types": [] }"#).unwrap_err();
        assert!(matches!(err, ProfileError::Invalid { field: "relevant_types", .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = AiProfile::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ProfileError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AiProfile::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ProfileError::Io(_)));
    }

    #[test]
    fn test_serialization_round_trip() {
        let profile = AiProfile::default().with_priority_target("Mana Vault");
        let json = serde_json::to_string(&profile).unwrap();
        let deserialized = AiProfile::from_json_str(&json).unwrap();
        assert_eq!(profile, deserialized);
    }
}
