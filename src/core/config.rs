//! Match configuration.
//!
//! Thresholds and starting values are fixed for the duration of a match.
//! `MatchConfig` is built with `Default` plus `with_*` builder methods, or
//! deserialized from JSON, and must pass `validate()` before a controller
//! accepts it.

use serde::{Deserialize, Serialize};

use super::player::{PlayerMap, PlayerRole};
use super::resources::{ResourceKind, ResourceMap};
use crate::error::ConfigError;

/// Rules constants and seat setup for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Tower height that wins the match.
    pub win_tower_height: i32,

    /// Stockpile of any single resource that wins the match.
    pub win_resource_amount: i32,

    /// Hands are refilled to this size at the start of every turn.
    pub hand_size: usize,

    pub starting_tower: i32,
    pub starting_wall: i32,
    pub starting_resources: ResourceMap<i32>,
    pub starting_production: ResourceMap<i32>,

    /// Copies of each catalog card placed in the deck pool.
    pub copies_per_card: usize,

    pub player_names: PlayerMap<String>,
    pub roles: PlayerMap<PlayerRole>,

    /// Decisions requested from a policy before the controller picks a
    /// fallback action itself.
    pub max_policy_attempts: usize,

    /// Leave the post-action turn transition pending until
    /// `complete_pending_transition` is called.
    pub deferred_turn_advance: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            win_tower_height: 50,
            win_resource_amount: 100,
            hand_size: 6,
            starting_tower: 20,
            starting_wall: 10,
            starting_resources: ResourceMap::uniform(5),
            starting_production: ResourceMap::uniform(2),
            copies_per_card: 1,
            player_names: PlayerMap::from_pair("Player 1".to_string(), "Player 2".to_string()),
            roles: PlayerMap::from_pair(PlayerRole::Human, PlayerRole::Automated),
            max_policy_attempts: 8,
            deferred_turn_advance: false,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn with_win_tower_height(mut self, height: i32) -> Self {
        self.win_tower_height = height;
        self
    }

    pub fn with_win_resource_amount(mut self, amount: i32) -> Self {
        self.win_resource_amount = amount;
        self
    }

    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    pub fn with_starting_tower(mut self, tower: i32) -> Self {
        self.starting_tower = tower;
        self
    }

    pub fn with_starting_wall(mut self, wall: i32) -> Self {
        self.starting_wall = wall;
        self
    }

    pub fn with_starting_resources(mut self, resources: ResourceMap<i32>) -> Self {
        self.starting_resources = resources;
        self
    }

    pub fn with_starting_production(mut self, production: ResourceMap<i32>) -> Self {
        self.starting_production = production;
        self
    }

    pub fn with_copies_per_card(mut self, copies: usize) -> Self {
        self.copies_per_card = copies;
        self
    }

    pub fn with_player_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.player_names = PlayerMap::from_pair(first.into(), second.into());
        self
    }

    pub fn with_roles(mut self, first: PlayerRole, second: PlayerRole) -> Self {
        self.roles = PlayerMap::from_pair(first, second);
        self
    }

    pub fn with_max_policy_attempts(mut self, attempts: usize) -> Self {
        self.max_policy_attempts = attempts;
        self
    }

    pub fn with_deferred_turn_advance(mut self, deferred: bool) -> Self {
        self.deferred_turn_advance = deferred;
        self
    }

    /// Check the constants that do not depend on the catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("win_tower_height", self.win_tower_height),
            ("win_resource_amount", self.win_resource_amount),
            ("starting_tower", self.starting_tower),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if self.starting_wall < 0 {
            return Err(ConfigError::NotPositive {
                field: "starting_wall",
                value: self.starting_wall,
            });
        }
        for (kind, &amount) in self.starting_resources.iter() {
            if amount < 0 {
                return Err(ConfigError::NotPositive {
                    field: resource_field(kind),
                    value: amount,
                });
            }
        }
        if let Some((kind, _)) = self.starting_production.iter().find(|(_, rate)| **rate < 1) {
            return Err(ConfigError::ProductionBelowFloor(kind));
        }
        if self.hand_size == 0 {
            return Err(ConfigError::EmptyHand);
        }
        if self.copies_per_card == 0 {
            return Err(ConfigError::NoCopies);
        }
        if self.max_policy_attempts == 0 {
            return Err(ConfigError::NoPolicyAttempts);
        }
        Ok(())
    }

    /// Check that a pool of `pool_size` cards can deal both opening hands.
    pub fn validate_pool(&self, pool_size: usize) -> Result<(), ConfigError> {
        let required = self.hand_size * 2;
        if pool_size < required {
            return Err(ConfigError::DeckTooSmall {
                required,
                available: pool_size,
            });
        }
        Ok(())
    }
}

fn resource_field(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Bricks => "starting_resources.bricks",
        ResourceKind::Gems => "starting_resources.gems",
        ResourceKind::Recruits => "starting_resources.recruits",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.win_tower_height, 50);
        assert_eq!(config.win_resource_amount, 100);
        assert_eq!(config.hand_size, 6);
    }

    #[test]
    fn test_builder() {
        let config = MatchConfig::new()
            .with_win_tower_height(30)
            .with_hand_size(4)
            .with_roles(PlayerRole::Automated, PlayerRole::Automated)
            .with_deferred_turn_advance(true);

        assert_eq!(config.win_tower_height, 30);
        assert_eq!(config.hand_size, 4);
        assert_eq!(config.roles, PlayerMap::with_value(PlayerRole::Automated));
        assert!(config.deferred_turn_advance);
    }

    #[test]
    fn test_rejects_zero_production() {
        let config = MatchConfig::new().with_starting_production(ResourceMap::new(2, 0, 2));
        assert_eq!(
            config.validate(),
            Err(ConfigError::ProductionBelowFloor(ResourceKind::Gems))
        );
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let config = MatchConfig::new().with_win_tower_height(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "win_tower_height", .. })
        ));
    }

    #[test]
    fn test_rejects_empty_hand() {
        let config = MatchConfig::new().with_hand_size(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyHand));
    }

    #[test]
    fn test_validate_pool() {
        let config = MatchConfig::new().with_hand_size(6);
        assert!(config.validate_pool(12).is_ok());
        assert_eq!(
            config.validate_pool(11),
            Err(ConfigError::DeckTooSmall {
                required: 12,
                available: 11
            })
        );
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = MatchConfig::from_json(r#"{ "win_tower_height": 75, "hand_size": 5 }"#).unwrap();
        assert_eq!(config.win_tower_height, 75);
        assert_eq!(config.hand_size, 5);
        assert_eq!(config.starting_wall, 10);

        assert!(matches!(
            MatchConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
