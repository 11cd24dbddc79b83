//! Effect conditions.
//!
//! A condition is evaluated against three players: the actor, the actor's
//! opponent, and the player the effect is currently being applied to.
//! "Self" always means the actor, never the target.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap, PlayerState, ResourceKind};

/// A predicate over the two players' stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Target's wall is strictly below the threshold.
    TargetWallBelow(i32),
    /// Actor's production of the kind is strictly greater than the opponent's.
    SelfProductionGreaterThanOpponent(ResourceKind),
    /// Actor's production of the kind is strictly less than the opponent's.
    SelfProductionLessThanOpponent(ResourceKind),
    /// Actor's tower is strictly lower than the opponent's tower.
    SelfTowerLowerThanOpponent,
    /// Actor's tower is strictly taller than the opponent's wall.
    SelfTowerGreaterThanOpponentWall,
    /// Actor's wall is strictly taller than the opponent's wall.
    SelfWallGreaterThanOpponent,
}

impl Condition {
    /// Stable name for logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Condition::TargetWallBelow(_) => "TargetWallBelow",
            Condition::SelfProductionGreaterThanOpponent(_) => "SelfProductionGreaterThanOpponent",
            Condition::SelfProductionLessThanOpponent(_) => "SelfProductionLessThanOpponent",
            Condition::SelfTowerLowerThanOpponent => "SelfTowerLowerThanOpponent",
            Condition::SelfTowerGreaterThanOpponentWall => "SelfTowerGreaterThanOpponentWall",
            Condition::SelfWallGreaterThanOpponent => "SelfWallGreaterThanOpponent",
        }
    }

    /// Evaluate the condition.
    pub fn evaluate(self, ctx: &ConditionContext<'_>) -> bool {
        let actor = ctx.actor();
        let opponent = ctx.opponent();
        match self {
            Condition::TargetWallBelow(threshold) => ctx.target().wall < threshold,
            Condition::SelfProductionGreaterThanOpponent(kind) => {
                actor.production[kind] > opponent.production[kind]
            }
            Condition::SelfProductionLessThanOpponent(kind) => {
                actor.production[kind] < opponent.production[kind]
            }
            Condition::SelfTowerLowerThanOpponent => actor.tower < opponent.tower,
            Condition::SelfTowerGreaterThanOpponentWall => actor.tower > opponent.wall,
            Condition::SelfWallGreaterThanOpponent => actor.wall > opponent.wall,
        }
    }
}

/// Players a condition is evaluated against.
pub struct ConditionContext<'a> {
    players: &'a PlayerMap<PlayerState>,
    actor: PlayerId,
    target: PlayerId,
}

impl<'a> ConditionContext<'a> {
    pub fn new(players: &'a PlayerMap<PlayerState>, actor: PlayerId, target: PlayerId) -> Self {
        Self {
            players,
            actor,
            target,
        }
    }

    pub fn actor(&self) -> &PlayerState {
        &self.players[self.actor]
    }

    pub fn opponent(&self) -> &PlayerState {
        &self.players[self.actor.opponent()]
    }

    pub fn target(&self) -> &PlayerState {
        &self.players[self.target]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchConfig;

    fn players() -> PlayerMap<PlayerState> {
        let config = MatchConfig::default();
        PlayerMap::new(|p| PlayerState::from_config(&config, p))
    }

    #[test]
    fn test_target_wall_below_uses_target() {
        let mut players = players();
        players[PlayerId::FIRST].wall = 20;
        players[PlayerId::SECOND].wall = 5;

        let at_opponent = ConditionContext::new(&players, PlayerId::FIRST, PlayerId::SECOND);
        let at_self = ConditionContext::new(&players, PlayerId::FIRST, PlayerId::FIRST);

        assert!(Condition::TargetWallBelow(10).evaluate(&at_opponent));
        assert!(!Condition::TargetWallBelow(10).evaluate(&at_self));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut players = players();
        players[PlayerId::SECOND].wall = 10;

        let ctx = ConditionContext::new(&players, PlayerId::FIRST, PlayerId::SECOND);
        assert!(!Condition::TargetWallBelow(10).evaluate(&ctx));
    }

    #[test]
    fn test_production_comparisons() {
        let mut players = players();
        players[PlayerId::FIRST].production[ResourceKind::Gems] = 4;
        players[PlayerId::SECOND].production[ResourceKind::Gems] = 2;

        let ctx = ConditionContext::new(&players, PlayerId::FIRST, PlayerId::SECOND);
        assert!(Condition::SelfProductionGreaterThanOpponent(ResourceKind::Gems).evaluate(&ctx));
        assert!(!Condition::SelfProductionLessThanOpponent(ResourceKind::Gems).evaluate(&ctx));
        // Equal bricks production: neither strict comparison holds
        assert!(!Condition::SelfProductionGreaterThanOpponent(ResourceKind::Bricks).evaluate(&ctx));
        assert!(!Condition::SelfProductionLessThanOpponent(ResourceKind::Bricks).evaluate(&ctx));
    }

    #[test]
    fn test_self_means_actor_even_when_targeting_opponent() {
        let mut players = players();
        players[PlayerId::SECOND].tower = 30;

        let ctx = ConditionContext::new(&players, PlayerId::FIRST, PlayerId::SECOND);
        assert!(Condition::SelfTowerLowerThanOpponent.evaluate(&ctx));

        let flipped = ConditionContext::new(&players, PlayerId::SECOND, PlayerId::SECOND);
        assert!(!Condition::SelfTowerLowerThanOpponent.evaluate(&flipped));
    }

    #[test]
    fn test_tower_against_wall_and_wall_against_wall() {
        let mut players = players();
        players[PlayerId::FIRST].tower = 12;
        players[PlayerId::FIRST].wall = 8;
        players[PlayerId::SECOND].wall = 11;

        let ctx = ConditionContext::new(&players, PlayerId::FIRST, PlayerId::SECOND);
        assert!(Condition::SelfTowerGreaterThanOpponentWall.evaluate(&ctx));
        assert!(!Condition::SelfWallGreaterThanOpponent.evaluate(&ctx));
    }
}
