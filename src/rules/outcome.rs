//! Win conditions.
//!
//! Checked after every committed play or discard, in a fixed priority:
//! tower height, then resource accumulation, then tower destruction. Within
//! each rule the first player is checked before the second, except for
//! destruction, where a destroyed second tower is checked first.

use serde::{Deserialize, Serialize};

use crate::core::{MatchConfig, PlayerId, PlayerMap, PlayerState};

/// Which win condition decided the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    TowerHeight,
    ResourceAccumulation,
    TowerDestroyed,
}

/// Result of a finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: PlayerId,
    pub reason: WinReason,
    /// Human-readable announcement.
    pub message: String,
}

impl MatchOutcome {
    pub fn new(winner: PlayerId, reason: WinReason, winner_name: &str) -> Self {
        let message = match reason {
            WinReason::TowerHeight => format!("{winner_name} wins by building a tall tower!"),
            WinReason::ResourceAccumulation => {
                format!("{winner_name} wins by resource accumulation!")
            }
            WinReason::TowerDestroyed => {
                format!("{winner_name} wins by destroying opponent's tower!")
            }
        };
        Self {
            winner,
            reason,
            message,
        }
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Evaluate the win conditions. Returns `None` while the match continues.
pub fn check_win(players: &PlayerMap<PlayerState>, config: &MatchConfig) -> Option<MatchOutcome> {
    let decided = |winner: PlayerId, reason| {
        Some(MatchOutcome::new(winner, reason, &players[winner].name))
    };

    for player in PlayerId::both() {
        if players[player].tower >= config.win_tower_height {
            return decided(player, WinReason::TowerHeight);
        }
    }

    for player in PlayerId::both() {
        if players[player].max_resource() >= config.win_resource_amount {
            return decided(player, WinReason::ResourceAccumulation);
        }
    }

    for fallen in [PlayerId::SECOND, PlayerId::FIRST] {
        if players[fallen].tower <= 0 {
            return decided(fallen.opponent(), WinReason::TowerDestroyed);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResourceKind;

    fn players() -> PlayerMap<PlayerState> {
        let config = MatchConfig::default();
        PlayerMap::new(|p| PlayerState::from_config(&config, p))
    }

    #[test]
    fn test_no_winner_at_start() {
        assert!(check_win(&players(), &MatchConfig::default()).is_none());
    }

    #[test]
    fn test_tower_height() {
        let mut players = players();
        players[PlayerId::SECOND].tower = 50;

        let outcome = check_win(&players, &MatchConfig::default()).unwrap();
        assert_eq!(outcome.winner, PlayerId::SECOND);
        assert_eq!(outcome.reason, WinReason::TowerHeight);
        assert_eq!(outcome.message, "Player 2 wins by building a tall tower!");
    }

    #[test]
    fn test_resource_accumulation() {
        let mut players = players();
        players[PlayerId::FIRST].resources[ResourceKind::Recruits] = 100;

        let outcome = check_win(&players, &MatchConfig::default()).unwrap();
        assert_eq!(outcome.winner, PlayerId::FIRST);
        assert_eq!(outcome.reason, WinReason::ResourceAccumulation);
        assert_eq!(outcome.message, "Player 1 wins by resource accumulation!");
    }

    #[test]
    fn test_destroyed_tower_awards_opponent() {
        let mut players = players();
        players[PlayerId::FIRST].tower = 0;

        let outcome = check_win(&players, &MatchConfig::default()).unwrap();
        assert_eq!(outcome.winner, PlayerId::SECOND);
        assert_eq!(outcome.reason, WinReason::TowerDestroyed);
        assert_eq!(outcome.message, "Player 2 wins by destroying opponent's tower!");
    }

    #[test]
    fn test_tower_height_beats_destruction() {
        let mut players = players();
        players[PlayerId::FIRST].tower = 0;
        players[PlayerId::SECOND].tower = 0;
        players[PlayerId::FIRST].tower = 60;

        let outcome = check_win(&players, &MatchConfig::default()).unwrap();
        assert_eq!(outcome.reason, WinReason::TowerHeight);
        assert_eq!(outcome.winner, PlayerId::FIRST);
    }

    #[test]
    fn test_both_towers_destroyed_first_player_wins() {
        let mut players = players();
        players[PlayerId::FIRST].tower = 0;
        players[PlayerId::SECOND].tower = 0;

        let outcome = check_win(&players, &MatchConfig::default()).unwrap();
        assert_eq!(outcome.winner, PlayerId::FIRST);
    }

    #[test]
    fn test_resources_beat_destruction() {
        let mut players = players();
        players[PlayerId::SECOND].tower = 0;
        players[PlayerId::SECOND].resources[ResourceKind::Gems] = 120;

        let outcome = check_win(&players, &MatchConfig::default()).unwrap();
        assert_eq!(outcome.winner, PlayerId::SECOND);
        assert_eq!(outcome.reason, WinReason::ResourceAccumulation);
    }

    #[test]
    fn test_uses_player_names() {
        let config = MatchConfig::default().with_player_names("Ada", "Grace");
        let mut players = PlayerMap::new(|p| PlayerState::from_config(&config, p));
        players[PlayerId::SECOND].tower = 0;

        let outcome = check_win(&players, &config).unwrap();
        assert_eq!(outcome.message, "Ada wins by destroying opponent's tower!");
    }
}
