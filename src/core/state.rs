//! Match state: per-player stats and the turn bookkeeping around them.
//!
//! ## PlayerState
//!
//! Tower, wall, stockpiles, production rates, hand and the force-discard
//! flag. Every mutator keeps the stat invariants:
//! - tower, wall and stockpiles never drop below 0
//! - production rates never drop below 1
//!
//! ## MatchState
//!
//! Both players, the current seat, the outcome once the match is decided,
//! and the action-in-progress guard. Hands use `im` persistent vectors so a
//! snapshot is an O(1) clone.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::MatchConfig;
use super::player::{PlayerId, PlayerMap, PlayerRole};
use super::resources::{ResourceKind, ResourceMap};
use crate::cards::{CardId, Cost};
use crate::rules::MatchOutcome;

/// Lowest production rate a player can have.
pub const MIN_PRODUCTION: i32 = 1;

/// One player's stats and hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub role: PlayerRole,
    pub tower: i32,
    pub wall: i32,
    pub resources: ResourceMap<i32>,
    pub production: ResourceMap<i32>,
    pub hand: Vector<CardId>,
    /// The next played card is spent without paying its cost or resolving it.
    pub force_discard_next: bool,
}

impl PlayerState {
    /// Create a player with the configured starting values and an empty hand.
    pub fn from_config(config: &MatchConfig, player: PlayerId) -> Self {
        Self {
            name: config.player_names[player].clone(),
            role: config.roles[player],
            tower: config.starting_tower,
            wall: config.starting_wall,
            resources: config.starting_resources,
            production: config.starting_production,
            hand: Vector::new(),
            force_discard_next: false,
        }
    }

    // === Defences ===

    pub fn damage_wall(&mut self, amount: i32) {
        self.wall = self.wall.saturating_sub(amount).max(0);
    }

    pub fn damage_tower(&mut self, amount: i32) {
        self.tower = self.tower.saturating_sub(amount).max(0);
    }

    /// Wall absorbs up to its height, the remainder hits the tower.
    pub fn damage_both(&mut self, amount: i32) {
        let absorbed = self.wall.min(amount.max(0));
        self.wall -= absorbed;
        let remainder = amount.saturating_sub(absorbed);
        if remainder > 0 {
            self.damage_tower(remainder);
        }
    }

    pub fn build_wall(&mut self, amount: i32) {
        self.wall = self.wall.saturating_add(amount).max(0);
    }

    pub fn build_tower(&mut self, amount: i32) {
        self.tower = self.tower.saturating_add(amount).max(0);
    }

    // === Resources ===

    pub fn modify_resource(&mut self, kind: ResourceKind, delta: i32) {
        self.resources[kind] = self.resources[kind].saturating_add(delta).max(0);
    }

    pub fn modify_production(&mut self, kind: ResourceKind, delta: i32) {
        self.set_production(kind, self.production[kind].saturating_add(delta));
    }

    pub fn set_production(&mut self, kind: ResourceKind, rate: i32) {
        self.production[kind] = rate.max(MIN_PRODUCTION);
    }

    /// Add every production rate to its stockpile.
    pub fn produce(&mut self) {
        for kind in ResourceKind::ALL {
            self.resources[kind] = self.resources[kind].saturating_add(self.production[kind]);
        }
    }

    #[must_use]
    pub fn can_afford(&self, cost: &Cost) -> bool {
        self.resources[cost.kind] >= cost.amount
    }

    /// Deduct a cost that `can_afford` already accepted.
    pub fn pay(&mut self, cost: &Cost) {
        self.modify_resource(cost.kind, -cost.amount);
    }

    /// Highest stockpile across all kinds.
    #[must_use]
    pub fn max_resource(&self) -> i32 {
        self.resources.iter().map(|(_, v)| *v).max().unwrap_or(0)
    }

    // === Hand ===

    #[must_use]
    pub fn holds(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Remove one copy of `card` from the hand.
    ///
    /// Returns true if the card was found and removed.
    pub fn remove_from_hand(&mut self, card: CardId) -> bool {
        match self.hand.index_of(&card) {
            Some(pos) => {
                self.hand.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// How play continues once an action has been committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAdvance {
    /// Same player acts again, without production or refill.
    ExtraAction,
    /// Turn passes to the opponent, who produces and refills.
    NextPlayer,
}

/// Where the match is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// The current player may play or discard.
    AwaitingAction,
    /// An action is being applied or its turn transition is pending.
    Resolving,
    /// Terminal.
    GameOver,
}

/// Complete match state, readable by observers and policies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub players: PlayerMap<PlayerState>,

    /// Seat that may act.
    pub current: PlayerId,

    /// Turn number (starts at 1, increments when the seat changes).
    pub turn_number: u32,

    /// Set once when the match is decided.
    pub outcome: Option<MatchOutcome>,

    /// Set while an action is being resolved or its transition is pending.
    pub processing_action: bool,

    /// Turn transition waiting for `complete_pending_transition`.
    pub pending: Option<TurnAdvance>,
}

impl MatchState {
    /// Create the state for a fresh match with empty hands.
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            players: PlayerMap::new(|p| PlayerState::from_config(config, p)),
            current: PlayerId::FIRST,
            turn_number: 1,
            outcome: None,
            processing_action: false,
            pending: None,
        }
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    #[must_use]
    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.current]
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        if self.is_over() {
            MatchPhase::GameOver
        } else if self.processing_action {
            MatchPhase::Resolving
        } else {
            MatchPhase::AwaitingAction
        }
    }

    /// Cards currently held across both hands.
    #[must_use]
    pub fn cards_in_hands(&self) -> usize {
        self.players.iter().map(|(_, p)| p.hand.len()).sum()
    }
}
