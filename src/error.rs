//! Error types for the match engine.
//!
//! Rejected actions are ordinary illegal-move attempts: they come back as
//! `Err(ActionRejected)` and leave the match untouched. Catalog and
//! configuration errors surface when data is loaded, never mid-match.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{PlayerId, ResourceKind};

/// Why a play or discard was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionRejected {
    #[error("the match is over")]
    MatchOver,

    #[error("another action is still being processed")]
    ActionInProgress,

    #[error("{0} is not the current player")]
    NotCurrentPlayer(PlayerId),

    #[error("{card} is not in {player}'s hand")]
    NotInHand { player: PlayerId, card: CardId },

    #[error("cannot afford {card}: needs {needed} {kind}, has {available}")]
    CannotAfford {
        card: CardId,
        kind: ResourceKind,
        needed: i32,
        available: i32,
    },

    #[error("{0} cannot be discarded")]
    Undiscardable(CardId),

    #[error("{0} must play or discard while holding cards")]
    MustAct(PlayerId),
}

/// Deck pool failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("the deck pool is empty")]
    Empty,

    #[error("no copy of {0} is available")]
    Missing(CardId),
}

/// Card data that cannot be turned into a valid catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("malformed card data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("card '{card}': {kind} effect is missing '{field}'")]
    MissingField {
        card: String,
        kind: &'static str,
        field: &'static str,
    },

    #[error("card '{card}': {kind} effect cannot use condition {condition}")]
    InvalidCondition {
        card: String,
        kind: &'static str,
        condition: &'static str,
    },

    #[error("card '{card}': cost must not be negative (got {cost})")]
    NegativeCost { card: String, cost: i32 },

    #[error("card '{card}': {kind} {field} {value} is out of range")]
    ValueOutOfRange {
        card: String,
        kind: &'static str,
        field: &'static str,
        value: i32,
    },

    #[error("catalog is full: no card id for index {0}")]
    TooManyCards(usize),

    #[error("duplicate card name '{0}'")]
    DuplicateName(String),

    #[error("unknown {0}")]
    UnknownCard(CardId),

    #[error("catalog has no cards")]
    Empty,
}

/// Invalid match configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: i32 },

    #[error("hand size must be at least 1")]
    EmptyHand,

    #[error("starting production for {0} must be at least 1")]
    ProductionBelowFloor(ResourceKind),

    #[error("deck pool holds {available} cards but two opening hands need {required}")]
    DeckTooSmall { required: usize, available: usize },

    #[error("copies_per_card must be at least 1")]
    NoCopies,

    #[error("max_policy_attempts must be at least 1")]
    NoPolicyAttempts,

    #[error("malformed configuration: {0}")]
    Parse(String),
}
