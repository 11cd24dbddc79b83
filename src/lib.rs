//! # rust-arcomag
//!
//! Rules engine for a two-player tower-and-wall card game.
//!
//! Each player has a tower, a wall, three resource stockpiles (bricks, gems,
//! recruits) and three production rates. Players spend resources to play
//! cards from a hand dealt from one shared deck pool. A match ends when a
//! tower reaches the height threshold, a stockpile reaches the resource
//! threshold, or a tower is destroyed.
//!
//! ## Design Principles
//!
//! 1. **Typed effects**: Each effect kind carries exactly the fields it
//!    reads. Malformed authored data is rejected when the catalog loads,
//!    never during a match.
//!
//! 2. **Atomic actions**: A rejected play or discard changes nothing. An
//!    accepted one is fully applied before the next is accepted.
//!
//! 3. **Deterministic**: All randomness flows from one seed through
//!    independent `GameRng` streams, so matches replay exactly.
//!
//! ## Modules
//!
//! - `core`: Players, resources, match state, RNG, configuration
//! - `cards`: Card definitions, the catalog arena, the standard set
//! - `effects`: Effect variants, targeting, conditions, resolution
//! - `zones`: The shared deck pool
//! - `rules`: Match controller, win conditions, observer hooks
//! - `policy`: Decision policies for automated seats
//! - `sim`: Policy-versus-policy match runner

pub mod core;
pub mod cards;
pub mod effects;
pub mod zones;
pub mod rules;
pub mod policy;
pub mod sim;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    GameRng, MatchConfig, MatchPhase, MatchState, PlayerId, PlayerMap, PlayerRole, PlayerState,
    ResourceKind, ResourceMap,
};

pub use crate::cards::{standard_catalog, CardCatalog, CardDefinition, CardId, Cost};

pub use crate::effects::{CardEffect, Condition, EffectKind, EffectValue, Target};

pub use crate::zones::DeckPool;

pub use crate::rules::{MatchController, MatchObserver, MatchOutcome, WinReason};

pub use crate::policy::{Decision, DecisionPolicy, HeuristicPolicy, PolicyView, RandomPolicy};

pub use crate::sim::{MatchReport, MatchRunner};

pub use crate::error::{ActionRejected, CatalogError, ConfigError, PoolError};
