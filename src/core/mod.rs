//! Core engine types: players, resources, state, RNG, configuration.

pub mod player;
pub mod resources;
pub mod rng;
pub mod config;
pub mod state;

pub use player::{PlayerId, PlayerMap, PlayerRole};
pub use resources::{ResourceKind, ResourceMap};
pub use rng::GameRng;
pub use config::MatchConfig;
pub use state::{MatchPhase, MatchState, PlayerState, TurnAdvance, MIN_PRODUCTION};
