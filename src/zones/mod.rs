//! Card locations outside the hands.
//!
//! Arcomag has a single shared zone: the `DeckPool` both players draw from
//! and return played or discarded cards to.

pub mod pool;

pub use pool::DeckPool;
