//! Match rules: the turn state machine, win conditions and observer hooks.
//!
//! - `MatchController`: Validates and commits plays and discards, sequences
//!   turns, drives automated seats
//! - `check_win`: Fixed-priority win evaluation
//! - `MatchObserver`: Notifications for a presentation layer

pub mod controller;
pub mod observer;
pub mod outcome;

pub use controller::MatchController;
pub use observer::{MatchObserver, NullObserver, RecordingObserver};
pub use outcome::{check_win, MatchOutcome, WinReason};
