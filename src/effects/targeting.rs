//! Effect targeting.
//!
//! A targeted effect names its recipients relative to the acting player.
//! `Target::resolve` turns that selector into concrete seats.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::core::PlayerId;

/// Which player(s) a targeted effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// The acting player.
    #[serde(rename = "Self")]
    SelfPlayer,
    /// The acting player's opponent.
    Opponent,
    /// Both players, each resolved independently.
    Both,
}

/// Seats selected by a `Target`, in resolution order.
pub type Recipients = SmallVec<[PlayerId; 2]>;

impl Target {
    /// Resolve the selector for a given actor.
    ///
    /// `Both` yields the actor first, then the opponent.
    ///
    /// ```
    /// use rust_arcomag::core::PlayerId;
    /// use rust_arcomag::effects::Target;
    ///
    /// let actor = PlayerId::SECOND;
    /// assert_eq!(Target::Opponent.resolve(actor).as_slice(), &[PlayerId::FIRST]);
    /// assert_eq!(Target::Both.resolve(actor).as_slice(), &[PlayerId::SECOND, PlayerId::FIRST]);
    /// ```
    pub fn resolve(self, actor: PlayerId) -> Recipients {
        match self {
            Target::SelfPlayer => smallvec![actor],
            Target::Opponent => smallvec![actor.opponent()],
            Target::Both => smallvec![actor, actor.opponent()],
        }
    }
}
