//! Decision policies for automated seats.
//!
//! When an automated player is to act, the controller hands its policy a
//! `PolicyView` and applies the returned `Decision`. Rejected decisions are
//! reported back through `on_rejected` and listed in the next view, so a
//! policy that tries an undiscardable card gets to choose again.

mod builtin;

pub use builtin::{HeuristicPolicy, RandomPolicy};

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardDefinition, CardId};
use crate::core::{GameRng, MatchState, PlayerId, PlayerState};
use crate::error::ActionRejected;

/// What an automated player wants to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Play(CardId),
    Discard(CardId),
    /// Do nothing. Always rejected with `MustAct`; a seat with no legal
    /// action stalls the match instead.
    Pass,
}

/// Read-only view given to a policy on its turn.
pub struct PolicyView<'a> {
    /// Seat being decided for.
    pub player: PlayerId,
    /// Hand cards the player can currently afford, in hand order.
    pub playable: &'a [CardId],
    pub state: &'a MatchState,
    pub catalog: &'a CardCatalog,
    /// Decisions already rejected for this action.
    pub rejected: &'a [Decision],
}

impl<'a> PolicyView<'a> {
    #[must_use]
    pub fn me(&self) -> &'a PlayerState {
        self.state.player(self.player)
    }

    #[must_use]
    pub fn opponent(&self) -> &'a PlayerState {
        self.state.player(self.player.opponent())
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&'a CardDefinition> {
        self.catalog.get(id)
    }

    #[must_use]
    pub fn was_rejected(&self, decision: Decision) -> bool {
        self.rejected.contains(&decision)
    }

    /// Playable cards not already rejected.
    pub fn open_plays(&self) -> impl Iterator<Item = CardId> + '_ {
        self.playable
            .iter()
            .copied()
            .filter(move |&card| !self.was_rejected(Decision::Play(card)))
    }

    /// Hand cards that may be discarded and were not already rejected.
    pub fn open_discards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.me().hand.iter().copied().filter(move |&card| {
            !self.was_rejected(Decision::Discard(card))
                && self.card(card).is_some_and(|def| !def.undiscardable)
        })
    }
}

/// Chooses actions for an automated seat.
pub trait DecisionPolicy {
    /// Pick one action. Randomness must come from `rng` so matches replay.
    fn decide(&mut self, view: &PolicyView<'_>, rng: &mut GameRng) -> Decision;

    /// Called when the controller refuses a decision.
    fn on_rejected(&mut self, _decision: Decision, _reason: &ActionRejected) {}

    /// Name for logs.
    fn name(&self) -> &str {
        "policy"
    }
}
