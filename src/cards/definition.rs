//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its cost, its
//! ordered effect list and its game-flow flags. Definitions live in a
//! `CardCatalog` and are referred to everywhere else by `CardId`, so any
//! number of hands and the deck pool can hold the same card at once.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ResourceKind;
use crate::effects::{CardEffect, EffectKind};

/// Stable identifier of a definition inside its catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position of the definition in its catalog.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Resources spent to play a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cost {
    pub kind: ResourceKind,
    pub amount: i32,
}

impl Cost {
    #[must_use]
    pub const fn new(kind: ResourceKind, amount: i32) -> Self {
        Self { kind, amount }
    }
}

/// Per-card effect list. Most cards carry one to three effects.
pub type EffectList = SmallVec<[CardEffect; 4]>;

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rust_arcomag::cards::{CardDefinition, Cost};
/// use rust_arcomag::core::ResourceKind;
/// use rust_arcomag::effects::{CardEffect, Target};
///
/// let card = CardDefinition::new("Lucky Cache", Cost::new(ResourceKind::Bricks, 0))
///     .with_effect(CardEffect::draw(Target::SelfPlayer))
///     .with_extra_turn();
///
/// assert!(card.extra_turn);
/// assert!(card.has_effect(rust_arcomag::effects::EffectKind::DrawCard));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    pub description: String,
    pub cost: Cost,

    /// Applied in order when the card is played.
    pub effects: EffectList,

    /// The same player acts again after this card resolves.
    pub extra_turn: bool,

    /// Authoring hint that the card is meant to be discarded rather than
    /// played. Policies honour it; the controller does not enforce it.
    pub discard_instead_of_play: bool,

    /// The card can be played but never discarded.
    pub undiscardable: bool,
}

impl CardDefinition {
    /// Create a card with no effects and no flags.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: Cost) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            cost,
            effects: EffectList::new(),
            extra_turn: false,
            discard_instead_of_play: false,
            undiscardable: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_extra_turn(mut self) -> Self {
        self.extra_turn = true;
        self
    }

    #[must_use]
    pub fn with_discard_instead_of_play(mut self) -> Self {
        self.discard_instead_of_play = true;
        self
    }

    #[must_use]
    pub fn with_undiscardable(mut self) -> Self {
        self.undiscardable = true;
        self
    }

    /// Does any effect on this card have the given kind?
    #[must_use]
    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind() == kind)
    }

    /// Draw plus force-discard on one card always leaves the player with a
    /// pending forced discard.
    #[must_use]
    pub fn draws_then_forces_discard(&self) -> bool {
        self.has_effect(EffectKind::DrawCard) && self.has_effect(EffectKind::ForceDiscardNextCard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Target;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.index(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_card_definition_builder() {
        let card = CardDefinition::new("Wall Up", Cost::new(ResourceKind::Bricks, 3))
            .with_description("+5 wall")
            .with_effect(CardEffect::build_wall(Target::SelfPlayer, 5))
            .with_undiscardable();

        assert_eq!(card.name, "Wall Up");
        assert_eq!(card.description, "+5 wall");
        assert_eq!(card.cost, Cost::new(ResourceKind::Bricks, 3));
        assert_eq!(card.effects.len(), 1);
        assert!(card.undiscardable);
        assert!(!card.extra_turn);
        assert!(!card.discard_instead_of_play);
    }

    #[test]
    fn test_draw_and_force_discard_pairing() {
        let plain = CardDefinition::new("Draw", Cost::new(ResourceKind::Gems, 0))
            .with_effect(CardEffect::draw(Target::SelfPlayer));
        assert!(!plain.draws_then_forces_discard());

        let paired = plain
            .clone()
            .with_effect(CardEffect::force_discard(Target::Opponent));
        assert!(paired.draws_then_forces_discard());
    }

    #[test]
    fn test_card_definition_serialization() {
        let card = CardDefinition::new("Test", Cost::new(ResourceKind::Recruits, 2))
            .with_effect(CardEffect::damage_both(Target::Opponent, 4));

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
