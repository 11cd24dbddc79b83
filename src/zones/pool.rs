//! The shared deck pool.
//!
//! Both players draw from and return to the same pool. Draws take a
//! uniformly random card and returns go to a uniformly random slot, so the
//! pool's order never reveals which cards were just played.
//!
//! The pool is owned by the match controller; nothing else draws or returns
//! cards.

use im::Vector;
use tracing::trace;

use crate::cards::CardId;
use crate::core::GameRng;
use crate::error::PoolError;

/// Multiset of cards not currently held in a hand.
///
/// ## Usage
///
/// ```
/// use rust_arcomag::cards::CardId;
/// use rust_arcomag::core::GameRng;
/// use rust_arcomag::zones::DeckPool;
///
/// let mut pool = DeckPool::new(GameRng::new(7));
/// pool.initialize([CardId::new(0), CardId::new(1), CardId::new(2)]);
///
/// let card = pool.draw().unwrap();
/// assert_eq!(pool.len(), 2);
///
/// pool.return_card(card);
/// assert_eq!(pool.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct DeckPool {
    cards: Vector<CardId>,
    rng: GameRng,
}

impl DeckPool {
    /// Create an empty pool drawing randomness from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            cards: Vector::new(),
            rng,
        }
    }

    /// Replace the contents with a shuffled copy of `cards`.
    pub fn initialize(&mut self, cards: impl IntoIterator<Item = CardId>) {
        let mut deck: Vec<CardId> = cards.into_iter().collect();
        self.rng.shuffle(&mut deck);
        self.cards = deck.into_iter().collect();
        trace!(size = self.cards.len(), "deck pool initialized");
    }

    /// Remove and return a uniformly random card.
    pub fn draw(&mut self) -> Result<CardId, PoolError> {
        if self.cards.is_empty() {
            return Err(PoolError::Empty);
        }
        let index = self.rng.gen_index(self.cards.len());
        Ok(self.cards.remove(index))
    }

    /// Remove one copy of a specific card.
    pub fn take(&mut self, card: CardId) -> Result<(), PoolError> {
        let index = self.cards.index_of(&card).ok_or(PoolError::Missing(card))?;
        self.cards.remove(index);
        Ok(())
    }

    /// Put a card back at a uniformly random slot among `len + 1`.
    pub fn return_card(&mut self, card: CardId) {
        let slot = self.rng.gen_slot(self.cards.len());
        self.cards.insert(slot, card);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Pool contents in their current order.
    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }

    /// Number of copies of `card` in the pool.
    #[must_use]
    pub fn count(&self, card: CardId) -> usize {
        self.cards.iter().filter(|&&c| c == card).count()
    }
}
