use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Source of cards for a round.
///
/// Cards come out without repetition until [`CardSource::reset`] puts all 52
/// back. Drawing from an empty source is an error, never a wrap-around.
pub trait CardSource {
    fn draw(&mut self) -> Result<Card, GameError>;
    fn reset(&mut self);
    fn remaining(&self) -> usize;
}

#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    /// A freshly shuffled deck; the same seed always yields the same order.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            cards: full_deck(),
            position: 0,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        deck.shuffle();
        deck
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }
}

impl CardSource for Deck {
    fn draw(&mut self) -> Result<Card, GameError> {
        self.deal_card().ok_or(GameError::DeckExhausted)
    }

    // The rng keeps advancing, so every cycle gets a new order.
    fn reset(&mut self) {
        self.shuffle();
    }

    fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

/// Deals a fixed card order, top first. `reset` starts over from the top.
///
/// Useful for replaying a recorded deal or setting up exact hands.
#[derive(Debug, Clone)]
pub struct StackedDeck {
    order: Vec<Card>,
    position: usize,
}

impl StackedDeck {
    pub fn new(order: Vec<Card>) -> Self {
        Self { order, position: 0 }
    }
}

impl CardSource for StackedDeck {
    fn draw(&mut self) -> Result<Card, GameError> {
        let card = self
            .order
            .get(self.position)
            .copied()
            .ok_or(GameError::DeckExhausted)?;
        self.position += 1;
        Ok(card)
    }

    fn reset(&mut self) {
        self.position = 0;
    }

    fn remaining(&self) -> usize {
        self.order.len().saturating_sub(self.position)
    }
}
