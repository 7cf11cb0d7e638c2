//! Shuffling and drawing without replacement.
//!
//! A [`Deck`] keeps the full catalog plus the `remaining` cards of the
//! current shuffle. Drawing takes cards from the front of `remaining`, so the
//! draw order is the shuffle order. An empty `remaining` is the depleted
//! state; calling [`Deck::shuffle`] again restores all 78 cards and discards
//! whatever was left of the previous shuffle.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::card::{Card, DrawnCard};
use crate::catalog::Catalog;
use crate::error::{TarotError, TarotResult};

/// The 78-card deck and the state of its current shuffle.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    remaining: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// Create a deck seeded from the operating system.
    ///
    /// `remaining` starts as the full catalog in base order; call
    /// [`shuffle`](Self::shuffle) before drawing a real reading.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng())
    }

    /// Create a deck whose shuffles and reversals are reproducible.
    pub fn with_seed(catalog: Catalog, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Catalog, rng: StdRng) -> Self {
        let cards = catalog.cards().to_vec();
        Self {
            remaining: cards.clone(),
            cards,
            rng,
        }
    }

    /// All catalog cards in base order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Cards left in the current shuffle, front first.
    pub fn remaining(&self) -> &[Card] {
        &self.remaining
    }

    /// Number of cards left in the current shuffle.
    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    /// Restore all 78 cards and permute them uniformly.
    ///
    /// With a seed, the deck's generator is reseeded first, so both the
    /// permutation and the reversals of later draws follow from the seed.
    pub fn shuffle(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.remaining = self.cards.clone();
        self.remaining.shuffle(&mut self.rng);
    }

    /// Restore all 78 cards and permute them with a caller-supplied generator.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.remaining = self.cards.clone();
        self.remaining.shuffle(rng);
    }

    /// Draw `count` cards from the front of the current shuffle.
    ///
    /// Each card gets an independent 50/50 reversal and a `position` equal to
    /// its index within this draw.
    pub fn draw(&mut self, count: usize) -> TarotResult<Vec<DrawnCard>> {
        if count > self.remaining.len() {
            return Err(TarotError::InsufficientCards {
                requested: count,
                available: self.remaining.len(),
            });
        }

        let drawn: Vec<Card> = self.remaining.drain(..count).collect();
        Ok(drawn
            .into_iter()
            .enumerate()
            .map(|(position, card)| {
                let reversed = self.rng.random_bool(0.5);
                DrawnCard::new(card, reversed, position)
            })
            .collect())
    }

    /// Restore all cards in base order without shuffling.
    ///
    /// Produces a predictable deck; meant for tests and debugging only.
    pub fn reset(&mut self) {
        self.remaining = self.cards.clone();
    }
}
