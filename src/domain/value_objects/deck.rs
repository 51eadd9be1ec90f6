//! Deck - the 40-card Truco set
//!
//! 4 suits x 10 ranks, no duplicates. Dealing consumes from the front in
//! order; the single Vira flip comes off the back.

use rand::seq::SliceRandom;
use rand::Rng;

use super::card::{Card, RANK_ORDER, SUITS};

/// Cards in a full deck.
pub const DECK_SIZE: usize = 40;

/// Deal failures. Structurally unreachable under the fixed
/// 3-cards-per-seat plus one Vira pattern, but always checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeckError {
    #[error("not enough cards in deck: requested {requested}, remaining {remaining}")]
    Exhausted { requested: usize, remaining: usize },
    #[error("deck is empty")]
    Empty,
}

/// The 40-card Truco deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A freshly built, unshuffled deck.
    pub fn new() -> Self {
        let mut deck = Self {
            cards: Vec::with_capacity(DECK_SIZE),
        };
        deck.initialize();
        deck
    }

    /// Rebuild the full 40-card set, discarding any prior state.
    pub fn initialize(&mut self) {
        self.cards.clear();
        for &suit in &SUITS {
            for &rank in &RANK_ORDER {
                self.cards.push(Card::new(suit, rank));
            }
        }
    }

    /// Uniform permutation driven by the caller's RNG.
    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
    }

    /// Remove and return `count` cards from the front.
    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.cards.len() {
            return Err(DeckError::Exhausted {
                requested: count,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..count).collect())
    }

    /// Remove and return one card from the back (the Vira flip).
    pub fn deal_one(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }

    /// Cards left undealt.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_initialize_builds_forty_distinct_cards() {
        let deck = Deck::new();
        assert_eq!(deck.remaining(), DECK_SIZE);

        let mut deck = deck;
        let cards = deck.deal(DECK_SIZE).unwrap();
        let distinct: HashSet<Card> = cards.iter().copied().collect();
        assert_eq!(distinct.len(), DECK_SIZE);
    }

    #[test]
    fn test_initialize_restores_a_dealt_deck() {
        let mut deck = Deck::new();
        deck.deal(10).unwrap();
        assert_eq!(deck.remaining(), 30);

        deck.initialize();
        assert_eq!(deck.remaining(), DECK_SIZE);
    }

    #[test]
    fn test_shuffle_preserves_the_card_multiset() {
        let mut deck = Deck::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        deck.shuffle(&mut rng);
        assert_eq!(deck.remaining(), DECK_SIZE);

        let shuffled: HashSet<Card> = deck.deal(DECK_SIZE).unwrap().into_iter().collect();
        let fresh: HashSet<Card> = {
            let mut d = Deck::new();
            d.deal(DECK_SIZE).unwrap().into_iter().collect()
        };
        assert_eq!(shuffled, fresh);
    }

    #[test]
    fn test_deal_removes_from_the_front() {
        let mut deck = Deck::new();
        let first_three = deck.deal(3).unwrap();
        assert_eq!(first_three.len(), 3);
        assert_eq!(deck.remaining(), 37);

        // Unshuffled order starts with the Diamonds run in canonical order
        assert_eq!(first_three[0], Card::new(SUITS[0], RANK_ORDER[0]));
        assert_eq!(first_three[1], Card::new(SUITS[0], RANK_ORDER[1]));
        assert_eq!(first_three[2], Card::new(SUITS[0], RANK_ORDER[2]));
    }

    #[test]
    fn test_two_player_deal_pattern_leaves_thirty_three() {
        let mut deck = Deck::new();
        deck.deal(3).unwrap();
        deck.deal(3).unwrap();
        deck.deal_one().unwrap();
        assert_eq!(deck.remaining(), 33);
    }

    #[test]
    fn test_deal_more_than_remaining_errors() {
        let mut deck = Deck::new();
        let err = deck.deal(DECK_SIZE + 1).unwrap_err();
        assert_eq!(
            err,
            DeckError::Exhausted {
                requested: 41,
                remaining: 40
            }
        );
        // A failed deal must not consume cards
        assert_eq!(deck.remaining(), DECK_SIZE);
    }

    #[test]
    fn test_deal_one_from_empty_deck_errors() {
        let mut deck = Deck::new();
        deck.deal(DECK_SIZE).unwrap();
        assert_eq!(deck.deal_one().unwrap_err(), DeckError::Empty);
    }
}
