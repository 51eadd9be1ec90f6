//! Random bot strategy
//!
//! Baseline opponent: any card, coin-flip raise responses. Useful as a
//! sparring partner and as a floor when comparing strategies.

use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{BotStrategy, TurnView};
use crate::domain::value_objects::Card;

/// Uniformly random strategy.
///
/// Owns its RNG so a seeded match stays reproducible; decisions are taken
/// through `&self`, hence the mutex.
pub struct RandomBot {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomBot {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl BotStrategy for RandomBot {
    fn decide_move(&self, _view: &TurnView<'_>, hand: &[Card]) -> usize {
        if hand.is_empty() {
            return 0;
        }
        self.rng.lock().unwrap().gen_range(0..hand.len())
    }

    fn should_accept_truco(&self, _view: &TurnView<'_>, _hand: &[Card]) -> bool {
        self.rng.lock().unwrap().gen_bool(0.5)
    }
}
