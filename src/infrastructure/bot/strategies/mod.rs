//! Bot strategies module
//!
//! Decision policies for scripted seats. A strategy sees only the read-only
//! turn view plus its own hand; sequencing, prompts and dice stay in the
//! engine.

mod balanced_bot;
mod random_bot;

pub use balanced_bot::*;
pub use random_bot::*;

use crate::domain::value_objects::{Card, PlayedCard, Rank};

/// Read-only view of the turn a strategy decides on.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    /// Reference rank for the current hand
    pub vira: Rank,
    /// Cards already on the table this round, in play order
    pub round_cards: &'a [PlayedCard],
    /// Rounds won per side within the current hand
    pub hand_score: [u8; 2],
}

/// Scripted seat decision policy
pub trait BotStrategy: Send + Sync {
    /// Index into `hand` of the card to play
    fn decide_move(&self, view: &TurnView<'_>, hand: &[Card]) -> usize;

    /// Whether to accept an offered Truco raise
    fn should_accept_truco(&self, view: &TurnView<'_>, hand: &[Card]) -> bool;
}
