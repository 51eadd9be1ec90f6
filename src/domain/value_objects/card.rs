//! Card - suits, ranks and Vira-relative strength
//!
//! Strength is never intrinsic to a card: it is a pure function of the card
//! and the hand's Vira rank. The rank one step after the Vira in the
//! canonical order is the Manilha rank, and Manilhas outrank every common
//! card, tie-broken by suit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four suits. Ordering only matters among Manilhas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Suit {
    Diamonds,
    Spades,
    Hearts,
    Clubs,
}

/// All suits, in Manilha tie-break order (weakest first).
pub const SUITS: [Suit; 4] = [Suit::Diamonds, Suit::Spades, Suit::Hearts, Suit::Clubs];

impl Suit {
    /// Tie-break value among Manilhas: Diamonds weakest (1), Clubs strongest (4).
    #[inline]
    pub fn manilha_strength(&self) -> u8 {
        match self {
            Suit::Diamonds => 1,
            Suit::Spades => 2,
            Suit::Hearts => 3,
            Suit::Clubs => 4,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Diamonds => "♦",
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Clubs => "♣",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The ten Truco ranks (8, 9 and 10 are not part of the deck).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rank {
    Four,
    Five,
    Six,
    Seven,
    Queen,
    Jack,
    King,
    Ace,
    Two,
    Three,
}

/// Canonical strength order for common cards, weakest first.
pub const RANK_ORDER: [Rank; 10] = [
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Queen,
    Rank::Jack,
    Rank::King,
    Rank::Ace,
    Rank::Two,
    Rank::Three,
];

impl Rank {
    /// Position in the canonical order: 0 (weakest common) to 9 (strongest).
    #[inline]
    pub fn base_value(&self) -> u8 {
        match self {
            Rank::Four => 0,
            Rank::Five => 1,
            Rank::Six => 2,
            Rank::Seven => 3,
            Rank::Queen => 4,
            Rank::Jack => 5,
            Rank::King => 6,
            Rank::Ace => 7,
            Rank::Two => 8,
            Rank::Three => 9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Queen => "Q",
            Rank::Jack => "J",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
        }
    }

}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized rank {0:?}")]
pub struct ParseRankError(String);

impl std::str::FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "Q" => Ok(Rank::Queen),
            "J" => Ok(Rank::Jack),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            other => Err(ParseRankError(other.to_string())),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The Manilha rank for a given Vira: the next rank in circular canonical order.
#[inline]
pub fn manilha_rank(vira: Rank) -> Rank {
    RANK_ORDER[(vira.base_value() as usize + 1) % RANK_ORDER.len()]
}

/// A single Truco card. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Strength relative to the hand's Vira.
    ///
    /// Manilhas score 100 plus the suit tie-break, so any Manilha beats any
    /// common card (common maximum is 9). Common cards score their canonical
    /// position. Equal values are a genuine tie and must be detected by the
    /// caller, never broken arbitrarily.
    pub fn power(&self, vira: Rank) -> u8 {
        if self.rank == manilha_rank(vira) {
            100 + self.suit.manilha_strength()
        } else {
            self.rank.base_value()
        }
    }

    /// Whether this card is a Manilha for the given Vira.
    #[inline]
    pub fn is_manilha(&self, vira: Rank) -> bool {
        self.rank == manilha_rank(vira)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
