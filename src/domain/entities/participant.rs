use smallvec::SmallVec;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Card;

/// How a seat is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParticipantKind {
    Human,
    Scripted,
}

impl ParticipantKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantKind::Human => "human",
            ParticipantKind::Scripted => "scripted",
        }
    }

}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized participant kind {0:?}")]
pub struct ParseParticipantKindError(String);

impl std::str::FromStr for ParticipantKind {
    type Err = ParseParticipantKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(ParticipantKind::Human),
            "scripted" => Ok(ParticipantKind::Scripted),
            other => Err(ParseParticipantKindError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParticipantError {
    #[error("invalid card index {index}, hand holds {hand_len} cards")]
    InvalidCardIndex { index: usize, hand_len: usize },
}

/// Participant entity - one seat at the table.
///
/// The hand is mutated only by the engine: dealt at the start of a hand,
/// emptied between hands, and reduced one card at a time by play.
#[derive(Debug, Clone)]
pub struct Participant {
    pub name: String,
    pub kind: ParticipantKind,
    hand: SmallVec<[Card; 3]>,
}

impl Participant {
    pub fn new(name: impl Into<String>, kind: ParticipantKind) -> Self {
        Self {
            name: name.into(),
            kind,
            hand: SmallVec::new(),
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, ParticipantKind::Human)
    }

    pub fn scripted(name: impl Into<String>) -> Self {
        Self::new(name, ParticipantKind::Scripted)
    }

    /// Current hand, in deal order.
    #[inline]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Append dealt cards. Only called at deal time, on an empty hand.
    pub fn receive_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
    }

    /// Empty the hand at the start of a new hand.
    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    /// Remove and return the card at `index`. Callers validate the index
    /// (or handle the error) before committing any other state.
    pub fn play_card(&mut self, index: usize) -> Result<Card, ParticipantError> {
        if index >= self.hand.len() {
            return Err(ParticipantError::InvalidCardIndex {
                index,
                hand_len: self.hand.len(),
            });
        }
        Ok(self.hand.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Rank, Suit};

    fn sample_hand() -> Vec<Card> {
        vec![
            Card::new(Suit::Clubs, Rank::Queen),
            Card::new(Suit::Diamonds, Rank::Five),
            Card::new(Suit::Spades, Rank::Six),
        ]
    }

    #[test]
    fn test_receive_and_clear_hand() {
        let mut p = Participant::scripted("Bot");
        assert!(p.hand().is_empty());

        p.receive_cards(sample_hand());
        assert_eq!(p.hand().len(), 3);

        p.clear_hand();
        assert!(p.hand().is_empty());
    }

    #[test]
    fn test_play_card_removes_by_index() {
        let mut p = Participant::human("Ana");
        p.receive_cards(sample_hand());

        let played = p.play_card(1).unwrap();
        assert_eq!(played, Card::new(Suit::Diamonds, Rank::Five));

        // Remaining cards keep their relative order
        assert_eq!(p.hand()[0], Card::new(Suit::Clubs, Rank::Queen));
        assert_eq!(p.hand()[1], Card::new(Suit::Spades, Rank::Six));
    }

    #[test]
    fn test_play_card_out_of_bounds_fails() {
        let mut p = Participant::human("Ana");
        p.receive_cards(sample_hand());

        let err = p.play_card(3).unwrap_err();
        assert_eq!(
            err,
            ParticipantError::InvalidCardIndex {
                index: 3,
                hand_len: 3
            }
        );
        // A rejected play must leave the hand untouched
        assert_eq!(p.hand().len(), 3);
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(
            ParticipantKind::Human.as_str().parse::<ParticipantKind>(),
            Ok(ParticipantKind::Human)
        );
        assert_eq!(
            ParticipantKind::Scripted.as_str().parse::<ParticipantKind>(),
            Ok(ParticipantKind::Scripted)
        );
        assert!("observer".parse::<ParticipantKind>().is_err());
    }
}
