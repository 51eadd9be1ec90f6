//! Observable match snapshots
//!
//! Observers never touch engine internals; they get an immutable copy
//! built on demand, masked per recipient so nobody sees opponent hands.

use serde::Serialize;
use uuid::Uuid;

use super::MatchEngine;
use crate::domain::entities::{Participant, ParticipantKind};
use crate::domain::value_objects::{Card, MatchState, PlayedCard, Rank};

/// One seat as a recipient sees it. Only the recipient's own hand is
/// populated; every other seat shows a card count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub seat: u8,
    pub name: String,
    pub kind: ParticipantKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
    pub hand_size: usize,
}

/// Pull-based state update for transport adapters and UIs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub match_id: Uuid,
    pub scores: [u16; 2],
    pub round_score: [u8; 2],
    pub vira: Option<Rank>,
    pub truco_value: u8,
    pub hand_leader: u8,
    pub active_seat: Option<u8>,
    pub table: Vec<PlayedCard>,
    pub seats: Vec<SeatView>,
}

impl MatchSnapshot {
    /// Copy the observable state, masked for `for_seat`. `None` masks
    /// every hand (spectator view).
    pub fn build(
        match_id: Uuid,
        state: &MatchState,
        participants: &[Participant],
        for_seat: Option<u8>,
    ) -> Self {
        let seats = participants
            .iter()
            .enumerate()
            .map(|(index, participant)| {
                let seat = index as u8;
                let hand = (for_seat == Some(seat)).then(|| participant.hand().to_vec());
                SeatView {
                    seat,
                    name: participant.name.clone(),
                    kind: participant.kind,
                    hand,
                    hand_size: participant.hand().len(),
                }
            })
            .collect();

        Self {
            match_id,
            scores: state.scores,
            round_score: state.round_score,
            vira: state.vira,
            truco_value: state.truco_value,
            hand_leader: state.hand_leader,
            active_seat: state.active_seat,
            table: state.table.clone(),
            seats,
        }
    }
}

impl MatchEngine {
    /// Snapshot masked for one recipient seat.
    pub fn snapshot_for(&self, for_seat: Option<u8>) -> MatchSnapshot {
        MatchSnapshot::build(self.id(), &self.state, &self.participants, for_seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Rank, Suit};

    fn seated(name: &str, scripted: bool, cards: &[Card]) -> Participant {
        let mut participant = if scripted {
            Participant::scripted(name)
        } else {
            Participant::human(name)
        };
        participant.receive_cards(cards.iter().copied());
        participant
    }

    fn sample_table() -> (MatchState, Vec<Participant>) {
        let mut state = MatchState::new();
        state.begin_hand(Rank::Four);
        state.record_play(1, Card::new(Suit::Hearts, Rank::King));
        state.active_seat = Some(0);

        let participants = vec![
            seated(
                "Ana",
                false,
                &[
                    Card::new(Suit::Clubs, Rank::Queen),
                    Card::new(Suit::Diamonds, Rank::Five),
                    Card::new(Suit::Spades, Rank::Six),
                ],
            ),
            seated(
                "Bruno",
                true,
                &[
                    Card::new(Suit::Diamonds, Rank::Seven),
                    Card::new(Suit::Spades, Rank::Three),
                ],
            ),
        ];
        (state, participants)
    }

    #[test]
    fn test_snapshot_populates_only_the_recipient_hand() {
        let (state, participants) = sample_table();
        let snapshot = MatchSnapshot::build(Uuid::new_v4(), &state, &participants, Some(0));

        assert_eq!(snapshot.seats.len(), 2);
        assert_eq!(snapshot.seats[0].hand.as_ref().map(Vec::len), Some(3));
        assert!(snapshot.seats[1].hand.is_none());
        assert_eq!(snapshot.seats[1].hand_size, 2);
    }

    #[test]
    fn test_spectator_snapshot_masks_every_hand() {
        let (state, participants) = sample_table();
        let snapshot = MatchSnapshot::build(Uuid::new_v4(), &state, &participants, None);

        assert!(snapshot.seats.iter().all(|seat| seat.hand.is_none()));
        assert_eq!(snapshot.vira, Some(Rank::Four));
        assert_eq!(snapshot.table.len(), 1);
        assert_eq!(snapshot.active_seat, Some(0));
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let (state, participants) = sample_table();
        let snapshot = MatchSnapshot::build(Uuid::new_v4(), &state, &participants, Some(1));
        let json = serde_json::to_value(&snapshot).unwrap();

        assert!(json.get("trucoValue").is_some());
        assert!(json.get("handLeader").is_some());
        assert!(json.get("activeSeat").is_some());
        // Masked seats carry no hand key at all
        assert!(json["seats"][0].get("hand").is_none());
        assert_eq!(json["seats"][1]["hand"].as_array().unwrap().len(), 2);
    }
}
