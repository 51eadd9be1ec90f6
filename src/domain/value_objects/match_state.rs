//! MatchState - compact scoreboard and round table for one match
//!
//! Owned exclusively by the engine. Observers never see this struct
//! directly; they get immutable snapshot copies built from it.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank};

/// Opposing sides in a match.
pub const SIDES: usize = 2;
/// Maximum seats at the table (two per side).
pub const MAX_SEATS: usize = 4;
/// Round wins that take a hand.
pub const ROUNDS_TO_WIN_HAND: u8 = 2;
/// Stake cap; no raise is offered at this value.
pub const MAX_TRUCO_VALUE: u8 = 12;

/// A card on the table, attributed to the seat that played it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCard {
    pub seat: u8,
    pub card: Card,
}

/// Scoreboard, stake and in-round table.
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Match points per side
    pub scores: [u16; SIDES],
    /// Rounds won per side within the current hand
    pub round_score: [u8; SIDES],
    /// Reference rank for the current hand
    pub vira: Option<Rank>,
    /// Points at stake for the current hand (1, 3, 6, 9 or 12)
    pub truco_value: u8,
    /// Seat that leads the current hand, rotates each hand
    pub hand_leader: u8,
    /// Seat currently acting, transient, for observers
    pub active_seat: Option<u8>,
    /// Cards played in the round in progress, in play order
    pub table: Vec<PlayedCard>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    pub fn new() -> Self {
        Self {
            scores: [0; SIDES],
            round_score: [0; SIDES],
            vira: None,
            truco_value: 1,
            hand_leader: 0,
            active_seat: None,
            table: Vec::with_capacity(MAX_SEATS),
        }
    }

    /// Side a seat plays for: even seats against odd seats.
    #[inline]
    pub fn side_of(seat: u8) -> usize {
        (seat % 2) as usize
    }

    #[inline]
    pub fn opposing(side: usize) -> usize {
        side ^ 1
    }

    /// Reset per-hand state and record the new Vira.
    pub fn begin_hand(&mut self, vira: Rank) {
        self.truco_value = 1;
        self.round_score = [0; SIDES];
        self.vira = Some(vira);
        self.table.clear();
        self.active_seat = None;
    }

    /// Clear the table for a new round.
    pub fn begin_round(&mut self) {
        self.table.clear();
        self.active_seat = None;
    }

    pub fn record_play(&mut self, seat: u8, card: Card) {
        self.table.push(PlayedCard { seat, card });
    }

    /// Next stake if a raise is accepted: 1 goes to 3, then steps of 3.
    #[inline]
    pub fn raise_target(&self) -> u8 {
        if self.truco_value == 1 {
            3
        } else {
            (self.truco_value + 3).min(MAX_TRUCO_VALUE)
        }
    }

    /// A raise may only be offered below the cap.
    #[inline]
    pub fn can_raise(&self) -> bool {
        self.truco_value < MAX_TRUCO_VALUE
    }

    /// Commit an accepted raise.
    pub fn apply_raise(&mut self) {
        self.truco_value = self.raise_target();
    }

    /// Credit one round to a side.
    pub fn award_round(&mut self, side: usize) {
        self.round_score[side] += 1;
    }

    /// Force a side straight to the hand-winning round score (folds, and
    /// draws that hand the lead its deciding point).
    pub fn force_hand_win(&mut self, side: usize) {
        self.round_score[side] = ROUNDS_TO_WIN_HAND;
    }

    /// Side that has taken the hand, if any.
    pub fn hand_winner(&self) -> Option<usize> {
        let taken = [
            self.round_score[0] >= ROUNDS_TO_WIN_HAND,
            self.round_score[1] >= ROUNDS_TO_WIN_HAND,
        ];
        match taken {
            [true, false] => Some(0),
            [false, true] => Some(1),
            _ => None,
        }
    }

    /// Award the current stake to a side; returns the points granted.
    pub fn award_hand(&mut self, side: usize) -> u16 {
        let points = self.truco_value as u16;
        self.scores[side] += points;
        points
    }

    /// Rotate the hand lead to the next seat for the following hand.
    pub fn rotate_leader(&mut self, seat_count: u8) {
        self.hand_leader = (self.hand_leader + 1) % seat_count;
    }

    /// First side at or past the target, in accumulation order.
    pub fn match_winner(&self, target: u16) -> Option<usize> {
        if self.scores[0] >= target {
            Some(0)
        } else if self.scores[1] >= target {
            Some(1)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_over(&self, target: u16) -> bool {
        self.match_winner(target).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Suit;

    #[test]
    fn test_new_state() {
        let state = MatchState::new();
        assert_eq!(state.scores, [0, 0]);
        assert_eq!(state.round_score, [0, 0]);
        assert_eq!(state.truco_value, 1);
        assert_eq!(state.vira, None);
        assert!(state.table.is_empty());
    }

    #[test]
    fn test_seats_alternate_sides() {
        assert_eq!(MatchState::side_of(0), 0);
        assert_eq!(MatchState::side_of(1), 1);
        assert_eq!(MatchState::side_of(2), 0);
        assert_eq!(MatchState::side_of(3), 1);
        assert_eq!(MatchState::opposing(0), 1);
        assert_eq!(MatchState::opposing(1), 0);
    }

    #[test]
    fn test_raise_ladder_caps_at_twelve() {
        let mut state = MatchState::new();
        let mut seen = vec![state.truco_value];
        while state.can_raise() {
            state.apply_raise();
            seen.push(state.truco_value);
        }
        assert_eq!(seen, vec![1, 3, 6, 9, 12]);
        assert!(!state.can_raise());
    }

    #[test]
    fn test_begin_hand_resets_stake_and_rounds() {
        let mut state = MatchState::new();
        state.apply_raise();
        state.award_round(1);
        state.record_play(0, Card::new(Suit::Clubs, Rank::Ace));

        state.begin_hand(Rank::Seven);
        assert_eq!(state.truco_value, 1);
        assert_eq!(state.round_score, [0, 0]);
        assert_eq!(state.vira, Some(Rank::Seven));
        assert!(state.table.is_empty());
    }

    #[test]
    fn test_hand_winner_requires_two_rounds() {
        let mut state = MatchState::new();
        assert_eq!(state.hand_winner(), None);

        state.award_round(0);
        assert_eq!(state.hand_winner(), None);

        state.award_round(0);
        assert_eq!(state.hand_winner(), Some(0));

        let mut state = MatchState::new();
        state.force_hand_win(1);
        assert_eq!(state.hand_winner(), Some(1));
    }

    #[test]
    fn test_award_hand_pays_the_current_stake() {
        let mut state = MatchState::new();
        state.apply_raise();
        let points = state.award_hand(1);
        assert_eq!(points, 3);
        assert_eq!(state.scores, [0, 3]);
    }

    #[test]
    fn test_match_winner_at_target() {
        let mut state = MatchState::new();
        state.scores = [11, 10];
        assert_eq!(state.match_winner(12), None);

        state.scores[0] += 3;
        assert_eq!(state.match_winner(12), Some(0));
        assert!(state.is_over(12));
    }

    #[test]
    fn test_rotate_leader_wraps() {
        let mut state = MatchState::new();
        state.rotate_leader(2);
        assert_eq!(state.hand_leader, 1);
        state.rotate_leader(2);
        assert_eq!(state.hand_leader, 0);
    }
}
