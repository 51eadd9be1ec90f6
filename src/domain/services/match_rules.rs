//! Match rules - round comparison and draw settlement
//!
//! Pure functions over the match state. The engine supplies sequencing,
//! I/O and pacing; nothing here suspends or rolls dice.

use crate::domain::value_objects::{MatchState, PlayedCard, Rank};

/// Outcome of comparing all cards played in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The strict strongest play.
    Winner { seat: u8 },
    /// Two or more plays share the top strength.
    Draw,
}

/// How a drawn round was absorbed into the hand score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawResolution {
    /// First-round draw: both sides take a marker point.
    MarkedBoth,
    /// A later draw hands the leading side its deciding point.
    LeaderDecided { side: usize },
    /// Sides were level; no forcing rule exists, play continues.
    Unresolved,
}

/// Strongest strength on the table so far, if anything was played.
pub fn leading_power(plays: &[PlayedCard], vira: Rank) -> Option<u8> {
    plays.iter().map(|p| p.card.power(vira)).max()
}

/// Compare every play of a round. The strict maximum wins; a maximum
/// attained by two or more plays is a draw.
pub fn resolve_round(plays: &[PlayedCard], vira: Rank) -> RoundOutcome {
    debug_assert!(!plays.is_empty(), "a round resolves at least one play");

    let mut best = 0usize;
    let mut draw = false;

    for i in 1..plays.len() {
        let current = plays[i].card.power(vira);
        let top = plays[best].card.power(vira);
        if current > top {
            best = i;
            draw = false;
        } else if current == top {
            draw = true;
        }
    }

    if draw {
        RoundOutcome::Draw
    } else {
        RoundOutcome::Winner {
            seat: plays[best].seat,
        }
    }
}

/// Settle a drawn round against the hand score.
///
/// Round 1: both sides take a marker point. Rounds 2 and 3: the side
/// already leading is forced to the winning round score. Level sides have
/// no forcing rule; the state is left untouched and the caller decides
/// how to continue.
pub fn apply_round_draw(state: &mut MatchState, round_number: u8) -> DrawResolution {
    if round_number == 1 {
        state.round_score[0] += 1;
        state.round_score[1] += 1;
        return DrawResolution::MarkedBoth;
    }

    if state.round_score[0] > state.round_score[1] {
        state.force_hand_win(0);
        DrawResolution::LeaderDecided { side: 0 }
    } else if state.round_score[1] > state.round_score[0] {
        state.force_hand_win(1);
        DrawResolution::LeaderDecided { side: 1 }
    } else {
        DrawResolution::Unresolved
    }
}
