//! Hand loop: deal, run rounds, settle the stake, rotate the lead.

use super::round::RoundEnd;
use super::{EngineError, MatchEngine};
use crate::domain::services::match_rules::{self, DrawResolution};
use crate::domain::value_objects::MatchState;

impl MatchEngine {
    /// Play one hand-of-cards: up to `hand_size` rounds, ended early by a
    /// fold or by a side taking two rounds.
    pub(super) async fn play_hand(&mut self) -> Result<(), EngineError> {
        self.deck.initialize();
        self.deck.shuffle(&mut self.rng);

        let hand_size = self.settings.hand_size as usize;
        for seat in 0..self.participants.len() {
            let cards = self.deck.deal(hand_size)?;
            let participant = &mut self.participants[seat];
            participant.clear_hand();
            participant.receive_cards(cards);
        }
        let vira_card = self.deck.deal_one()?;
        let vira = vira_card.rank;
        self.state.begin_hand(vira);

        // Detection only: blind dealing for the 11-11 hand is an
        // unimplemented rule, hands stay visible
        let threshold = self.settings.target_score.saturating_sub(1);
        if threshold > 0 && self.state.scores.iter().all(|&score| score == threshold) {
            self.logger
                .log("Mão de Ferro! Both sides one point from the match.");
            tracing::warn!(match_id = %self.id, "mão de ferro detected, hands stay visible");
        }

        self.logger.log(&format!("New hand. Vira: {vira_card}"));
        tracing::debug!(match_id = %self.id, vira = %vira_card, leader = self.state.hand_leader, "hand starting");

        let mut leader = self.state.hand_leader;
        let mut round_number = 1u8;
        loop {
            match self.play_round(round_number, leader, vira).await? {
                RoundEnd::Won { seat } => {
                    let side = MatchState::side_of(seat);
                    self.state.award_round(side);
                    self.logger.log(&format!(
                        "Round {} goes to {}",
                        round_number, self.participants[seat as usize].name
                    ));
                    leader = seat;
                }
                RoundEnd::Drawn => {
                    self.logger.log(&format!("Round {round_number} is a draw"));
                    match match_rules::apply_round_draw(&mut self.state, round_number) {
                        DrawResolution::MarkedBoth => {
                            self.logger.log("Both sides take a marker point");
                        }
                        DrawResolution::LeaderDecided { side } => {
                            self.logger
                                .log(&format!("The draw decides for {}", self.side_label(side)));
                        }
                        DrawResolution::Unresolved => {
                            // No forcing rule exists for a draw with the
                            // sides level; the next round (if any) decides
                            self.logger
                                .log("Sides are level after the draw, play continues");
                            tracing::warn!(
                                match_id = %self.id,
                                round = round_number,
                                "level draw has no forcing rule"
                            );
                        }
                    }
                }
                RoundEnd::Folded { winning_side } => {
                    self.state.force_hand_win(winning_side);
                }
            }

            self.pace().await?;

            if self.state.hand_winner().is_some() || round_number as usize >= hand_size {
                break;
            }
            round_number += 1;
        }

        match self.state.hand_winner() {
            Some(side) => {
                let points = self.state.award_hand(side);
                self.logger.log(&format!(
                    "{} take the hand for {} point{}",
                    self.side_label(side),
                    points,
                    if points == 1 { "" } else { "s" }
                ));
            }
            None => {
                self.logger.log("Hand fully drawn, no points awarded");
            }
        }

        self.hands_played += 1;
        self.state
            .rotate_leader(self.participants.len() as u8);
        Ok(())
    }
}
