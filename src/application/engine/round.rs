//! Round loop: seat-by-seat turns, the Truco sub-protocol and round
//! comparison. A fold anywhere short-circuits the round and the hand.

use std::sync::Arc;

use rand::Rng;

use super::{EngineError, MatchEngine, SeatController};
use crate::domain::services::match_rules::{self, RoundOutcome};
use crate::domain::value_objects::{MatchState, Rank};
use crate::infrastructure::bot::strategies::TurnView;
use crate::infrastructure::io::InputHandler;

/// How a round ended.
pub(super) enum RoundEnd {
    Won { seat: u8 },
    Drawn,
    /// Someone conceded; the hand goes to `winning_side` at full stake.
    Folded { winning_side: usize },
}

enum TurnAction {
    Played,
    Folded { winning_side: usize },
}

enum RaiseOutcome {
    Accepted,
    Refused,
}

impl MatchEngine {
    pub(super) async fn play_round(
        &mut self,
        round_number: u8,
        leader: u8,
        vira: Rank,
    ) -> Result<RoundEnd, EngineError> {
        self.state.begin_round();
        tracing::debug!(match_id = %self.id, round = round_number, leader, "round starting");

        let seats = self.participants.len() as u8;
        for offset in 0..seats {
            let seat = (leader + offset) % seats;
            self.state.active_seat = Some(seat);

            let handler = match &self.controllers[seat as usize] {
                SeatController::Autonomous(_) => None,
                SeatController::Interactive(handler) => Some(Arc::clone(handler)),
            };
            let action = match handler {
                None => self.scripted_turn(seat, vira).await?,
                Some(handler) => self.interactive_turn(seat, vira, handler).await?,
            };

            if let TurnAction::Folded { winning_side } = action {
                self.state.active_seat = None;
                return Ok(RoundEnd::Folded { winning_side });
            }
        }
        self.state.active_seat = None;

        match match_rules::resolve_round(&self.state.table, vira) {
            RoundOutcome::Winner { seat } => Ok(RoundEnd::Won { seat }),
            RoundOutcome::Draw => Ok(RoundEnd::Drawn),
        }
    }

    /// One scripted turn: maybe a spontaneous raise, then a direct play.
    /// An out-of-range strategy index is a bug and propagates.
    async fn scripted_turn(&mut self, seat: u8, vira: Rank) -> Result<TurnAction, EngineError> {
        // Spontaneous Truco only at base stake and only on strong material
        let raises = self.state.truco_value == 1
            && self.scripted_accepts(seat, vira)
            && self.rng.gen_bool(self.settings.truco_call_chance);
        if raises {
            if let RaiseOutcome::Refused = self.offer_raise(seat, vira).await? {
                return Ok(TurnAction::Folded {
                    winning_side: MatchState::side_of(seat),
                });
            }
        }

        let index = self.scripted_move(seat, vira);
        let card = self.participants[seat as usize].play_card(index)?;
        self.state.record_play(seat, card);
        self.logger.log(&format!(
            "{} played {}",
            self.participants[seat as usize].name, card
        ));
        self.pace().await?;
        Ok(TurnAction::Played)
    }

    /// One interactive turn. Invalid input re-prompts the same seat
    /// without advancing turn order; after an accepted raise only a card
    /// choice remains on the table.
    async fn interactive_turn(
        &mut self,
        seat: u8,
        vira: Rank,
        handler: Arc<dyn InputHandler>,
    ) -> Result<TurnAction, EngineError> {
        let mut allow_commands = true;
        loop {
            let hand_len = self.participants[seat as usize].hand().len();
            let prompt = {
                let name = &self.participants[seat as usize].name;
                let hand_line = self.hand_line(seat);
                let top = hand_len.saturating_sub(1);
                if allow_commands {
                    format!(
                        "{name}, your hand: {hand_line}. Choose card index (0-{top}), 't' for Truco, 'd' to Fold: "
                    )
                } else {
                    format!("{name}, your hand: {hand_line}. Choose card index (0-{top}): ")
                }
            };

            let answer = self.ask(&handler, &prompt).await?;
            match answer.trim() {
                "d" if allow_commands => {
                    self.logger
                        .log(&format!("{} folded", self.participants[seat as usize].name));
                    return Ok(TurnAction::Folded {
                        winning_side: MatchState::opposing(MatchState::side_of(seat)),
                    });
                }
                "t" if allow_commands => {
                    if !self.state.can_raise() {
                        self.logger.log("Already max value!");
                        continue;
                    }
                    match self.offer_raise(seat, vira).await? {
                        RaiseOutcome::Accepted => {
                            allow_commands = false;
                        }
                        RaiseOutcome::Refused => {
                            return Ok(TurnAction::Folded {
                                winning_side: MatchState::side_of(seat),
                            });
                        }
                    }
                }
                text => match text.parse::<usize>() {
                    Ok(index) if index < hand_len => {
                        let card = self.participants[seat as usize].play_card(index)?;
                        self.state.record_play(seat, card);
                        self.logger.log(&format!(
                            "{} played {}",
                            self.participants[seat as usize].name, card
                        ));
                        return Ok(TurnAction::Played);
                    }
                    _ => {
                        self.logger.log("Invalid choice, try again.");
                    }
                },
            }
        }
    }

    /// Route a raise to the opposing side and settle it. Refusal concedes
    /// the hand to the raiser's side at the pre-raise stake.
    async fn offer_raise(&mut self, raiser: u8, vira: Rank) -> Result<RaiseOutcome, EngineError> {
        let seats = self.participants.len() as u8;
        // Sides alternate by seat, so the next seat always responds
        let responder = (raiser + 1) % seats;
        let target = self.state.raise_target();

        self.logger.log(&format!(
            "{} yelled TRUCO!",
            self.participants[raiser as usize].name
        ));

        let handler = match &self.controllers[responder as usize] {
            SeatController::Interactive(handler) => Some(Arc::clone(handler)),
            SeatController::Autonomous(_) => None,
        };
        let accepted = match handler {
            Some(handler) => {
                let prompt = format!(
                    "{} yelled TRUCO to raise the hand to {} points! 'a' to Accept, 'd' to Fold: ",
                    self.participants[raiser as usize].name, target
                );
                let answer = self.ask(&handler, &prompt).await?;
                answer.trim() == "a"
            }
            None => {
                let accepts = self.scripted_accepts(responder, vira);
                self.pace().await?;
                accepts
            }
        };

        if accepted {
            self.state.apply_raise();
            self.logger.log(&format!(
                "{} accepted! The hand is now worth {} points",
                self.participants[responder as usize].name, self.state.truco_value
            ));
            Ok(RaiseOutcome::Accepted)
        } else {
            self.logger.log(&format!(
                "{} ran from the Truco",
                self.participants[responder as usize].name
            ));
            Ok(RaiseOutcome::Refused)
        }
    }

    fn scripted_move(&self, seat: u8, vira: Rank) -> usize {
        let view = TurnView {
            vira,
            round_cards: &self.state.table,
            hand_score: self.state.round_score,
        };
        match &self.controllers[seat as usize] {
            SeatController::Autonomous(strategy) => {
                strategy.decide_move(&view, self.participants[seat as usize].hand())
            }
            SeatController::Interactive(_) => {
                debug_assert!(false, "scripted decision requested for an interactive seat");
                0
            }
        }
    }

    fn scripted_accepts(&self, seat: u8, vira: Rank) -> bool {
        let view = TurnView {
            vira,
            round_cards: &self.state.table,
            hand_score: self.state.round_score,
        };
        match &self.controllers[seat as usize] {
            SeatController::Autonomous(strategy) => {
                strategy.should_accept_truco(&view, self.participants[seat as usize].hand())
            }
            SeatController::Interactive(_) => false,
        }
    }

    fn hand_line(&self, seat: u8) -> String {
        self.participants[seat as usize]
            .hand()
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
