//! Match engine module
//!
//! Owns the full lifecycle of one Truco match: dealing, round sequencing,
//! wager escalation, draw and fold settlement, score accumulation and turn
//! rotation. One engine instance per match; independent matches share
//! nothing. The engine suspends only while a human answer or a pacing
//! delay is pending, and every suspension point honors the stop flag.

mod hand;
mod round;
mod snapshot;

pub use snapshot::*;

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

use crate::domain::entities::{Participant, ParticipantError};
use crate::domain::value_objects::{
    Deck, DeckError, MatchSettings, MatchState, PlayedCard, Rank, MAX_SEATS,
};
use crate::infrastructure::bot::strategies::BotStrategy;
use crate::infrastructure::io::{InputHandler, MatchLogger, TracingLogger, ABORT_SENTINEL};

/// Engine failures. Draws and folds are regular outcomes, never errors.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Stop was requested or the session behind an ask went away.
    #[error("match aborted")]
    MatchAborted,
    #[error("table is full, at most {MAX_SEATS} seats")]
    TableFull,
    #[error("a match needs 2 or 4 seats, got {0}")]
    InvalidSeatCount(usize),
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Participant(#[from] ParticipantError),
}

/// How a seat makes its decisions. The engine dispatches on the
/// capability, never on the participant's concrete kind.
pub enum SeatController {
    /// Scripted seat: a strategy answers directly, no suspension.
    Autonomous(Box<dyn BotStrategy>),
    /// Human seat, local or remote: questions go through the I/O boundary.
    Interactive(Arc<dyn InputHandler>),
}

/// Cloneable handle that tears a running match down from outside: flips
/// the stop flag and force-resolves every pending ask. Take it after all
/// seats are added.
#[derive(Clone)]
pub struct StopHandle {
    stop: Arc<watch::Sender<bool>>,
    handlers: Vec<Arc<dyn InputHandler>>,
}

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.stop.send(true);
        for handler in &self.handlers {
            handler.abort();
        }
    }
}

/// Result of a completed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub winning_side: usize,
    pub scores: [u16; 2],
    pub hands_played: u32,
}

/// One Truco match in progress.
pub struct MatchEngine {
    id: Uuid,
    settings: MatchSettings,
    participants: Vec<Participant>,
    controllers: Vec<SeatController>,
    state: MatchState,
    deck: Deck,
    rng: ChaCha8Rng,
    logger: Arc<dyn MatchLogger>,
    stop: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
    hands_played: u32,
}

impl MatchEngine {
    pub fn new(settings: MatchSettings) -> Result<Self, EngineError> {
        settings.validate().map_err(EngineError::InvalidSettings)?;
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let (stop, stop_rx) = watch::channel(false);
        Ok(Self {
            id: Uuid::new_v4(),
            settings,
            participants: Vec::new(),
            controllers: Vec::new(),
            state: MatchState::new(),
            deck: Deck::new(),
            rng,
            logger: Arc::new(TracingLogger),
            stop: Arc::new(stop),
            stop_rx,
            hands_played: 0,
        })
    }

    /// Replace the narrative logger (defaults to tracing).
    pub fn set_logger(&mut self, logger: Arc<dyn MatchLogger>) {
        self.logger = logger;
    }

    /// Seat a participant and bind its decision capability. Returns the
    /// seat index; seats alternate sides (even vs odd).
    pub fn add_participant(
        &mut self,
        participant: Participant,
        controller: SeatController,
    ) -> Result<u8, EngineError> {
        if self.participants.len() >= MAX_SEATS {
            return Err(EngineError::TableFull);
        }
        let seat = self.participants.len() as u8;
        tracing::debug!(match_id = %self.id, seat, name = %participant.name, "seat taken");
        self.participants.push(participant);
        self.controllers.push(controller);
        Ok(seat)
    }

    pub fn stop_handle(&self) -> StopHandle {
        let handlers = self
            .controllers
            .iter()
            .filter_map(|controller| match controller {
                SeatController::Interactive(handler) => Some(Arc::clone(handler)),
                SeatController::Autonomous(_) => None,
            })
            .collect();
        StopHandle {
            stop: Arc::clone(&self.stop),
            handlers,
        }
    }

    /// Tear the match down; any pending ask resolves as aborted.
    pub fn stop(&self) {
        self.stop_handle().stop();
    }

    /// Play the match to completion.
    pub async fn run(&mut self) -> Result<MatchOutcome, EngineError> {
        let seats = self.participants.len();
        if seats != 2 && seats != 4 {
            return Err(EngineError::InvalidSeatCount(seats));
        }

        tracing::info!(match_id = %self.id, seats, target = self.settings.target_score, "match starting");

        let target = self.settings.target_score;
        let winning_side = loop {
            if let Some(side) = self.state.match_winner(target) {
                break side;
            }
            self.play_hand().await?;
            self.logger.log(&format!(
                "Score: {} {} x {} {}",
                self.side_label(0),
                self.state.scores[0],
                self.side_label(1),
                self.state.scores[1],
            ));
        };

        self.logger.log(&format!(
            "{} win the match {} x {}!",
            self.side_label(winning_side),
            self.state.scores[winning_side],
            self.state.scores[MatchState::opposing(winning_side)],
        ));
        self.logger.close();
        tracing::info!(match_id = %self.id, winning_side, hands = self.hands_played, "match over");

        Ok(MatchOutcome {
            winning_side,
            scores: self.state.scores,
            hands_played: self.hands_played,
        })
    }

    // --- read-only accessors (owned copies, safe for observers) ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn scores(&self) -> [u16; 2] {
        self.state.scores
    }

    pub fn round_score(&self) -> [u8; 2] {
        self.state.round_score
    }

    pub fn vira(&self) -> Option<Rank> {
        self.state.vira
    }

    pub fn truco_value(&self) -> u8 {
        self.state.truco_value
    }

    pub fn hand_leader(&self) -> u8 {
        self.state.hand_leader
    }

    pub fn active_seat(&self) -> Option<u8> {
        self.state.active_seat
    }

    pub fn table(&self) -> Vec<PlayedCard> {
        self.state.table.clone()
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }

    // --- suspension points ---

    /// Ask through the I/O boundary, honoring the stop flag. The abort
    /// sentinel is never surfaced as an answer.
    async fn ask(
        &self,
        handler: &Arc<dyn InputHandler>,
        prompt: &str,
    ) -> Result<String, EngineError> {
        if *self.stop_rx.borrow() {
            return Err(EngineError::MatchAborted);
        }
        let mut stop = self.stop_rx.clone();
        let answer = tokio::select! {
            answer = handler.ask(prompt) => answer,
            _ = stop.wait_for(|stopped| *stopped) => return Err(EngineError::MatchAborted),
        };
        if answer == ABORT_SENTINEL || *self.stop_rx.borrow() {
            return Err(EngineError::MatchAborted);
        }
        Ok(answer)
    }

    /// Pacing delay so observers can follow the action; interruptible.
    async fn pace(&self) -> Result<(), EngineError> {
        if *self.stop_rx.borrow() {
            return Err(EngineError::MatchAborted);
        }
        if self.settings.pacing_ms == 0 {
            return Ok(());
        }
        let mut stop = self.stop_rx.clone();
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(self.settings.pacing_ms)) => Ok(()),
            _ = stop.wait_for(|stopped| *stopped) => Err(EngineError::MatchAborted),
        }
    }

    /// Names of everyone on a side, for narrative lines.
    fn side_label(&self, side: usize) -> String {
        let names: Vec<&str> = self
            .participants
            .iter()
            .enumerate()
            .filter(|(seat, _)| MatchState::side_of(*seat as u8) == side)
            .map(|(_, p)| p.name.as_str())
            .collect();
        names.join(" & ")
    }
}
