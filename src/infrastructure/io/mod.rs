//! I/O boundary module
//!
//! The engine never talks to a console, socket or UI directly; it asks
//! questions through `InputHandler` and narrates through `MatchLogger`.
//! Concrete adapters live here: a channel bridge for remote/local humans,
//! an unattended handler for seats that must never be asked, a tracing
//! logger for headless runs and a broadcast hub for observers.

mod broadcast;
mod channel_input;

pub use broadcast::*;
pub use channel_input::*;

use async_trait::async_trait;

/// Answer an aborted or failed `ask` resolves to. Never a valid game
/// choice; the engine converts it into an early unwind.
pub const ABORT_SENTINEL: &str = "abort";

/// One line of input from whoever drives a seat.
///
/// `ask` must never resolve synchronously on the adapter's side, and must
/// resolve with [`ABORT_SENTINEL`] instead of erroring when the session is
/// torn down mid-question.
#[async_trait]
pub trait InputHandler: Send + Sync {
    async fn ask(&self, prompt: &str) -> String;

    /// Force-resolve a pending `ask` with the abort sentinel.
    fn abort(&self) {}

    /// End-of-session cleanup signal.
    fn close(&self) {}
}

/// One-way narrative channel players and observers see, distinct from the
/// crate's `tracing` diagnostics.
pub trait MatchLogger: Send + Sync {
    fn log(&self, message: &str);

    fn close(&self) {}
}

/// Input handler for seats that must never be asked (scripted-only
/// matches). A question reaching it is a sequencing bug; it answers with
/// the abort sentinel so the engine unwinds cleanly instead of hanging.
pub struct UnattendedInput;

#[async_trait]
impl InputHandler for UnattendedInput {
    async fn ask(&self, prompt: &str) -> String {
        tracing::warn!("unattended seat was asked: {}", prompt);
        ABORT_SENTINEL.to_string()
    }
}

/// Routes narrative lines into `tracing` for headless runs.
pub struct TracingLogger;

impl MatchLogger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!("{}", message);
    }
}
