//! Channel-backed input handler
//!
//! Bridges the engine's ask-and-suspend pattern to a transport: each `ask`
//! becomes an [`AskRequest`] on an mpsc queue with a oneshot reply slot.
//! The transport side (socket handler, prompt loop, test driver) receives
//! requests and answers at its own pace. Aborting force-resolves the
//! pending question with the sentinel and poisons the handler for any
//! later questions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};

use super::{InputHandler, ABORT_SENTINEL};

/// One question in flight to the transport side.
#[derive(Debug)]
pub struct AskRequest {
    pub prompt: String,
    /// Dropping this without sending resolves the ask as aborted.
    pub reply: oneshot::Sender<String>,
}

impl AskRequest {
    pub fn answer(self, text: impl Into<String>) {
        let _ = self.reply.send(text.into());
    }
}

/// Engine-facing half of the bridge. The paired receiver goes to the
/// transport; one handler serves one seat.
pub struct ChannelInput {
    requests: mpsc::Sender<AskRequest>,
    closed: watch::Sender<bool>,
}

impl ChannelInput {
    /// Build the handler plus the transport-side request stream.
    pub fn new(buffer: usize) -> (Arc<Self>, mpsc::Receiver<AskRequest>) {
        let (requests, rx) = mpsc::channel(buffer);
        let (closed, _) = watch::channel(false);
        (Arc::new(Self { requests, closed }), rx)
    }
}

#[async_trait]
impl InputHandler for ChannelInput {
    async fn ask(&self, prompt: &str) -> String {
        if *self.closed.borrow() {
            return ABORT_SENTINEL.to_string();
        }

        let (reply, answer) = oneshot::channel();
        let request = AskRequest {
            prompt: prompt.to_string(),
            reply,
        };
        // A gone transport is a disconnect, not an error
        if self.requests.send(request).await.is_err() {
            tracing::debug!("ask dropped: transport side is gone");
            return ABORT_SENTINEL.to_string();
        }

        let mut closed = self.closed.subscribe();
        tokio::select! {
            answer = answer => answer.unwrap_or_else(|_| ABORT_SENTINEL.to_string()),
            _ = closed.wait_for(|c| *c) => ABORT_SENTINEL.to_string(),
        }
    }

    fn abort(&self) {
        let _ = self.closed.send(true);
    }

    fn close(&self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ask_and_answer_round_trip() {
        let (handler, mut requests) = ChannelInput::new(8);

        let asking = tokio::spawn({
            let handler = handler.clone();
            async move { handler.ask("Choose card index (0-2): ").await }
        });

        let request = requests.recv().await.unwrap();
        assert!(request.prompt.contains("Choose card index"));
        request.answer("1");

        assert_eq!(asking.await.unwrap(), "1");
    }

    #[tokio::test]
    async fn test_abort_resolves_a_pending_ask() {
        let (handler, mut requests) = ChannelInput::new(8);

        let asking = tokio::spawn({
            let handler = handler.clone();
            async move { handler.ask("'t' for Truco, 'd' to Fold: ").await }
        });

        // Wait until the question is in flight, then abort without answering
        let _request = requests.recv().await.unwrap();
        handler.abort();

        assert_eq!(asking.await.unwrap(), ABORT_SENTINEL);
    }

    #[tokio::test]
    async fn test_aborted_handler_refuses_later_questions() {
        let (handler, _requests) = ChannelInput::new(8);
        handler.abort();
        assert_eq!(handler.ask("anything").await, ABORT_SENTINEL);
    }

    #[tokio::test]
    async fn test_dropped_transport_reads_as_abort() {
        let (handler, requests) = ChannelInput::new(8);
        drop(requests);
        assert_eq!(handler.ask("Choose card index: ").await, ABORT_SENTINEL);
    }

    #[tokio::test]
    async fn test_dropped_reply_slot_reads_as_abort() {
        let (handler, mut requests) = ChannelInput::new(8);

        let asking = tokio::spawn({
            let handler = handler.clone();
            async move { handler.ask("Choose card index: ").await }
        });

        let request = requests.recv().await.unwrap();
        drop(request);

        assert_eq!(asking.await.unwrap(), ABORT_SENTINEL);
    }
}
