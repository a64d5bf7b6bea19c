//! The single in-flight `/chat` request.
//!
//! The run loop owns one `RequestSlot`. Dropping it aborts whatever request is
//! still running, so a widget that has been torn down never receives a reply.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::client::ChatClient;
use crate::tui::AppEvent;

struct PendingRequest {
    turn: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
pub struct RequestSlot {
    pending: Option<PendingRequest>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the request for `turn`. The reply comes back as
    /// `AppEvent::Reply` on `events`.
    pub fn start(
        &mut self,
        client: &ChatClient,
        events: UnboundedSender<AppEvent>,
        turn: u64,
        message: String,
    ) {
        // At most one request per slot
        self.cancel();

        let client = client.clone();
        let handle = tokio::spawn(async move {
            let outcome = client.send(&message).await;
            // Receiver gone means the UI is shutting down
            let _ = events.send(AppEvent::Reply { turn, outcome });
        });

        self.pending = Some(PendingRequest { turn, handle });
    }

    /// Forget the request for `turn` once its reply has been handled
    pub fn finish(&mut self, turn: u64) {
        if self.pending.as_ref().is_some_and(|p| p.turn == turn) {
            self.pending = None;
        }
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(turn = pending.turn, "aborting in-flight chat request");
            pending.handle.abort();
        }
    }

    pub fn pending_turn(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.turn)
    }
}

impl Drop for RequestSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
