//! Core worker utilities

use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use tokio::sync::mpsc;

/// Handle workers use to report back to the dashboard.
#[derive(Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// A bounded event channel. Workers wait when the dashboard falls behind.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Event>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(sender), receiver)
    }

    pub async fn send_event(&self, event: Event) {
        // The receiver is gone once the dashboard has quit
        if self.sender.send(event).await.is_err() {
            log::trace!("event dropped after the dashboard closed");
        }
    }

    /// Progress line from the approvals page.
    pub async fn send_approvals_event(
        &self,
        message: String,
        event_type: EventType,
        log_level: LogLevel,
    ) {
        self.send_event(Event::approvals_with_level(message, event_type, log_level))
            .await;
    }
}
