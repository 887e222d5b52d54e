//! Collaborators the dashboard calls out to.
//!
//! Approval decisions go to a [`DecisionSink`] and reminders to a
//! [`NotificationDispatcher`]. The implementations shipped here are
//! simulated: decisions succeed after a fixed latency and reminders are
//! only logged.

use crate::models::{Channel, Outcome};
use crate::services::error::{DecisionError, DispatchError};
use std::sync::Arc;
use std::time::Duration;

pub mod error;
pub mod simulated;

pub use simulated::{LoggingDispatcher, SimulatedDecisionSink};

#[cfg(test)]
use mockall::automock;

/// A reminder about to be sent for an attendance alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub alert_id: String,
    pub channel: Channel,
    pub student_name: String,
    /// Email for the student channel, phone number for the parent channel.
    pub contact: String,
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DecisionSink: Send + Sync {
    /// Records the decision on a join request.
    async fn submit_approval_decision(
        &self,
        request_id: &str,
        outcome: Outcome,
    ) -> Result<(), DecisionError>;
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Sends an attendance reminder.
    async fn send_reminder(&self, reminder: &ReminderRequest) -> Result<(), DispatchError>;
}

/// The collaborators a session hands to its pages.
#[derive(Clone)]
pub struct Services {
    pub decisions: Arc<dyn DecisionSink>,
    pub notifications: Arc<dyn NotificationDispatcher>,
}

impl Services {
    /// Simulated decisions with the given latency and logged reminders.
    pub fn simulated(decision_latency: Duration) -> Self {
        Self {
            decisions: Arc::new(SimulatedDecisionSink::new(decision_latency)),
            notifications: Arc::new(LoggingDispatcher::new()),
        }
    }
}
