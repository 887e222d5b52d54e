//! In-process stand-ins for the decision and notification services.

use super::{DecisionSink, NotificationDispatcher, ReminderRequest};
use crate::consts::cli_consts::approvals;
use crate::models::Outcome;
use crate::services::error::{DecisionError, DispatchError};
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Accepts every decision after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedDecisionSink {
    latency: Duration,
}

impl SimulatedDecisionSink {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedDecisionSink {
    fn default() -> Self {
        Self::new(approvals::decision_latency())
    }
}

#[async_trait::async_trait]
impl DecisionSink for SimulatedDecisionSink {
    async fn submit_approval_decision(
        &self,
        request_id: &str,
        outcome: Outcome,
    ) -> Result<(), DecisionError> {
        debug!("submitting {outcome} for request {request_id}");
        sleep(self.latency).await;
        Ok(())
    }
}

/// Logs reminders instead of delivering them, keeping a copy of each.
#[derive(Debug, Clone, Default)]
pub struct LoggingDispatcher {
    sent: Arc<Mutex<Vec<ReminderRequest>>>,
}

impl LoggingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reminders sent so far, oldest first.
    pub async fn sent(&self) -> Vec<ReminderRequest> {
        self.sent.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl NotificationDispatcher for LoggingDispatcher {
    async fn send_reminder(&self, reminder: &ReminderRequest) -> Result<(), DispatchError> {
        info!(
            "Sending {} reminder for alert {} to {}",
            reminder.channel, reminder.alert_id, reminder.contact
        );
        self.sent.lock().await.push(reminder.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Channel;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn simulated_sink_waits_for_latency() {
        let sink = SimulatedDecisionSink::default();
        let started = Instant::now();
        sink.submit_approval_decision("1", Outcome::Approved)
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1_000));
    }

    #[tokio::test]
    async fn logging_dispatcher_records_reminders() {
        let dispatcher = LoggingDispatcher::new();
        let reminder = ReminderRequest {
            alert_id: "1".to_string(),
            channel: Channel::Parent,
            student_name: "Ravi Mehta".to_string(),
            contact: "+91 98765 43210".to_string(),
        };
        dispatcher.send_reminder(&reminder).await.unwrap();
        assert_eq!(dispatcher.sent().await, vec![reminder]);
    }
}
