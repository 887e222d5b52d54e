//! Event System
//!
//! Events flow from worker tasks to the dashboard loop. Every event is an
//! activity-log entry; decision results also carry a payload the approvals
//! page applies.

use crate::logging::{LogLevel, should_log_with_env};
use crate::models::Outcome;
use crate::services::error::DecisionError;
use chrono::Local;
use std::fmt::Display;

/// Which part of the dashboard produced an event.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    Approvals,
    Alerts,
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
    StateChange,
}

/// How an in-flight approval decision ended.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DecisionResult {
    Applied,
    Failed(DecisionError),
    Cancelled,
}

impl DecisionResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, DecisionResult::Applied)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    DecisionSettled {
        /// Mount generation of the approvals page that started the decision.
        generation: u64,
        request_id: String,
        outcome: Outcome,
        result: DecisionResult,
    },
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    pub payload: Option<Payload>,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            payload: None,
        }
    }

    pub fn approvals_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Approvals, msg, event_type, log_level)
    }

    pub fn alerts_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Alerts, msg, event_type, log_level)
    }

    pub fn dashboard_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Dashboard, msg, event_type, log_level)
    }

    /// Result of a decision, logged and handed to the approvals page.
    pub fn decision_settled(
        generation: u64,
        request_id: &str,
        outcome: Outcome,
        result: DecisionResult,
    ) -> Self {
        let (msg, event_type, log_level) = match &result {
            DecisionResult::Applied => (
                format!("Request {request_id} {outcome}"),
                EventType::Success,
                LogLevel::Info,
            ),
            DecisionResult::Failed(e) => (
                format!("Could not {} request {request_id}: {e}", outcome.verb()),
                EventType::Error,
                LogLevel::Warn,
            ),
            DecisionResult::Cancelled => (
                format!("Decision for request {request_id} abandoned"),
                EventType::StateChange,
                LogLevel::Debug,
            ),
        };
        let mut event = Self::new(Source::Approvals, msg, event_type, log_level);
        event.payload = Some(Payload::DecisionSettled {
            generation,
            request_id: request_id.to_string(),
            outcome,
            result,
        });
        event
    }

    pub fn should_display(&self) -> bool {
        // StateChange events only drive state, they are not log lines
        if self.event_type == EventType::StateChange {
            return false;
        }
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.event_type, self.timestamp, self.source, self.msg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_decision_is_a_success_line() {
        let event = Event::decision_settled(3, "2", Outcome::Declined, DecisionResult::Applied);
        assert_eq!(event.event_type, EventType::Success);
        assert_eq!(event.msg, "Request 2 declined");
        assert!(event.should_display());
        assert!(matches!(
            event.payload,
            Some(Payload::DecisionSettled { generation: 3, .. })
        ));
    }

    #[test]
    fn failed_decision_is_a_warning() {
        let failure = DecisionError::Unavailable("offline".to_string());
        let event =
            Event::decision_settled(1, "4", Outcome::Approved, DecisionResult::Failed(failure));
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.log_level, LogLevel::Warn);
        assert!(event.msg.starts_with("Could not approve request 4"));
    }

    #[test]
    fn state_changes_are_never_displayed() {
        let event = Event::decision_settled(1, "4", Outcome::Approved, DecisionResult::Cancelled);
        assert!(!event.should_display());
    }

    #[test]
    fn display_includes_source_and_message() {
        let event = Event::alerts_with_level(
            "Sent student reminder".to_string(),
            EventType::Success,
            LogLevel::Info,
        );
        let line = event.to_string();
        assert!(line.starts_with("Success ["));
        assert!(line.ends_with("Alerts: Sent student reminder"));
    }
}
