//! Error handling for the dashboard collaborators

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecisionError {
    /// The receiving side refused the decision.
    #[error("Decision for request {request_id} was rejected: {reason}")]
    Rejected { request_id: String, reason: String },

    /// The decision could not be delivered at all.
    #[error("Decision service unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Alert {0} has no parent contact")]
    NoParentContact(String),

    #[error("Unknown alert {0}")]
    UnknownAlert(String),

    #[error("Failed to send reminder for alert {alert_id}: {reason}")]
    Failed { alert_id: String, reason: String },
}
