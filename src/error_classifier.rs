use crate::logging::LogLevel;
use crate::pages::approvals::ApprovalError;
use crate::services::error::{DecisionError, DispatchError};

/// Decides how loudly each failure shows up in the activity log.
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_decision_error(&self, error: &DecisionError) -> LogLevel {
        match error {
            // Needs action from the user
            DecisionError::Rejected { .. } => LogLevel::Error,
            // Usually temporary, retry is offered
            DecisionError::Unavailable(_) => LogLevel::Warn,
        }
    }

    pub fn classify_dispatch_error(&self, error: &DispatchError) -> LogLevel {
        match error {
            DispatchError::NoParentContact(_) => LogLevel::Warn,
            DispatchError::UnknownAlert(_) => LogLevel::Error,
            DispatchError::Failed { reason, .. } if reason.contains("timeout") => LogLevel::Warn,
            DispatchError::Failed { .. } => LogLevel::Error,
        }
    }

    pub fn classify_approval_error(&self, error: &ApprovalError) -> LogLevel {
        match error {
            // Key repeats while a request is in flight are expected
            ApprovalError::AlreadyProcessing(_) => LogLevel::Debug,
            ApprovalError::NothingToRetry => LogLevel::Debug,
            ApprovalError::NotPending(_) => LogLevel::Warn,
            ApprovalError::UnknownRequest(_) => LogLevel::Error,
        }
    }
}
