//! Pending student approvals
//!
//! Each decision moves through three steps: [`ApprovalsController::begin_decision`]
//! marks the request as in flight, a worker awaits the decision sink, and
//! [`ApprovalsController::complete_decision`] applies the result. The
//! in-flight marker is cleared whatever the result. A failure leaves the
//! request pending and is kept so it can be retried.

use crate::consts::cli_consts::approvals::RECENTLY_PROCESSED_LIMIT;
use crate::events::DecisionResult;
use crate::filter::{RecordFilter, filter_slice};
use crate::models::{ApprovalRequest, Outcome};
use crate::services::DecisionSink;
use crate::services::error::DecisionError;
use crate::workers::decision::run_decision;
use std::collections::BTreeSet;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApprovalError {
    #[error("Unknown request {0}")]
    UnknownRequest(String),

    #[error("Request {0} has already been processed")]
    NotPending(String),

    #[error("Request {0} is already being processed")]
    AlreadyProcessing(String),

    #[error("There is no failed decision to retry")]
    NothingToRetry,
}

/// A decision that has been started and must be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTicket {
    pub request_id: String,
    pub outcome: Outcome,
}

/// The most recent decision the sink did not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDecision {
    pub request_id: String,
    pub outcome: Outcome,
    pub error: DecisionError,
}

/// Splits requests into the two lists the page shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Bucket {
    Pending,
    Processed,
}

impl RecordFilter<ApprovalRequest> for Bucket {
    fn matches(&self, item: &ApprovalRequest) -> bool {
        match self {
            Bucket::Pending => item.is_pending(),
            Bucket::Processed => !item.is_pending(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApprovalsController {
    requests: Vec<ApprovalRequest>,
    /// Requests with a decision in flight.
    processing: BTreeSet<String>,
    /// Ids in the order their decisions were applied, oldest first.
    decided: Vec<String>,
    last_failure: Option<FailedDecision>,
    /// Cursor into the pending list.
    selected: usize,
}

impl ApprovalsController {
    pub fn new(requests: Vec<ApprovalRequest>) -> Self {
        Self {
            requests,
            processing: BTreeSet::new(),
            decided: Vec::new(),
            last_failure: None,
            selected: 0,
        }
    }

    pub fn requests(&self) -> &[ApprovalRequest] {
        &self.requests
    }

    /// Requests still waiting, in fixture order.
    pub fn pending(&self) -> Vec<&ApprovalRequest> {
        filter_slice(&self.requests, &Bucket::Pending)
    }

    /// Every settled request, in fixture order.
    pub fn processed(&self) -> Vec<&ApprovalRequest> {
        filter_slice(&self.requests, &Bucket::Processed)
    }

    /// Settled requests for the "Recently Processed" list: latest decision
    /// first, then requests that arrived already settled, capped.
    pub fn recently_processed(&self) -> Vec<&ApprovalRequest> {
        let mut recent: Vec<&ApprovalRequest> = self
            .decided
            .iter()
            .rev()
            .filter_map(|id| self.find(id))
            .filter(|request| !request.is_pending())
            .collect();
        recent.extend(
            self.processed()
                .into_iter()
                .filter(|request| !self.decided.contains(&request.id)),
        );
        recent.truncate(RECENTLY_PROCESSED_LIMIT);
        recent
    }

    /// Nothing pending and nothing processed.
    pub fn is_empty(&self) -> bool {
        self.pending().is_empty() && self.processed().is_empty()
    }

    pub fn is_processing(&self, request_id: &str) -> bool {
        self.processing.contains(request_id)
    }

    pub fn has_processing(&self) -> bool {
        !self.processing.is_empty()
    }

    pub fn last_failure(&self) -> Option<&FailedDecision> {
        self.last_failure.as_ref()
    }

    /// Validates the request and marks it in flight.
    pub fn begin_decision(
        &mut self,
        request_id: &str,
        outcome: Outcome,
    ) -> Result<DecisionTicket, ApprovalError> {
        let request = self
            .find(request_id)
            .ok_or_else(|| ApprovalError::UnknownRequest(request_id.to_string()))?;
        if !request.is_pending() {
            return Err(ApprovalError::NotPending(request_id.to_string()));
        }
        if !self.processing.insert(request_id.to_string()) {
            return Err(ApprovalError::AlreadyProcessing(request_id.to_string()));
        }
        Ok(DecisionTicket {
            request_id: request_id.to_string(),
            outcome,
        })
    }

    /// Applies a finished decision. Returns whether the status changed.
    pub fn complete_decision(
        &mut self,
        request_id: &str,
        outcome: Outcome,
        result: &DecisionResult,
    ) -> bool {
        self.processing.remove(request_id);
        let applied = match result {
            DecisionResult::Applied => {
                let Some(request) = self.requests.iter_mut().find(|r| r.id == request_id) else {
                    return false;
                };
                request.status = outcome.status();
                self.decided.retain(|id| id != request_id);
                self.decided.push(request_id.to_string());
                if self
                    .last_failure
                    .as_ref()
                    .is_some_and(|failure| failure.request_id == request_id)
                {
                    self.last_failure = None;
                }
                true
            }
            DecisionResult::Failed(error) => {
                self.last_failure = Some(FailedDecision {
                    request_id: request_id.to_string(),
                    outcome,
                    error: error.clone(),
                });
                false
            }
            DecisionResult::Cancelled => false,
        };
        self.clamp_selection();
        applied
    }

    /// Starts the last failed decision again.
    pub fn retry(&mut self) -> Result<DecisionTicket, ApprovalError> {
        let failure = self
            .last_failure
            .clone()
            .ok_or(ApprovalError::NothingToRetry)?;
        let ticket = self.begin_decision(&failure.request_id, failure.outcome)?;
        self.last_failure = None;
        Ok(ticket)
    }

    /// Runs a whole decision inline: begin, wait for the sink, complete.
    pub async fn decide(
        &mut self,
        request_id: &str,
        outcome: Outcome,
        sink: &dyn DecisionSink,
        cancel: &CancellationToken,
    ) -> Result<DecisionResult, ApprovalError> {
        let ticket = self.begin_decision(request_id, outcome)?;
        let result = run_decision(sink, &ticket, cancel).await;
        self.complete_decision(&ticket.request_id, ticket.outcome, &result);
        Ok(result)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_pending(&self) -> Option<&ApprovalRequest> {
        self.pending().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.pending().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.pending().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.pending().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn find(&self, request_id: &str) -> Option<&ApprovalRequest> {
        self.requests.iter().find(|r| r.id == request_id)
    }
}
