//! Student join requests awaiting a decision from faculty.

use chrono::NaiveDate;
use serde::Deserialize;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Declined,
}

/// The two ways a pending request can be settled.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Outcome {
    Approved,
    Declined,
}

impl Outcome {
    /// Status a request takes once this outcome is applied.
    pub fn status(self) -> ApprovalStatus {
        match self {
            Outcome::Approved => ApprovalStatus::Approved,
            Outcome::Declined => ApprovalStatus::Declined,
        }
    }

    /// Verb used in activity messages ("approve", "decline").
    pub fn verb(self) -> &'static str {
        match self {
            Outcome::Approved => "approve",
            Outcome::Declined => "decline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalRequest {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub department: String,
    pub year: String,
    pub request_date: NaiveDate,
    pub status: ApprovalStatus,
}

impl ApprovalRequest {
    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }
}
