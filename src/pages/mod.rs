//! Page controllers, one per dashboard section.

pub mod alerts;
pub mod approvals;
pub mod schedule;
pub mod students;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Today's date on the local wall clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Section {
    #[default]
    Approvals,
    Schedule,
    Students,
    Alerts,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Approvals,
        Section::Schedule,
        Section::Students,
        Section::Alerts,
    ];

    /// Sidebar label.
    pub fn title(self) -> &'static str {
        match self {
            Section::Approvals => "Pending Approvals",
            Section::Schedule => "Class Schedule",
            Section::Students => "Students",
            Section::Alerts => "Attendance Alerts",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Section::Approvals => 0,
            Section::Schedule => 1,
            Section::Students => 2,
            Section::Alerts => 3,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// `1` to `4` select a section directly.
    pub fn from_digit(c: char) -> Option<Self> {
        let index = c.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }
}
