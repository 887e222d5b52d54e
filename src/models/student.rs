//! Student roster records.

use crate::consts::cli_consts::attendance;
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
pub enum StudentStatus {
    Active,
    Inactive,
    Graduated,
}

impl StudentStatus {
    pub const ALL: [StudentStatus; 3] = [
        StudentStatus::Active,
        StudentStatus::Inactive,
        StudentStatus::Graduated,
    ];
}

/// Display emphasis for an attendance percentage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum AttendanceTier {
    High,
    Mid,
    Low,
}

impl AttendanceTier {
    pub fn for_percentage(percent: u8) -> Self {
        if percent >= attendance::HIGH_TIER_MIN {
            AttendanceTier::High
        } else if percent >= attendance::MID_TIER_MIN {
            AttendanceTier::Mid
        } else {
            AttendanceTier::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub year: String,
    pub status: StudentStatus,
    /// Attendance percentage, 0 to 100.
    pub attendance: u8,
    pub joining_date: NaiveDate,
}

impl Student {
    pub fn attendance_tier(&self) -> AttendanceTier {
        AttendanceTier::for_percentage(self.attendance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(AttendanceTier::for_percentage(100), AttendanceTier::High);
        assert_eq!(AttendanceTier::for_percentage(90), AttendanceTier::High);
        assert_eq!(AttendanceTier::for_percentage(89), AttendanceTier::Mid);
        assert_eq!(AttendanceTier::for_percentage(75), AttendanceTier::Mid);
        assert_eq!(AttendanceTier::for_percentage(74), AttendanceTier::Low);
        assert_eq!(AttendanceTier::for_percentage(0), AttendanceTier::Low);
    }
}
