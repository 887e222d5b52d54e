//! Attendance alerts for students below the required percentage.

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
pub enum Severity {
    Critical,
    Warning,
    Moderate,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Warning, Severity::Moderate];

    /// Capitalised badge label.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Moderate => "Moderate",
        }
    }
}

/// Who a reminder is addressed to.
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
pub enum Channel {
    Student,
    Parent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceAlert {
    pub id: String,
    pub student_name: String,
    pub roll_no: String,
    pub department: String,
    pub year: String,
    pub current_attendance: u8,
    pub required_attendance: u8,
    pub classes_attended: u32,
    pub total_classes: u32,
    pub last_attended: NaiveDate,
    pub severity: Severity,
    pub email: String,
    pub phone: String,
    pub parent_contact: Option<String>,
}

impl AttendanceAlert {
    /// `ceil(required * total / 100) - attended`. Negative once the
    /// student already meets the requirement.
    pub fn classes_still_needed(&self) -> i64 {
        let required = u64::from(self.required_attendance) * u64::from(self.total_classes);
        let threshold = required.div_ceil(100);
        threshold as i64 - i64::from(self.classes_attended)
    }

    /// The "need to attend" figure, only when there is something left to attend.
    pub fn classes_needed_display(&self) -> Option<u64> {
        let needed = self.classes_still_needed();
        if needed > 0 { Some(needed as u64) } else { None }
    }

    /// Whole days between the last attended date and `today`.
    pub fn days_since_last_attended(&self, today: NaiveDate) -> i64 {
        (today - self.last_attended).num_days()
    }

    /// Contact the reminder goes to on the given channel, if any.
    pub fn contact_for(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Student => Some(self.email.as_str()),
            Channel::Parent => self.parent_contact.as_deref(),
        }
    }
}

/// Per-severity counts over a set of alerts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: usize,
    pub warning: usize,
    pub moderate: usize,
}

impl SeverityCounts {
    pub fn tally<'a>(alerts: impl IntoIterator<Item = &'a AttendanceAlert>) -> Self {
        let mut counts = SeverityCounts::default();
        for alert in alerts {
            match alert.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Moderate => counts.moderate += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.critical + self.warning + self.moderate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(current: u8, attended: u32, total: u32) -> AttendanceAlert {
        AttendanceAlert {
            id: "1".to_string(),
            student_name: "Ravi Mehta".to_string(),
            roll_no: "ME2022056".to_string(),
            department: "Mechanical".to_string(),
            year: "2nd Year".to_string(),
            current_attendance: current,
            required_attendance: 75,
            classes_attended: attended,
            total_classes: total,
            last_attended: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            severity: Severity::Critical,
            email: "ravi.mehta@college.edu".to_string(),
            phone: "+91 32109 87654".to_string(),
            parent_contact: Some("+91 98765 43210".to_string()),
        }
    }

    #[test]
    fn classes_needed_for_critical_student() {
        let ravi = alert(45, 18, 40);
        assert_eq!(ravi.classes_still_needed(), 12);
        assert_eq!(ravi.classes_needed_display(), Some(12));
    }

    #[test]
    fn classes_needed_rounds_threshold_up() {
        // 75% of 41 is 30.75, so 31 classes are required.
        let student = alert(70, 29, 41);
        assert_eq!(student.classes_still_needed(), 2);
    }

    #[test]
    fn classes_needed_hidden_once_requirement_met() {
        let on_track = alert(75, 30, 40);
        assert_eq!(on_track.classes_still_needed(), 0);
        assert_eq!(on_track.classes_needed_display(), None);

        let ahead = alert(90, 36, 40);
        assert!(ahead.classes_still_needed() < 0);
        assert_eq!(ahead.classes_needed_display(), None);
    }

    #[test]
    fn days_since_last_attended_counts_whole_days() {
        let ravi = alert(45, 18, 40);
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(ravi.days_since_last_attended(today), 10);
        assert_eq!(ravi.days_since_last_attended(ravi.last_attended), 0);
    }

    #[test]
    fn parent_contact_is_optional() {
        let mut student = alert(45, 18, 40);
        assert_eq!(student.contact_for(Channel::Parent), Some("+91 98765 43210"));
        student.parent_contact = None;
        assert_eq!(student.contact_for(Channel::Parent), None);
        assert_eq!(student.contact_for(Channel::Student), Some("ravi.mehta@college.edu"));
    }

    #[test]
    fn tally_counts_each_severity() {
        let mut warning = alert(68, 27, 40);
        warning.severity = Severity::Warning;
        let alerts = vec![alert(45, 18, 40), warning, alert(58, 23, 40)];
        let counts = SeverityCounts::tally(&alerts);
        assert_eq!(counts.critical, 2);
        assert_eq!(counts.warning, 1);
        assert_eq!(counts.moderate, 0);
        assert_eq!(counts.total(), 3);
    }
}
