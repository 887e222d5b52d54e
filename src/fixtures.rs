//! Fixture dataset and the query interface the pages read from.
//!
//! The built-in dataset is embedded at compile time. Another document in
//! the same JSON shape can be loaded with `--data`. Every record is
//! validated on the way in: dates must be `YYYY-MM-DD`, times `HH:MM`,
//! percentages 0 to 100.

use crate::filter::filter_slice;
use crate::models::{
    ApprovalRequest, ApprovalStatus, AttendanceAlert, ClassSession, DaySchedule, SessionType,
    Severity, Student, StudentStatus,
};
use crate::pages::alerts::AlertFilter;
use crate::pages::students::StudentFilter;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const BUILTIN_DATASET: &str = include_str!("../fixtures/dashboard.json");

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{record}: malformed date in `{field}`: {value:?}")]
    MalformedDate {
        record: String,
        field: &'static str,
        value: String,
    },

    #[error("{record}: malformed time in `{field}`: {value:?}")]
    MalformedTime {
        record: String,
        field: &'static str,
        value: String,
    },

    #[error("{record}: `{field}` must be between 0 and 100, got {value}")]
    PercentageOutOfRange {
        record: String,
        field: &'static str,
        value: u32,
    },
}

/// Where the pages get their records.
pub trait DataSource: Send + Sync {
    fn list_approvals(&self) -> Vec<ApprovalRequest>;

    /// The weekly template. Session content does not depend on the offset;
    /// dates are assigned by the schedule page.
    fn list_schedule(&self, week_offset: i64) -> Vec<DaySchedule>;

    fn list_students(&self, filter: &StudentFilter) -> Vec<Student>;

    fn list_alerts(&self, filter: &AlertFilter) -> Vec<AttendanceAlert>;
}

/// All four record sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub approvals: Vec<ApprovalRequest>,
    pub schedule: Vec<DaySchedule>,
    pub students: Vec<Student>,
    pub alerts: Vec<AttendanceAlert>,
}

impl Dataset {
    /// The dataset compiled into the binary.
    pub fn builtin() -> Result<Self, FixtureError> {
        Self::from_json(BUILTIN_DATASET)
    }

    /// Loads and validates a dataset file.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let buf = std::fs::read_to_string(path)?;
        Self::from_json(&buf)
    }

    /// Loads `path` when given, otherwise the built-in dataset.
    pub fn resolve(path: Option<&Path>) -> Result<Self, FixtureError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Ok(Self {
            approvals: raw
                .approvals
                .into_iter()
                .map(RawApproval::validate)
                .collect::<Result<_, _>>()?,
            schedule: raw
                .schedule
                .into_iter()
                .map(RawDay::validate)
                .collect::<Result<_, _>>()?,
            students: raw
                .students
                .into_iter()
                .map(RawStudent::validate)
                .collect::<Result<_, _>>()?,
            alerts: raw
                .alerts
                .into_iter()
                .map(RawAlert::validate)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl DataSource for Dataset {
    fn list_approvals(&self) -> Vec<ApprovalRequest> {
        self.approvals.clone()
    }

    fn list_schedule(&self, _week_offset: i64) -> Vec<DaySchedule> {
        self.schedule.clone()
    }

    fn list_students(&self, filter: &StudentFilter) -> Vec<Student> {
        filter_slice(&self.students, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    fn list_alerts(&self, filter: &AlertFilter) -> Vec<AttendanceAlert> {
        filter_slice(&self.alerts, filter)
            .into_iter()
            .cloned()
            .collect()
    }
}

fn parse_date(record: &str, field: &'static str, value: String) -> Result<NaiveDate, FixtureError> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| FixtureError::MalformedDate {
        record: record.to_string(),
        field,
        value,
    })
}

fn parse_time(record: &str, field: &'static str, value: String) -> Result<NaiveTime, FixtureError> {
    NaiveTime::parse_from_str(&value, "%H:%M").map_err(|_| FixtureError::MalformedTime {
        record: record.to_string(),
        field,
        value,
    })
}

fn percentage(record: &str, field: &'static str, value: u32) -> Result<u8, FixtureError> {
    u8::try_from(value)
        .ok()
        .filter(|percent| *percent <= 100)
        .ok_or_else(|| FixtureError::PercentageOutOfRange {
            record: record.to_string(),
            field,
            value,
        })
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    approvals: Vec<RawApproval>,
    #[serde(default)]
    schedule: Vec<RawDay>,
    #[serde(default)]
    students: Vec<RawStudent>,
    #[serde(default)]
    alerts: Vec<RawAlert>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApproval {
    id: String,
    name: String,
    roll_no: String,
    department: String,
    year: String,
    request_date: String,
    status: ApprovalStatus,
}

impl RawApproval {
    fn validate(self) -> Result<ApprovalRequest, FixtureError> {
        let record = format!("approval {}", self.id);
        Ok(ApprovalRequest {
            request_date: parse_date(&record, "requestDate", self.request_date)?,
            id: self.id,
            name: self.name,
            roll_no: self.roll_no,
            department: self.department,
            year: self.year,
            status: self.status,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawDay {
    day: String,
    date: String,
    #[serde(default)]
    classes: Vec<RawSession>,
}

impl RawDay {
    fn validate(self) -> Result<DaySchedule, FixtureError> {
        let record = format!("schedule {}", self.day);
        Ok(DaySchedule {
            date: parse_date(&record, "date", self.date)?,
            sessions: self
                .classes
                .into_iter()
                .map(RawSession::validate)
                .collect::<Result<_, _>>()?,
            day: self.day,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawSession {
    id: String,
    subject: String,
    #[serde(rename = "class")]
    class_label: String,
    room: String,
    time: String,
    /// Minutes.
    duration: u32,
    students: u32,
    #[serde(rename = "type")]
    session_type: SessionType,
}

impl RawSession {
    fn validate(self) -> Result<ClassSession, FixtureError> {
        let record = format!("class {}", self.id);
        Ok(ClassSession {
            start: parse_time(&record, "time", self.time)?,
            id: self.id,
            subject: self.subject,
            class_label: self.class_label,
            room: self.room,
            duration_minutes: self.duration,
            students: self.students,
            session_type: self.session_type,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStudent {
    id: String,
    name: String,
    roll_no: String,
    email: String,
    phone: String,
    department: String,
    year: String,
    status: StudentStatus,
    attendance: u32,
    joining_date: String,
}

impl RawStudent {
    fn validate(self) -> Result<Student, FixtureError> {
        let record = format!("student {}", self.id);
        Ok(Student {
            attendance: percentage(&record, "attendance", self.attendance)?,
            joining_date: parse_date(&record, "joiningDate", self.joining_date)?,
            id: self.id,
            name: self.name,
            roll_no: self.roll_no,
            email: self.email,
            phone: self.phone,
            department: self.department,
            year: self.year,
            status: self.status,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAlert {
    id: String,
    student_name: String,
    roll_no: String,
    department: String,
    year: String,
    current_attendance: u32,
    required_attendance: u32,
    classes_attended: u32,
    total_classes: u32,
    last_attended: String,
    alert_level: Severity,
    email: String,
    phone: String,
    #[serde(default)]
    parent_contact: Option<String>,
}

impl RawAlert {
    fn validate(self) -> Result<AttendanceAlert, FixtureError> {
        let record = format!("alert {}", self.id);
        Ok(AttendanceAlert {
            current_attendance: percentage(&record, "currentAttendance", self.current_attendance)?,
            required_attendance: percentage(
                &record,
                "requiredAttendance",
                self.required_attendance,
            )?,
            last_attended: parse_date(&record, "lastAttended", self.last_attended)?,
            id: self.id,
            student_name: self.student_name,
            roll_no: self.roll_no,
            department: self.department,
            year: self.year,
            classes_attended: self.classes_attended,
            total_classes: self.total_classes,
            severity: self.alert_level,
            email: self.email,
            phone: self.phone,
            parent_contact: self.parent_contact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Selection;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_dataset_loads() {
        let dataset = Dataset::builtin().unwrap();
        assert_eq!(dataset.approvals.len(), 5);
        assert_eq!(dataset.schedule.len(), 5);
        assert_eq!(dataset.students.len(), 8);
        assert_eq!(dataset.alerts.len(), 5);

        let monday = &dataset.schedule[0];
        assert_eq!(monday.day, "Monday");
        assert_eq!(monday.sessions[1].time_range(), "11:00 - 13:00");

        let ravi = &dataset.alerts[0];
        assert_eq!(ravi.student_name, "Ravi Mehta");
        assert_eq!(ravi.parent_contact.as_deref(), Some("+91 98765 43210"));
        assert_eq!(dataset.alerts[1].parent_contact, None);
    }

    #[test]
    fn malformed_date_names_the_record() {
        let json = r#"{"approvals": [{"id": "9", "name": "A", "rollNo": "R", "department": "D",
            "year": "1st Year", "requestDate": "15/01/2024", "status": "pending"}]}"#;
        let err = Dataset::from_json(json).unwrap_err();
        match err {
            FixtureError::MalformedDate { record, field, value } => {
                assert_eq!(record, "approval 9");
                assert_eq!(field, "requestDate");
                assert_eq!(value, "15/01/2024");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_time_is_rejected() {
        let json = r#"{"schedule": [{"day": "Monday", "date": "2024-01-15", "classes": [
            {"id": "1", "subject": "S", "class": "C", "room": "R", "time": "9am",
             "duration": 60, "students": 10, "type": "lecture"}]}]}"#;
        assert!(matches!(
            Dataset::from_json(json),
            Err(FixtureError::MalformedTime { .. })
        ));
    }

    #[test]
    fn percentage_over_one_hundred_is_rejected() {
        let json = r#"{"students": [{"id": "1", "name": "N", "rollNo": "R", "email": "e",
            "phone": "p", "department": "D", "year": "Y", "status": "active",
            "attendance": 140, "joiningDate": "2021-08-15"}]}"#;
        let err = Dataset::from_json(json).unwrap_err();
        assert!(err.to_string().contains("student 1"));
        assert!(matches!(err, FixtureError::PercentageOutOfRange { value: 140, .. }));
    }

    #[test]
    fn unknown_status_is_a_json_error() {
        let json = r#"{"approvals": [{"id": "1", "name": "A", "rollNo": "R", "department": "D",
            "year": "Y", "requestDate": "2024-01-15", "status": "archived"}]}"#;
        assert!(matches!(Dataset::from_json(json), Err(FixtureError::Json(_))));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"students\": []}}").unwrap();
        let dataset = Dataset::load(file.path()).unwrap();
        assert!(dataset.students.is_empty());
        assert!(dataset.approvals.is_empty());

        let missing = Dataset::load(Path::new("/nonexistent/upasthiti.json"));
        assert!(matches!(missing, Err(FixtureError::Io(_))));
    }

    #[test]
    fn data_source_applies_filters() {
        let dataset = Dataset::builtin().unwrap();
        let filter = StudentFilter {
            department: Selection::Only("Electronics".to_string()),
            ..StudentFilter::default()
        };
        let names: Vec<String> = dataset
            .list_students(&filter)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Priya Patel", "Kavya Nair"]);

        let alerts = dataset.list_alerts(&AlertFilter {
            severity: Selection::Only(Severity::Warning),
            ..AlertFilter::default()
        });
        assert_eq!(alerts.len(), 2);
        assert_eq!(dataset.list_schedule(3), dataset.list_schedule(-7));
    }
}
