//! Weekly class schedule records.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Deserialize;
use std::collections::HashSet;

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
pub enum SessionType {
    Lecture,
    Lab,
    Tutorial,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSession {
    pub id: String,
    pub subject: String,
    /// Class section, e.g. "CS-3A".
    pub class_label: String,
    pub room: String,
    pub start: NaiveTime,
    pub duration_minutes: u32,
    /// Enrolled students.
    pub students: u32,
    pub session_type: SessionType,
}

impl ClassSession {
    /// Start plus duration. Wraps past midnight rather than failing.
    pub fn end_time(&self) -> NaiveTime {
        let (end, _) = self
            .start
            .overflowing_add_signed(Duration::minutes(i64::from(self.duration_minutes)));
        end
    }

    /// Rendered as "09:00 - 10:00".
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%H:%M"),
            self.end_time().format("%H:%M")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub day: String,
    pub date: NaiveDate,
    pub sessions: Vec<ClassSession>,
}

/// Totals over the displayed week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekSummary {
    pub total_sessions: usize,
    pub total_students: u64,
    pub distinct_rooms: usize,
}

impl WeekSummary {
    pub fn from_days(days: &[DaySchedule]) -> Self {
        let sessions = days.iter().flat_map(|day| day.sessions.iter());
        let mut rooms = HashSet::new();
        let mut summary = WeekSummary::default();
        for session in sessions {
            summary.total_sessions += 1;
            summary.total_students += u64::from(session.students);
            rooms.insert(session.room.as_str());
        }
        summary.distinct_rooms = rooms.len();
        summary
    }
}
