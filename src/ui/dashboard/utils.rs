//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::Source;
use crate::models::{ApprovalStatus, AttendanceTier, SessionType, Severity, StudentStatus};
use ratatui::prelude::{Color, Style};

/// Get a ratatui color for the part of the dashboard an event came from
pub fn get_source_color(source: &Source) -> Color {
    match source {
        Source::Approvals => Color::Cyan,
        Source::Alerts => Color::Yellow,
        Source::Dashboard => Color::Gray,
    }
}

/// Filter selectors are highlighted while any of them narrows the list.
pub fn selector_style(all_sentinels: bool) -> Style {
    if all_sentinels {
        Style::default().fg(Color::LightBlue)
    } else {
        Style::default().fg(Color::Yellow)
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Moderate => Color::LightBlue,
    }
}

pub fn tier_color(tier: AttendanceTier) -> Color {
    match tier {
        AttendanceTier::High => Color::Green,
        AttendanceTier::Mid => Color::Yellow,
        AttendanceTier::Low => Color::Red,
    }
}

pub fn student_status_color(status: StudentStatus) -> Color {
    match status {
        StudentStatus::Active => Color::Green,
        StudentStatus::Inactive => Color::Red,
        StudentStatus::Graduated => Color::LightBlue,
    }
}

pub fn approval_status_color(status: ApprovalStatus) -> Color {
    match status {
        ApprovalStatus::Pending => Color::Yellow,
        ApprovalStatus::Approved => Color::Green,
        ApprovalStatus::Declined => Color::Red,
    }
}

pub fn session_type_color(session_type: SessionType) -> Color {
    match session_type {
        SessionType::Lecture => Color::LightBlue,
        SessionType::Lab => Color::Green,
        SessionType::Tutorial => Color::LightMagenta,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Expects "YYYY-MM-DD HH:MM:SS", keeps "MM-DD HH:MM"
    let mut parts = timestamp.split(' ');
    let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) else {
        return timestamp.to_string();
    };
    match (date_part.get(5..10), time_part.get(0..5)) {
        (Some(month_day), Some(hour_min)) => format!("{} {}", month_day, hour_min),
        _ => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp_keeps_month_day_and_minutes() {
        assert_eq!(format_compact_timestamp("2024-01-15 09:41:07"), "01-15 09:41");
        assert_eq!(format_compact_timestamp("garbled"), "garbled");
    }
}
