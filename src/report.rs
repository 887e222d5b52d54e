//! Plain-text renderings of each page for the headless commands.

use std::fmt::{self, Write};

use chrono::NaiveDate;
use thiserror::Error;

use crate::pages::alerts::AlertsController;
use crate::pages::approvals::ApprovalsController;
use crate::pages::schedule::{ScheduleController, ScheduleError};
use crate::pages::students::{StudentsController, ViewMode};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Failed to format report: {0}")]
    Format(#[from] fmt::Error),
}

pub fn render_approvals(approvals: &ApprovalsController) -> Result<String, ReportError> {
    let mut output = String::new();
    write_approvals(&mut output, approvals)?;
    Ok(output)
}

pub fn render_schedule(
    schedule: &ScheduleController,
    today: NaiveDate,
) -> Result<String, ReportError> {
    let mut output = String::new();
    write_schedule(&mut output, schedule, today)?;
    Ok(output)
}

pub fn render_students(students: &StudentsController) -> Result<String, ReportError> {
    let mut output = String::new();
    write_students(&mut output, students)?;
    Ok(output)
}

pub fn render_alerts(alerts: &AlertsController, today: NaiveDate) -> Result<String, ReportError> {
    let mut output = String::new();
    write_alerts(&mut output, alerts, today)?;
    Ok(output)
}

fn write_approvals(out: &mut String, approvals: &ApprovalsController) -> fmt::Result {
    writeln!(out, "# Pending Approvals")?;

    if approvals.is_empty() {
        writeln!(out, "No pending approvals")?;
        return writeln!(out, "All student requests have been processed.");
    }

    let pending = approvals.pending();
    writeln!(out)?;
    writeln!(out, "## Pending Requests ({})", pending.len())?;
    if pending.is_empty() {
        writeln!(out, "All student requests have been processed.")?;
    }
    for request in pending {
        writeln!(
            out,
            "- [{}] {} ({}) {}, {}. Requested {}",
            request.id,
            request.name,
            request.roll_no,
            request.department,
            request.year,
            request.request_date
        )?;
    }

    writeln!(out)?;
    writeln!(out, "## Recently Processed ({})", approvals.processed().len())?;
    for request in approvals.recently_processed() {
        writeln!(
            out,
            "- [{}] {} ({}) {}",
            request.id, request.name, request.roll_no, request.status
        )?;
    }
    Ok(())
}

fn write_schedule(
    out: &mut String,
    schedule: &ScheduleController,
    today: NaiveDate,
) -> Result<(), ReportError> {
    let week = schedule.week(today)?;
    let summary = schedule.summary();

    writeln!(out, "# Class Schedule")?;
    writeln!(out, "{}", schedule.heading(today)?)?;
    writeln!(
        out,
        "Total classes: {} | Total students: {} | Rooms: {}",
        summary.total_sessions, summary.total_students, summary.distinct_rooms
    )?;

    for day in &week {
        writeln!(out)?;
        writeln!(out, "## {}, {}", day.day, day.date.format("%b %-d"))?;
        if day.sessions.is_empty() {
            writeln!(out, "No classes scheduled")?;
        }
        for session in &day.sessions {
            writeln!(
                out,
                "- {}  {} ({}) {}, {} students [{}]",
                session.time_range(),
                session.subject,
                session.class_label,
                session.room,
                session.students,
                session.session_type
            )?;
        }
    }
    Ok(())
}

fn write_students(out: &mut String, students: &StudentsController) -> fmt::Result {
    writeln!(out, "# Students")?;
    writeln!(out, "{}", students.summary_line())?;
    writeln!(out)?;

    if students.visible_len() == 0 {
        return writeln!(out, "No students found");
    }

    match students.view_mode() {
        ViewMode::Table => {
            writeln!(
                out,
                "{:<16} {:<10} {:<17} {:<9} {:>10}  {:<9} Contact",
                "Student", "Roll No", "Department", "Year", "Attendance", "Status"
            )?;
            for student in students.visible() {
                writeln!(
                    out,
                    "{:<16} {:<10} {:<17} {:<9} {:>9}%  {:<9} {}",
                    student.name,
                    student.roll_no,
                    student.department,
                    student.year,
                    student.attendance,
                    student.status,
                    student.email
                )?;
            }
        }
        ViewMode::Grid => {
            for student in students.visible() {
                writeln!(out, "{} ({})", student.name, student.roll_no)?;
                writeln!(
                    out,
                    "  {} | Attendance {}% ({})",
                    student.status,
                    student.attendance,
                    student.attendance_tier()
                )?;
                writeln!(out, "  {} | {}", student.email, student.phone)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn write_alerts(out: &mut String, alerts: &AlertsController, today: NaiveDate) -> fmt::Result {
    let counts = alerts.severity_counts();
    writeln!(out, "# Attendance Alerts")?;
    writeln!(
        out,
        "Critical: {} | Warning: {} | Moderate: {}",
        counts.critical, counts.warning, counts.moderate
    )?;

    if alerts.visible_len() == 0 {
        writeln!(out)?;
        return writeln!(out, "No attendance alerts");
    }

    for alert in alerts.visible() {
        writeln!(out)?;
        writeln!(
            out,
            "- [{}] {} ({}) {}, {} [{}]",
            alert.id,
            alert.student_name,
            alert.roll_no,
            alert.department,
            alert.year,
            alert.severity
        )?;
        writeln!(
            out,
            "    Attendance {}% of {}% required, {}/{} classes",
            alert.current_attendance,
            alert.required_attendance,
            alert.classes_attended,
            alert.total_classes
        )?;
        writeln!(
            out,
            "    Last attended {} ({} days ago)",
            alert.last_attended,
            alert.days_since_last_attended(today)
        )?;
        if let Some(needed) = alert.classes_needed_display() {
            writeln!(out, "    Need to attend: {} more", needed)?;
        }
        write!(out, "    Contact: {} | {}", alert.email, alert.phone)?;
        if let Some(parent) = &alert.parent_contact {
            write!(out, " | parent {}", parent)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DecisionResult;
    use crate::filter::Selection;
    use crate::fixtures::Dataset;
    use crate::models::{Outcome, Severity, StudentStatus};

    fn dataset() -> Dataset {
        Dataset::builtin().unwrap()
    }

    #[test]
    fn approvals_report_lists_both_sections() {
        let mut approvals = ApprovalsController::new(dataset().approvals);
        approvals.begin_decision("2", Outcome::Declined).unwrap();
        approvals.complete_decision("2", Outcome::Declined, &DecisionResult::Applied);

        let report = render_approvals(&approvals).unwrap();
        assert!(report.contains("## Pending Requests (4)"));
        assert!(report.contains("## Recently Processed (1)"));
        assert!(report.contains("- [2] Priya Patel (EC2022045) declined"));
        assert!(report.contains("Requested 2024-01-15"));
    }

    #[test]
    fn approvals_report_empty_state() {
        let report = render_approvals(&ApprovalsController::new(Vec::new())).unwrap();
        assert!(report.contains("No pending approvals"));
        assert!(report.contains("All student requests have been processed."));
    }

    #[test]
    fn schedule_report_has_heading_and_totals() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
        let mut template = dataset().schedule;
        template[4].sessions.clear();
        let schedule = ScheduleController::new(template);

        let report = render_schedule(&schedule, today).unwrap();
        assert!(report.contains("Week of January 15, 2024"));
        assert!(report.contains("Total classes: 9 | Total students: 292 | Rooms: 9"));
        assert!(report.contains("- 11:00 - 13:00  Database Systems (CS-3B) Lab 201, 30 students [lab]"));
        assert!(report.contains("## Friday, Jan 19\nNo classes scheduled"));
    }

    #[test]
    fn students_report_switches_between_views() {
        let mut students = StudentsController::new(dataset().students);
        students.set_status(Selection::Only(StudentStatus::Graduated));

        let table = render_students(&students).unwrap();
        assert!(table.contains("Showing 1 of 8 students"));
        assert!(table.contains("Roll No"));
        assert!(table.contains("anita.desai@college.edu"));

        students.toggle_view_mode();
        let grid = render_students(&students).unwrap();
        assert!(grid.contains("Anita Desai (CS2020089)"));
        assert!(grid.contains("graduated | Attendance 89% (Mid)"));

        students.set_search("nobody");
        assert!(render_students(&students).unwrap().contains("No students found"));
    }

    #[test]
    fn alerts_report_shows_classes_needed() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let mut alerts = AlertsController::new(dataset().alerts);
        let report = render_alerts(&alerts, today).unwrap();
        assert!(report.contains("Critical: 2 | Warning: 2 | Moderate: 1"));
        assert!(report.contains("Need to attend: 12 more"));
        assert!(report.contains("Last attended 2024-01-10 (10 days ago)"));
        assert!(report.contains("| parent +91 98765 43210"));

        alerts.set_severity(Selection::Only(Severity::Moderate));
        alerts.set_department(Selection::Only("Mechanical".to_string()));
        let empty = render_alerts(&alerts, today).unwrap();
        assert!(empty.contains("Critical: 0 | Warning: 0 | Moderate: 0"));
        assert!(empty.contains("No attendance alerts"));
    }

    #[test]
    fn schedule_report_propagates_date_errors() {
        let mut schedule = ScheduleController::new(dataset().schedule);
        schedule.set_week_offset(i64::MAX);
        let today = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
        assert!(matches!(
            render_schedule(&schedule, today),
            Err(ReportError::Schedule(ScheduleError::DateOutOfRange { .. }))
        ));
    }
}
