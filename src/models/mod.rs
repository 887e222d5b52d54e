//! Dashboard record types
//!
//! Flat records for the four views. Nothing ties them together: a roll
//! number on an alert is not checked against the roster.

pub mod alert;
pub mod approval;
pub mod schedule;
pub mod student;

pub use alert::{AttendanceAlert, Channel, Severity, SeverityCounts};
pub use approval::{ApprovalRequest, ApprovalStatus, Outcome};
pub use schedule::{ClassSession, DaySchedule, SessionType, WeekSummary};
pub use student::{AttendanceTier, Student, StudentStatus};
