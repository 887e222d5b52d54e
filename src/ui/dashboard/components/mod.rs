//! Dashboard component modules
//!
//! Shell components (navbar, sidebar, footer, activity log) and one renderer per page

pub mod alerts;
pub mod approvals;
pub mod footer;
pub mod header;
pub mod logs;
pub mod schedule;
pub mod sidebar;
pub mod students;
