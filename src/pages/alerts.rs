//! Attendance alerts and reminder requests.

use crate::consts::cli_consts::filters::DEPARTMENTS;
use crate::filter::{FilteredView, RecordFilter, Selection};
use crate::models::{AttendanceAlert, Channel, Severity, SeverityCounts};
use crate::services::ReminderRequest;
use crate::services::error::DispatchError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub severity: Selection<Severity>,
    pub department: Selection<String>,
}

impl RecordFilter<AttendanceAlert> for AlertFilter {
    fn matches(&self, alert: &AttendanceAlert) -> bool {
        self.severity.matches(&alert.severity) && self.department.matches(&alert.department)
    }
}

#[derive(Debug, Clone)]
pub struct AlertsController {
    alerts: FilteredView<AttendanceAlert, AlertFilter>,
    selected: usize,
}

impl AlertsController {
    pub fn new(alerts: Vec<AttendanceAlert>) -> Self {
        Self {
            alerts: FilteredView::new(alerts, AlertFilter::default()),
            selected: 0,
        }
    }

    pub fn filter(&self) -> &AlertFilter {
        self.alerts.filter()
    }

    pub fn visible(&self) -> impl Iterator<Item = &AttendanceAlert> {
        self.alerts.visible()
    }

    pub fn visible_len(&self) -> usize {
        self.alerts.visible_len()
    }

    /// Counts over the filtered alerts.
    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts::tally(self.alerts.visible())
    }

    pub fn set_filter(&mut self, filter: AlertFilter) -> bool {
        let changed = self.alerts.set_filter(filter);
        self.clamp_selection();
        changed
    }

    pub fn set_severity(&mut self, severity: Selection<Severity>) -> bool {
        let changed = self.alerts.update_filter(|f| f.severity = severity);
        self.clamp_selection();
        changed
    }

    pub fn set_department(&mut self, department: Selection<String>) -> bool {
        let changed = self.alerts.update_filter(|f| f.department = department);
        self.clamp_selection();
        changed
    }

    pub fn cycle_severity(&mut self) -> bool {
        let next = self.filter().severity.cycle(&Severity::ALL);
        self.set_severity(next)
    }

    pub fn cycle_department(&mut self) -> bool {
        let options: Vec<String> = DEPARTMENTS.iter().map(|d| d.to_string()).collect();
        let next = self.filter().department.cycle(&options);
        self.set_department(next)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_alert(&self) -> Option<&AttendanceAlert> {
        self.alerts.visible_at(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.visible_len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Builds the reminder for an alert. The alert itself is not changed.
    pub fn notify(&self, alert_id: &str, channel: Channel) -> Result<ReminderRequest, DispatchError> {
        let alert = self
            .alerts
            .all()
            .iter()
            .find(|alert| alert.id == alert_id)
            .ok_or_else(|| DispatchError::UnknownAlert(alert_id.to_string()))?;
        let contact = alert
            .contact_for(channel)
            .ok_or_else(|| DispatchError::NoParentContact(alert_id.to_string()))?;
        Ok(ReminderRequest {
            alert_id: alert.id.clone(),
            channel,
            student_name: alert.student_name.clone(),
            contact: contact.to_string(),
        })
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.visible_len().saturating_sub(1));
    }
}
