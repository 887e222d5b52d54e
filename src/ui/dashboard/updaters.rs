//! Dashboard state update logic
//!
//! Applies worker events and key presses to the router and the mounted page.

use super::state::{ActivePage, DashboardState};

use crate::error_classifier::ErrorClassifier;
use crate::events::{Event as WorkerEvent, EventType, Payload};
use crate::models::{Channel, Outcome};
use crate::pages::Section;
use crate::pages::approvals::{ApprovalError, DecisionTicket};
use crate::workers::decision::spawn_decision;
use crate::workers::reminder::{failure_event, spawn_reminder};

use crossterm::event::{KeyCode, KeyEvent};
use log::debug;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

impl DashboardState {
    /// Process queued events and advance the animation tick.
    pub fn update(&mut self) {
        self.tick += 1;

        while let Some(event) = self.pending_events.pop_front() {
            self.process_event(&event);
            self.add_to_activity_log(event);
        }
    }

    fn process_event(&mut self, event: &WorkerEvent) {
        let Some(Payload::DecisionSettled {
            generation,
            request_id,
            outcome,
            result,
        }) = &event.payload
        else {
            return;
        };
        if *generation != self.generation {
            debug!(
                "dropping decision for request {} from page generation {}",
                request_id, generation
            );
            return;
        }
        if let ActivePage::Approvals(approvals) = &mut self.page {
            approvals.complete_decision(request_id, *outcome, result);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if self.search_active {
            self.handle_search_key(key.code);
            return KeyAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('m') => {
                self.toggle_sidebar();
                return KeyAction::Continue;
            }
            KeyCode::Tab => {
                self.switch_section(self.active_section().next());
                return KeyAction::Continue;
            }
            KeyCode::BackTab => {
                self.switch_section(self.active_section().previous());
                return KeyAction::Continue;
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(section) = Section::from_digit(c) {
                    self.switch_section(section);
                }
                return KeyAction::Continue;
            }
            _ => {}
        }

        match self.active_section() {
            Section::Approvals => self.handle_approvals_key(key.code),
            Section::Schedule => self.handle_schedule_key(key.code),
            Section::Students => self.handle_students_key(key.code),
            Section::Alerts => self.handle_alerts_key(key.code),
        }
        KeyAction::Continue
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        let ActivePage::Students(students) = &mut self.page else {
            self.search_active = false;
            return;
        };
        match code {
            KeyCode::Enter | KeyCode::Esc => self.search_active = false,
            KeyCode::Backspace => {
                students.pop_search_char();
            }
            KeyCode::Char(c) => {
                students.push_search_char(c);
            }
            _ => {}
        }
    }

    fn handle_approvals_key(&mut self, code: KeyCode) {
        let ActivePage::Approvals(approvals) = &mut self.page else {
            return;
        };
        let started = match code {
            KeyCode::Up => {
                approvals.select_previous();
                return;
            }
            KeyCode::Down => {
                approvals.select_next();
                return;
            }
            KeyCode::Char('a') | KeyCode::Char('d') => {
                let outcome = if code == KeyCode::Char('a') {
                    Outcome::Approved
                } else {
                    Outcome::Declined
                };
                let Some(request_id) = approvals.selected_pending().map(|r| r.id.clone()) else {
                    return;
                };
                approvals.begin_decision(&request_id, outcome)
            }
            KeyCode::Char('r') => approvals.retry(),
            _ => return,
        };
        match started {
            Ok(ticket) => self.start_decision(ticket),
            Err(e) => self.log_approval_error(&e),
        }
    }

    fn start_decision(&mut self, ticket: DecisionTicket) {
        spawn_decision(
            ticket,
            self.generation,
            self.services().decisions.clone(),
            self.event_sender().clone(),
            self.page_token().clone(),
        );
    }

    fn log_approval_error(&mut self, error: &ApprovalError) {
        let level = ErrorClassifier::new().classify_approval_error(error);
        self.add_to_activity_log(WorkerEvent::approvals_with_level(
            error.to_string(),
            EventType::Error,
            level,
        ));
    }

    fn handle_schedule_key(&mut self, code: KeyCode) {
        let ActivePage::Schedule(schedule) = &mut self.page else {
            return;
        };
        match code {
            KeyCode::Left | KeyCode::Char('p') => schedule.previous_week(),
            KeyCode::Right | KeyCode::Char('n') => schedule.next_week(),
            KeyCode::Char('c') => schedule.reset_to_current_week(),
            _ => {}
        }
    }

    fn handle_students_key(&mut self, code: KeyCode) {
        let ActivePage::Students(students) = &mut self.page else {
            return;
        };
        match code {
            KeyCode::Char('/') => self.search_active = true,
            KeyCode::Char('D') => {
                students.cycle_department();
            }
            KeyCode::Char('Y') => {
                students.cycle_year();
            }
            KeyCode::Char('S') => {
                students.cycle_status();
            }
            KeyCode::Char('v') => students.toggle_view_mode(),
            KeyCode::Char('x') => {
                students.clear_filters();
            }
            _ => {}
        }
    }

    fn handle_alerts_key(&mut self, code: KeyCode) {
        let ActivePage::Alerts(alerts) = &mut self.page else {
            return;
        };
        let channel = match code {
            KeyCode::Up => {
                alerts.select_previous();
                return;
            }
            KeyCode::Down => {
                alerts.select_next();
                return;
            }
            KeyCode::Char('l') => {
                alerts.cycle_severity();
                return;
            }
            KeyCode::Char('D') => {
                alerts.cycle_department();
                return;
            }
            KeyCode::Char('e') => Channel::Student,
            KeyCode::Char('p') => Channel::Parent,
            _ => return,
        };
        let Some(alert_id) = alerts.selected_alert().map(|a| a.id.clone()) else {
            return;
        };
        match alerts.notify(&alert_id, channel) {
            Ok(reminder) => {
                spawn_reminder(
                    reminder,
                    self.services().notifications.clone(),
                    self.event_sender().clone(),
                    self.page_token().clone(),
                );
            }
            Err(e) => self.add_to_activity_log(failure_event(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DecisionResult;
    use crate::fixtures::Dataset;
    use crate::logging::LogLevel;
    use crate::services::Services;
    use crate::ui::app::UIConfig;
    use crate::workers::core::EventSender;
    use crossterm::event::KeyModifiers;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dashboard(section: Section) -> (DashboardState, mpsc::Receiver<WorkerEvent>) {
        let (sender, receiver) = mpsc::channel(16);
        let config = UIConfig {
            with_background_color: false,
            default_section: section,
            splash_duration: Duration::ZERO,
            clock: crate::pages::local_today,
        };
        let state = DashboardState::new(
            Arc::new(Dataset::builtin().unwrap()),
            Services::simulated(Duration::from_secs(1)),
            EventSender::new(sender),
            CancellationToken::new(),
            &config,
        );
        (state, receiver)
    }

    fn approvals(state: &DashboardState) -> &crate::pages::approvals::ApprovalsController {
        match &state.page {
            ActivePage::Approvals(approvals) => approvals,
            other => panic!("expected approvals page, got {:?}", other.section()),
        }
    }

    async fn next_settled(receiver: &mut mpsc::Receiver<WorkerEvent>) -> WorkerEvent {
        loop {
            let event = receiver.recv().await.unwrap();
            if event.payload.is_some() {
                return event;
            }
        }
    }

    #[tokio::test]
    async fn section_keys_remount_pages() {
        let (mut state, _receiver) = dashboard(Section::Approvals);
        let first_token = state.page_token().clone();

        state.handle_key(key(KeyCode::Char('3')));
        assert_eq!(state.active_section(), Section::Students);
        assert_eq!(state.generation, 1);
        assert!(first_token.is_cancelled());
        assert!(!state.page_token().is_cancelled());

        // Same section again is not a remount
        state.handle_key(key(KeyCode::Char('3')));
        assert_eq!(state.generation, 1);

        state.handle_key(key(KeyCode::Tab));
        assert_eq!(state.active_section(), Section::Alerts);
        state.handle_key(key(KeyCode::BackTab));
        state.handle_key(key(KeyCode::BackTab));
        assert_eq!(state.active_section(), Section::Schedule);
        assert_eq!(state.generation, 4);
    }

    #[tokio::test]
    async fn sidebar_toggles_and_q_quits() {
        let (mut state, _receiver) = dashboard(Section::Schedule);
        assert!(!state.sidebar_open);
        assert_eq!(state.handle_key(key(KeyCode::Char('m'))), KeyAction::Continue);
        assert!(state.sidebar_open);
        assert_eq!(state.handle_key(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(state.handle_key(key(KeyCode::Esc)), KeyAction::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn approve_key_runs_decision_and_applies_result() {
        let (mut state, mut receiver) = dashboard(Section::Approvals);
        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Char('a')));
        assert!(approvals(&state).is_processing("2"));

        let event = next_settled(&mut receiver).await;
        state.add_event(event);
        state.update();

        let page = approvals(&state);
        assert!(!page.has_processing());
        assert_eq!(page.pending().len(), 4);
        assert_eq!(page.recently_processed()[0].id, "2");
        assert!(state.activity_logs.iter().any(|e| e.msg == "Request 2 approved"));
    }

    #[tokio::test]
    async fn repeated_key_while_in_flight_is_logged_not_sent() {
        let (mut state, _receiver) = dashboard(Section::Approvals);
        state.handle_key(key(KeyCode::Char('d')));
        state.handle_key(key(KeyCode::Char('d')));
        let last = state.activity_logs.back().unwrap();
        assert_eq!(last.msg, "Request 1 is already being processed");
        assert_eq!(last.log_level, LogLevel::Debug);
    }

    #[tokio::test]
    async fn results_from_an_old_mount_are_ignored() {
        let (mut state, _receiver) = dashboard(Section::Approvals);
        state.handle_key(key(KeyCode::Char('2')));
        state.handle_key(key(KeyCode::Char('1')));
        assert_eq!(state.generation, 2);

        state.add_event(WorkerEvent::decision_settled(
            0,
            "1",
            Outcome::Approved,
            DecisionResult::Applied,
        ));
        state.update();
        assert_eq!(approvals(&state).pending().len(), 5);

        state.add_event(WorkerEvent::decision_settled(
            2,
            "1",
            Outcome::Approved,
            DecisionResult::Applied,
        ));
        state.update();
        assert_eq!(approvals(&state).pending().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_the_page_cancels_in_flight_decision() {
        let (mut state, mut receiver) = dashboard(Section::Approvals);
        state.handle_key(key(KeyCode::Char('a')));
        state.handle_key(key(KeyCode::Char('2')));

        let event = next_settled(&mut receiver).await;
        assert!(matches!(
            event.payload,
            Some(Payload::DecisionSettled {
                generation: 0,
                result: DecisionResult::Cancelled,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn search_mode_captures_typing() {
        let (mut state, _receiver) = dashboard(Section::Students);
        state.handle_key(key(KeyCode::Char('/')));
        assert!(state.search_active);
        for c in "cs20q".chars() {
            assert_eq!(state.handle_key(key(KeyCode::Char(c))), KeyAction::Continue);
        }
        state.handle_key(key(KeyCode::Backspace));
        // Esc leaves search before it quits
        assert_eq!(state.handle_key(key(KeyCode::Esc)), KeyAction::Continue);
        assert!(!state.search_active);

        let ActivePage::Students(students) = &state.page else {
            panic!("expected students page");
        };
        assert_eq!(students.filter().search, "cs20");
        assert_eq!(students.visible_len(), 3);
        assert_eq!(state.handle_key(key(KeyCode::Esc)), KeyAction::Quit);
    }

    #[tokio::test]
    async fn parent_reminder_without_contact_is_a_warning() {
        let (mut state, _receiver) = dashboard(Section::Alerts);
        state.handle_key(key(KeyCode::Down));
        state.handle_key(key(KeyCode::Char('p')));
        let last = state.activity_logs.back().unwrap();
        assert_eq!(last.log_level, LogLevel::Warn);
        assert!(last.msg.contains("Alert 2 has no parent contact"));
    }

    #[tokio::test]
    async fn student_reminder_is_dispatched() {
        let (mut state, mut receiver) = dashboard(Section::Alerts);
        state.handle_key(key(KeyCode::Char('e')));
        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Success);
        assert_eq!(event.msg, "Reminder sent to Ravi Mehta at ravi.mehta@college.edu");
    }
}
