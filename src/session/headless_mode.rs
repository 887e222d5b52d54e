//! Headless mode execution
//!
//! Each command mounts one page, applies the requested actions and prints
//! the page as plain text. Activity that would go to the TUI log is
//! printed as it happens.

use super::SessionData;
use super::setup::cancel_on_ctrl_c;
use crate::events::Event;
use crate::fixtures::DataSource;
use crate::logging;
use crate::models::{Channel, Outcome};
use crate::pages::alerts::{AlertFilter, AlertsController};
use crate::pages::approvals::ApprovalsController;
use crate::pages::local_today;
use crate::pages::schedule::ScheduleController;
use crate::pages::students::{StudentFilter, StudentsController, ViewMode};
use crate::report;
use crate::workers::reminder::{failure_event, run_reminder, sent_event};
use log::debug;
use std::error::Error;

/// A page rendered without the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessCommand {
    Approvals {
        approve: Vec<String>,
        decline: Vec<String>,
    },
    Schedule {
        week: i64,
    },
    Students {
        filter: StudentFilter,
        grid: bool,
    },
    Alerts {
        filter: AlertFilter,
    },
    Remind {
        alert_id: String,
        channel: Channel,
    },
}

fn print_event(event: &Event) {
    if event.should_display() {
        println!("{}", event);
    }
}

/// Runs one headless command
///
/// # Returns
/// * `Ok(())` - The page was printed
/// * `Err` - A decision, reminder or date computation failed
pub async fn run_headless_mode(
    session: SessionData,
    command: HeadlessCommand,
) -> Result<(), Box<dyn Error>> {
    logging::init_headless();
    cancel_on_ctrl_c(&session.shutdown);
    debug!("running headless command {:?}", command);

    let source = session.dataset.as_ref();
    let today = local_today();

    match command {
        HeadlessCommand::Approvals { approve, decline } => {
            let mut approvals = ApprovalsController::new(source.list_approvals());
            let decisions = approve
                .into_iter()
                .map(|id| (id, Outcome::Approved))
                .chain(decline.into_iter().map(|id| (id, Outcome::Declined)));
            let mut failed = 0;
            for (request_id, outcome) in decisions {
                let result = approvals
                    .decide(
                        &request_id,
                        outcome,
                        session.services.decisions.as_ref(),
                        &session.shutdown,
                    )
                    .await?;
                if !result.is_applied() {
                    failed += 1;
                }
                print_event(&Event::decision_settled(0, &request_id, outcome, result));
            }
            print!("{}", report::render_approvals(&approvals)?);
            if failed > 0 {
                return Err(format!("{failed} decision(s) were not applied").into());
            }
        }
        HeadlessCommand::Schedule { week } => {
            let mut schedule = ScheduleController::new(source.list_schedule(week));
            schedule.set_week_offset(week);
            print!("{}", report::render_schedule(&schedule, today)?);
        }
        HeadlessCommand::Students { filter, grid } => {
            let mut students = StudentsController::new(source.list_students(&StudentFilter::default()));
            students.set_search(&filter.search);
            students.set_department(filter.department);
            students.set_year(filter.year);
            students.set_status(filter.status);
            if grid {
                students.set_view_mode(ViewMode::Grid);
            }
            print!("{}", report::render_students(&students)?);
        }
        HeadlessCommand::Alerts { filter } => {
            let mut alerts = AlertsController::new(source.list_alerts(&AlertFilter::default()));
            alerts.set_filter(filter);
            print!("{}", report::render_alerts(&alerts, today)?);
        }
        HeadlessCommand::Remind { alert_id, channel } => {
            let alerts = AlertsController::new(source.list_alerts(&AlertFilter::default()));
            let outcome = match alerts.notify(&alert_id, channel) {
                Ok(reminder) => {
                    let dispatcher = session.services.notifications.as_ref();
                    match run_reminder(dispatcher, &reminder, &session.shutdown).await {
                        Some(Ok(())) => Ok(sent_event(&reminder)),
                        Some(Err(e)) => Err(e),
                        None => return Err("Interrupted before the reminder was sent".into()),
                    }
                }
                Err(e) => Err(e),
            };
            match outcome {
                Ok(event) => print_event(&event),
                Err(e) => {
                    print_event(&failure_event(&e));
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
