//! Dashboard state management
//!
//! The router holds the active section and the one mounted page. Mounting a
//! page builds a fresh controller from the data source, gives it a child of
//! the session token and bumps the page generation.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::events::{Event as WorkerEvent, EventType};
use crate::fixtures::DataSource;
use crate::logging::LogLevel;
use crate::pages::Section;
use crate::pages::alerts::{AlertFilter, AlertsController};
use crate::pages::approvals::ApprovalsController;
use crate::pages::schedule::ScheduleController;
use crate::pages::students::{StudentFilter, StudentsController};
use crate::services::Services;
use crate::ui::app::UIConfig;
use crate::workers::core::EventSender;

use chrono::NaiveDate;
use log::debug;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The controller for the section on screen.
#[derive(Debug, Clone)]
pub enum ActivePage {
    Approvals(ApprovalsController),
    Schedule(ScheduleController),
    Students(StudentsController),
    Alerts(AlertsController),
}

impl ActivePage {
    pub fn section(&self) -> Section {
        match self {
            ActivePage::Approvals(_) => Section::Approvals,
            ActivePage::Schedule(_) => Section::Schedule,
            ActivePage::Students(_) => Section::Students,
            ActivePage::Alerts(_) => Section::Alerts,
        }
    }
}

pub struct DashboardState {
    pub sidebar_open: bool,
    pub page: ActivePage,
    /// Incremented on every mount. Results tagged with an older value are dropped.
    pub generation: u64,
    /// Typing goes to the student search box.
    pub search_active: bool,
    /// Queue of events waiting to be processed
    pub pending_events: VecDeque<WorkerEvent>,
    /// Activity logs for display
    pub activity_logs: VecDeque<WorkerEvent>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    source: Arc<dyn DataSource>,
    services: Services,
    event_sender: EventSender,
    session_token: CancellationToken,
    page_token: CancellationToken,
    clock: fn() -> NaiveDate,
}

impl DashboardState {
    pub fn new(
        source: Arc<dyn DataSource>,
        services: Services,
        event_sender: EventSender,
        session_token: CancellationToken,
        ui_config: &UIConfig,
    ) -> Self {
        let page_token = session_token.child_token();
        let page = mount(source.as_ref(), ui_config.default_section);
        Self {
            sidebar_open: false,
            page,
            generation: 0,
            search_active: false,
            pending_events: VecDeque::new(),
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            source,
            services,
            event_sender,
            session_token,
            page_token,
            clock: ui_config.clock,
        }
    }

    pub fn active_section(&self) -> Section {
        self.page.section()
    }

    /// Read from the clock on each call.
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn event_sender(&self) -> &EventSender {
        &self.event_sender
    }

    pub fn page_token(&self) -> &CancellationToken {
        &self.page_token
    }

    /// Tears the current page down and mounts `section`. Selecting the
    /// section already on screen keeps it as is.
    pub fn switch_section(&mut self, section: Section) {
        if section == self.active_section() {
            return;
        }
        self.page_token.cancel();
        self.page_token = self.session_token.child_token();
        self.generation += 1;
        self.search_active = false;
        self.page = mount(self.source.as_ref(), section);
        debug!("mounted {} page, generation {}", section, self.generation);
        self.add_to_activity_log(WorkerEvent::dashboard_with_level(
            format!("Opened {}", section.title()),
            EventType::Refresh,
            LogLevel::Debug,
        ));
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: WorkerEvent) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    /// Add an event to the processing queue
    pub fn add_event(&mut self, event: WorkerEvent) {
        self.pending_events.push_back(event);
    }

    /// Cancels the mounted page's work.
    pub fn shutdown(&self) {
        self.page_token.cancel();
    }
}

fn mount(source: &dyn DataSource, section: Section) -> ActivePage {
    match section {
        Section::Approvals => ActivePage::Approvals(ApprovalsController::new(source.list_approvals())),
        Section::Schedule => ActivePage::Schedule(ScheduleController::new(source.list_schedule(0))),
        Section::Students => ActivePage::Students(StudentsController::new(
            source.list_students(&StudentFilter::default()),
        )),
        Section::Alerts => {
            ActivePage::Alerts(AlertsController::new(source.list_alerts(&AlertFilter::default())))
        }
    }
}
