//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::ui::tick_rate;
use crate::events::Event as WorkerEvent;
use crate::fixtures::DataSource;
use crate::pages::Section;
use crate::services::Services;
use crate::ui::dashboard::{DashboardState, KeyAction, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::core::EventSender;
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub default_section: Section,
    pub splash_duration: Duration,
    /// Read on every frame; dates on screen are never cached.
    pub clock: fn() -> NaiveDate,
}

/// The different screens in the application.
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// The dashboard with the router and the mounted page.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Cancelled on quit. Page tokens are children of it.
    shutdown: CancellationToken,

    source: Arc<dyn DataSource>,
    services: Services,
    event_sender: EventSender,
    ui_config: UIConfig,
}

impl App {
    pub fn new(
        source: Arc<dyn DataSource>,
        services: Services,
        event_sender: EventSender,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        shutdown: CancellationToken,
        ui_config: UIConfig,
    ) -> Self {
        let mut app = Self {
            current_screen: Screen::Splash,
            event_receiver,
            shutdown,
            source,
            services,
            event_sender,
            ui_config,
        };
        if app.ui_config.splash_duration.is_zero() {
            app.open_dashboard();
        }
        app
    }

    fn open_dashboard(&mut self) {
        let state = DashboardState::new(
            self.source.clone(),
            self.services.clone(),
            self.event_sender.clone(),
            self.shutdown.clone(),
            &self.ui_config,
        );
        self.current_screen = Screen::Dashboard(Box::new(state));
    }

    fn quit(&self) {
        if let Screen::Dashboard(state) = &self.current_screen {
            state.shutdown();
        }
        self.shutdown.cancel();
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();

    loop {
        // Ctrl+C from the session
        if app.shutdown.is_cancelled() {
            return Ok(());
        }

        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_event(event);
            }
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        if matches!(app.current_screen, Screen::Splash)
            && splash_start.elapsed() >= app.ui_config.splash_duration
        {
            app.open_dashboard();
            continue;
        }

        if !event::poll(tick_rate())? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Skip events that are not KeyEventKind::Press
        if key.kind == event::KeyEventKind::Release {
            continue;
        }

        let action = match &mut app.current_screen {
            Screen::Splash => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    KeyAction::Quit
                } else {
                    // Any other key skips the splash screen
                    app.open_dashboard();
                    KeyAction::Continue
                }
            }
            Screen::Dashboard(state) => state.handle_key(key),
        };
        if action == KeyAction::Quit {
            app.quit();
            return Ok(());
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
