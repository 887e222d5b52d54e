//! TUI mode execution

use super::{SessionData, setup::cancel_on_ctrl_c};
use crate::pages::{Section, local_today};
use crate::{print_cmd_info, print_cmd_success};
use crate::ui::{self, UIConfig};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{error::Error, io};

/// Runs the application in TUI mode
///
/// # Arguments
/// * `session` - Session data from setup
/// * `section` - Section to open on, overriding the configured default
/// * `with_background` - Whether to enable background colors, on top of the config
pub async fn run_tui_mode(
    session: SessionData,
    section: Option<Section>,
    with_background: bool,
) -> Result<(), Box<dyn Error>> {
    let default_section = section.unwrap_or(session.config.default_section);
    print_cmd_info!("Opening the dashboard", "{}", default_section.title());

    cancel_on_ctrl_c(&session.shutdown);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let ui_config = UIConfig {
        with_background_color: with_background || session.config.with_background_color,
        default_section,
        splash_duration: session.config.splash_duration(),
        clock: local_today,
    };

    let app = ui::App::new(
        session.dataset.clone(),
        session.services.clone(),
        session.event_sender.clone(),
        session.event_receiver,
        session.shutdown.clone(),
        ui_config,
    );

    let result = ui::run(&mut terminal, app).await;

    // Clean up the terminal after running the application
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;

    session.shutdown.cancel();
    print_cmd_success!("Dashboard closed", "");

    Ok(())
}
