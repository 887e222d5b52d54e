mod cli_messages;
mod config;
mod consts;
mod error_classifier;
mod events;
mod filter;
mod fixtures;
mod logging;
mod models;
mod pages;
mod report;
mod services;
mod session;
mod ui;
mod workers;

use crate::config::{Config, get_config_path};
use crate::filter::Selection;
use crate::models::{Channel, Severity, StudentStatus};
use crate::pages::Section;
use crate::pages::alerts::AlertFilter;
use crate::pages::students::StudentFilter;
use crate::session::{HeadlessCommand, run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Teacher dashboard for approvals, schedule, students and attendance alerts
struct Args {
    /// Dataset file to load instead of the configured or built-in one
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive dashboard
    Start {
        /// Section to open on: approvals, schedule, students or alerts
        #[arg(long, value_name = "SECTION")]
        section: Option<Section>,

        /// Fill the background instead of using the terminal's
        #[arg(long, default_value_t = false)]
        with_background: bool,
    },
    /// Print pending and recently processed join requests
    Approvals {
        /// Approve a pending request before printing. Repeatable.
        #[arg(long, value_name = "ID")]
        approve: Vec<String>,

        /// Decline a pending request before printing. Repeatable.
        #[arg(long, value_name = "ID")]
        decline: Vec<String>,
    },
    /// Print the class schedule for a week
    Schedule {
        /// Weeks from the current one; negative values go back
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        week: i64,
    },
    /// Print the student roster
    Students {
        /// Matches name, roll number or email, ignoring case
        #[arg(long, default_value = "")]
        search: String,

        #[arg(long, default_value = "all")]
        department: Selection<String>,

        #[arg(long, default_value = "all")]
        year: Selection<String>,

        /// active, inactive or graduated
        #[arg(long, default_value = "all")]
        status: Selection<StudentStatus>,

        /// Print cards instead of a table
        #[arg(long, default_value_t = false)]
        grid: bool,
    },
    /// Print attendance alerts
    Alerts {
        /// critical, warning or moderate
        #[arg(long, default_value = "all")]
        severity: Selection<Severity>,

        #[arg(long, default_value = "all")]
        department: Selection<String>,
    },
    /// Send an attendance reminder for an alert
    Remind {
        #[arg(long, value_name = "ID")]
        alert: String,

        /// student or parent
        #[arg(long, value_name = "CHANNEL")]
        channel: Channel,
    },
    /// Write a default configuration file
    InitConfig,
    /// Delete the configuration file
    ResetConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config_path = get_config_path()?;

    let headless = match args.command {
        Command::InitConfig => {
            if config_path.exists() {
                print_cmd_warn!("Config already exists", "{}", config_path.display());
                return Ok(());
            }
            Config::default().save(&config_path)?;
            print_cmd_success!("Config written", "{}", config_path.display());
            print_cmd_info!("Edit the file to change the dashboard defaults", "");
            return Ok(());
        }
        Command::ResetConfig => {
            if !config_path.exists() {
                print_cmd_warn!("No config to remove", "{}", config_path.display());
                return Ok(());
            }
            Config::clear(&config_path)?;
            print_cmd_success!("Config removed", "{}", config_path.display());
            return Ok(());
        }
        Command::Start {
            section,
            with_background,
        } => {
            let config = load_config(&config_path)?;
            let session = setup_session(config, args.data.as_deref())?;
            return run_tui_mode(session, section, with_background).await;
        }
        Command::Approvals { approve, decline } => HeadlessCommand::Approvals { approve, decline },
        Command::Schedule { week } => HeadlessCommand::Schedule { week },
        Command::Students {
            search,
            department,
            year,
            status,
            grid,
        } => HeadlessCommand::Students {
            filter: StudentFilter {
                search,
                department,
                year,
                status,
            },
            grid,
        },
        Command::Alerts {
            severity,
            department,
        } => HeadlessCommand::Alerts {
            filter: AlertFilter {
                severity,
                department,
            },
        },
        Command::Remind { alert, channel } => HeadlessCommand::Remind {
            alert_id: alert,
            channel,
        },
    };

    let config = load_config(&config_path)?;
    let session = setup_session(config, args.data.as_deref())?;
    if let Err(e) = run_headless_mode(session, headless).await {
        print_cmd_error!("Command failed", &e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

fn load_config(path: &std::path::Path) -> Result<Config, Box<dyn Error>> {
    Config::load_or_default(path).map_err(|e| {
        print_cmd_error!("Could not read config", &format!("{}: {}", path.display(), e));
        e.into()
    })
}
