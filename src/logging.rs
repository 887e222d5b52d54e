//! Log levels and `RUST_LOG` handling
//!
//! User-facing activity is carried by [`crate::events::Event`] records, each
//! with a [`LogLevel`]. Diagnostics use the `log` macros; in headless mode
//! they are bridged into a `tracing` subscriber on stderr, in TUI mode they
//! are dropped so the screen stays intact. Both read the same `RUST_LOG`
//! directives.

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");
const DEFAULT_DIRECTIVES: &str = "info";

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    fn as_tracing(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Per-target directives such as `tokio=info,upasthiti=debug`. An empty or
/// unparsable value falls back to `info`.
pub fn parse_log_filter(rust_log: &str) -> Targets {
    let directives = if rust_log.trim().is_empty() {
        DEFAULT_DIRECTIVES
    } else {
        rust_log
    };
    Targets::from_str(directives)
        .or_else(|_| Targets::from_str(DEFAULT_DIRECTIVES))
        .unwrap_or_default()
}

/// Most verbose level the directives enable for this crate. Errors are
/// always shown, even when the directives only name other targets.
pub fn crate_threshold(filter: &Targets) -> LogLevel {
    [LogLevel::Trace, LogLevel::Debug, LogLevel::Info, LogLevel::Warn]
        .into_iter()
        .find(|level| filter.would_enable(CRATE_TARGET, &level.as_tracing()))
        .unwrap_or(LogLevel::Error)
}

fn env_filter() -> Targets {
    parse_log_filter(&env::var("RUST_LOG").unwrap_or_default())
}

/// Threshold for activity events, read from `RUST_LOG` once per process.
pub fn get_rust_log_level() -> LogLevel {
    static LEVEL: OnceLock<LogLevel> = OnceLock::new();
    *LEVEL.get_or_init(|| crate_threshold(&env_filter()))
}

pub fn should_log(event_level: LogLevel, threshold: LogLevel) -> bool {
    event_level >= threshold
}

pub fn should_log_with_env(event_level: LogLevel) -> bool {
    should_log(event_level, get_rust_log_level())
}

/// Routes `log` records to stderr through `RUST_LOG`. Headless mode only.
pub fn init_headless() {
    // A second call keeps the subscriber already installed
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
