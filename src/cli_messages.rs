//! CLI command messaging
//!
//! Consistent status lines for the headless subcommands and config commands.
//! Info and success go to stdout so they sit next to the printed page;
//! warnings and errors go to stderr.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Info,
    Warn,
    Error,
    Success,
}

impl Status {
    fn tag(self) -> &'static str {
        match self {
            Status::Info => "\x1b[1;33m[INFO]\x1b[0m",
            Status::Warn => "\x1b[1;91m[WARN]\x1b[0m",
            Status::Error => "\x1b[1;31m[ERROR]\x1b[0m",
            Status::Success => "\x1b[1;32m[SUCCESS]\x1b[0m",
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Status::Warn | Status::Error)
    }
}

/// `[TAG] title`, with the details tab-separated on the same line.
pub fn status_line(status: Status, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{} {}", status.tag(), title)
    } else {
        format!("{} {}\t {}", status.tag(), title, details)
    }
}

pub fn print_status(status: Status, title: &str, details: &str) {
    let line = status_line(status, title, details);
    if status.to_stderr() {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_status(
            $crate::cli_messages::Status::Info,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_status(
            $crate::cli_messages::Status::Warn,
            $title,
            &format!($($details)*),
        )
    };
}

/// Macro for CLI errors. Details are optional.
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_status($crate::cli_messages::Status::Error, $title, "")
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_status($crate::cli_messages::Status::Error, $title, $details)
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_status(
            $crate::cli_messages::Status::Success,
            $title,
            &format!($($details)*),
        )
    };
}
