//! Session setup and initialization

use crate::config::Config;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::events::Event;
use crate::fixtures::Dataset;
use crate::services::Services;
use crate::workers::core::EventSender;
use log::debug;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Session data for both TUI and headless modes
pub struct SessionData {
    pub config: Config,
    /// Records the pages are built from
    pub dataset: Arc<Dataset>,
    pub services: Services,
    /// Sender handed to worker tasks
    pub event_sender: EventSender,
    /// Event receiver for worker events
    pub event_receiver: mpsc::Receiver<Event>,
    /// Cancelled on quit or Ctrl+C
    pub shutdown: CancellationToken,
}

/// Sets up a session
///
/// 1. Loads the dataset (`data_override`, then the configured file, then the built-in one)
/// 2. Creates the simulated collaborators with the configured latency
/// 3. Creates the event channel and the shutdown token
pub fn setup_session(
    config: Config,
    data_override: Option<&Path>,
) -> Result<SessionData, Box<dyn Error>> {
    let data_path = data_override.or(config.data_file.as_deref());
    let dataset = Dataset::resolve(data_path)?;
    debug!(
        "loaded {} approvals, {} schedule days, {} students, {} alerts",
        dataset.approvals.len(),
        dataset.schedule.len(),
        dataset.students.len(),
        dataset.alerts.len()
    );

    let services = Services::simulated(config.decision_latency());
    let (event_sender, event_receiver) = EventSender::channel(EVENT_QUEUE_SIZE);

    Ok(SessionData {
        config,
        dataset: Arc::new(dataset),
        services,
        event_sender,
        event_receiver,
        shutdown: CancellationToken::new(),
    })
}

/// Cancels the session token on Ctrl+C.
pub fn cancel_on_ctrl_c(shutdown: &CancellationToken) {
    let shutdown = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn uses_builtin_dataset_by_default() {
        let session = setup_session(Config::default(), None).unwrap();
        assert_eq!(session.dataset.students.len(), 8);
        assert!(!session.shutdown.is_cancelled());
    }

    #[test]
    fn data_override_wins_over_config() {
        let dir = tempdir().unwrap();
        let configured = dir.path().join("configured.json");
        let flag = dir.path().join("flag.json");
        fs::write(&configured, r#"{"students": []}"#).unwrap();
        fs::write(&flag, r#"{"approvals": []}"#).unwrap();

        let config = Config {
            data_file: Some(configured.clone()),
            ..Config::default()
        };
        let session = setup_session(config.clone(), Some(&flag)).unwrap();
        assert!(session.dataset.approvals.is_empty());

        let session = setup_session(config, None).unwrap();
        assert!(session.dataset.students.is_empty());
    }

    #[test]
    fn missing_data_file_is_an_error() {
        let result = setup_session(Config::default(), Some(Path::new("/nonexistent/data.json")));
        assert!(result.is_err());
    }
}
