//! Attendance reminders running in the background

use super::core::EventSender;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use crate::models::Channel;
use crate::services::error::DispatchError;
use crate::services::{NotificationDispatcher, ReminderRequest};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Sends one reminder. `None` when the page was torn down first.
pub async fn run_reminder(
    dispatcher: &dyn NotificationDispatcher,
    reminder: &ReminderRequest,
    cancel: &CancellationToken,
) -> Option<Result<(), DispatchError>> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        result = dispatcher.send_reminder(reminder) => Some(result),
    }
}

/// Activity line for a delivered reminder.
pub fn sent_event(reminder: &ReminderRequest) -> Event {
    let recipient = match reminder.channel {
        Channel::Student => reminder.student_name.clone(),
        Channel::Parent => format!("{}'s parent", reminder.student_name),
    };
    Event::alerts_with_level(
        format!("Reminder sent to {recipient} at {}", reminder.contact),
        EventType::Success,
        LogLevel::Info,
    )
}

/// Activity line for a reminder that could not be sent.
pub fn failure_event(error: &DispatchError) -> Event {
    Event::alerts_with_level(
        format!("Could not send reminder: {error}"),
        EventType::Error,
        ErrorClassifier::new().classify_dispatch_error(error),
    )
}

pub fn spawn_reminder(
    reminder: ReminderRequest,
    dispatcher: Arc<dyn NotificationDispatcher>,
    event_sender: EventSender,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = match run_reminder(dispatcher.as_ref(), &reminder, &cancel).await {
            Some(Ok(())) => sent_event(&reminder),
            Some(Err(e)) => failure_event(&e),
            None => Event::alerts_with_level(
                format!("Reminder for alert {} abandoned", reminder.alert_id),
                EventType::StateChange,
                LogLevel::Debug,
            ),
        };
        event_sender.send_event(event).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{LoggingDispatcher, MockNotificationDispatcher};
    use tokio::sync::mpsc;

    fn reminder(channel: Channel) -> ReminderRequest {
        ReminderRequest {
            alert_id: "1".to_string(),
            channel,
            student_name: "Ravi Mehta".to_string(),
            contact: "+91 98765 43210".to_string(),
        }
    }

    #[tokio::test]
    async fn delivered_reminder_is_logged_and_recorded() {
        let (sender, mut receiver) = mpsc::channel(4);
        let dispatcher = Arc::new(LoggingDispatcher::new());

        spawn_reminder(
            reminder(Channel::Parent),
            dispatcher.clone(),
            EventSender::new(sender),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Success);
        assert_eq!(event.msg, "Reminder sent to Ravi Mehta's parent at +91 98765 43210");
        assert_eq!(dispatcher.sent().await, vec![reminder(Channel::Parent)]);
    }

    #[tokio::test]
    async fn dispatch_failure_becomes_error_event() {
        let (sender, mut receiver) = mpsc::channel(4);
        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher.expect_send_reminder().times(1).returning(|r| {
            Err(DispatchError::Failed {
                alert_id: r.alert_id.clone(),
                reason: "gateway timeout".to_string(),
            })
        });

        spawn_reminder(
            reminder(Channel::Student),
            Arc::new(dispatcher),
            EventSender::new(sender),
            CancellationToken::new(),
        )
        .await
        .unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.log_level, LogLevel::Warn);
        assert!(event.msg.contains("gateway timeout"));
    }

    #[tokio::test]
    async fn cancelled_reminder_is_not_sent() {
        let dispatcher = LoggingDispatcher::new();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = run_reminder(&dispatcher, &reminder(Channel::Student), &cancel).await;
        assert!(result.is_none());
        assert!(dispatcher.sent().await.is_empty());
    }

    #[test]
    fn missing_parent_contact_is_a_warning() {
        let event = failure_event(&DispatchError::NoParentContact("3".to_string()));
        assert_eq!(event.log_level, LogLevel::Warn);
        assert_eq!(event.msg, "Could not send reminder: Alert 3 has no parent contact");
    }
}
