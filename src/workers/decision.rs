//! Approval decisions running in the background

use super::core::EventSender;
use crate::error_classifier::ErrorClassifier;
use crate::events::{DecisionResult, Event, EventType};
use crate::logging::LogLevel;
use crate::pages::approvals::DecisionTicket;
use crate::services::DecisionSink;
use log::debug;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Waits for the sink unless the page is torn down first.
pub async fn run_decision(
    sink: &dyn DecisionSink,
    ticket: &DecisionTicket,
    cancel: &CancellationToken,
) -> DecisionResult {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => DecisionResult::Cancelled,
        result = sink.submit_approval_decision(&ticket.request_id, ticket.outcome) => match result {
            Ok(()) => DecisionResult::Applied,
            Err(e) => DecisionResult::Failed(e),
        },
    }
}

/// Runs a decision on its own task and reports it as a `DecisionSettled` event
/// tagged with the page generation that started it.
pub fn spawn_decision(
    ticket: DecisionTicket,
    generation: u64,
    sink: Arc<dyn DecisionSink>,
    event_sender: EventSender,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        event_sender
            .send_approvals_event(
                format!(
                    "Submitting {} for request {}...",
                    ticket.outcome.verb(),
                    ticket.request_id
                ),
                EventType::Waiting,
                LogLevel::Debug,
            )
            .await;

        let result = run_decision(sink.as_ref(), &ticket, &cancel).await;
        debug!("decision for request {} settled: {:?}", ticket.request_id, result);

        let log_level = match &result {
            DecisionResult::Failed(e) => Some(ErrorClassifier::new().classify_decision_error(e)),
            _ => None,
        };
        let mut event =
            Event::decision_settled(generation, &ticket.request_id, ticket.outcome, result);
        if let Some(level) = log_level {
            event.log_level = level;
        }
        event_sender.send_event(event).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Payload;
    use crate::models::Outcome;
    use crate::services::error::DecisionError;
    use crate::services::{MockDecisionSink, SimulatedDecisionSink};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn ticket(id: &str) -> DecisionTicket {
        DecisionTicket {
            request_id: id.to_string(),
            outcome: Outcome::Approved,
        }
    }

    async fn settled(receiver: &mut mpsc::Receiver<Event>) -> Event {
        loop {
            let event = receiver.recv().await.expect("channel closed");
            if event.payload.is_some() {
                return event;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn decision_waits_for_latency_then_applies() {
        let (sender, mut receiver) = mpsc::channel(8);
        let sink = Arc::new(SimulatedDecisionSink::new(Duration::from_secs(1)));
        let started = tokio::time::Instant::now();

        spawn_decision(
            ticket("1"),
            7,
            sink,
            EventSender::new(sender),
            CancellationToken::new(),
        );

        let event = settled(&mut receiver).await;
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert_eq!(
            event.payload,
            Some(Payload::DecisionSettled {
                generation: 7,
                request_id: "1".to_string(),
                outcome: Outcome::Approved,
                result: DecisionResult::Applied,
            })
        );
    }

    #[tokio::test]
    async fn rejected_decision_is_reported_at_error_level() {
        let (sender, mut receiver) = mpsc::channel(8);
        let mut sink = MockDecisionSink::new();
        sink.expect_submit_approval_decision()
            .withf(|id, outcome| id == "2" && *outcome == Outcome::Approved)
            .times(1)
            .returning(|id, _| {
                Err(DecisionError::Rejected {
                    request_id: id.to_string(),
                    reason: "roll number mismatch".to_string(),
                })
            });

        spawn_decision(
            ticket("2"),
            1,
            Arc::new(sink),
            EventSender::new(sender),
            CancellationToken::new(),
        );

        let event = settled(&mut receiver).await;
        assert_eq!(event.event_type, EventType::Error);
        assert_eq!(event.log_level, LogLevel::Error);
        assert!(event.msg.contains("roll number mismatch"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_token_abandons_decision() {
        let (sender, mut receiver) = mpsc::channel(8);
        let sink = Arc::new(SimulatedDecisionSink::new(Duration::from_secs(30)));
        let cancel = CancellationToken::new();

        let handle = spawn_decision(
            ticket("3"),
            2,
            sink,
            EventSender::new(sender),
            cancel.clone(),
        );
        cancel.cancel();
        handle.await.unwrap();

        let event = settled(&mut receiver).await;
        assert!(matches!(
            event.payload,
            Some(Payload::DecisionSettled {
                result: DecisionResult::Cancelled,
                ..
            })
        ));
    }
}
