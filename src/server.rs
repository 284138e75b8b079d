//! Webhook Ingress
//!
//! Receives event batches, runs each event through the dedup → filter →
//! decode → format → notify pipeline strictly in sequence, and always
//! acknowledges the sender with success.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::decoder::decode_event;
use crate::dedup::DedupStore;
use crate::event::{decode_events, flatten_payload, WebhookEvent};
use crate::filter::matches_event;
use crate::formatter::format_alert;
use crate::notifier::Notify;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub dedup: Arc<dyn DedupStore>,
    pub notifier: Arc<dyn Notify>,
}

impl AppState {
    pub fn new(dedup: Arc<dyn DedupStore>, notifier: Arc<dyn Notify>) -> Self {
        Self { dedup, notifier }
    }
}

/// Outcome of processing one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Signature already recorded; skipped entirely
    Duplicate,
    /// Did not match the withdrawal predicate; recorded, no alert
    Ignored,
    /// Alert delivered
    Notified,
    /// Matched but delivery failed; logged, batch continues
    NotifyFailed,
}

/// Per-batch outcome counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub received: usize,
    pub duplicates: usize,
    pub ignored: usize,
    pub notified: usize,
    pub failed: usize,
}

impl BatchStats {
    fn record(&mut self, outcome: EventOutcome) {
        match outcome {
            EventOutcome::Duplicate => self.duplicates += 1,
            EventOutcome::Ignored => self.ignored += 1,
            EventOutcome::Notified => self.notified += 1,
            EventOutcome::NotifyFailed => self.failed += 1,
        }
    }
}

/// Process one event through the pipeline
///
/// The signature is recorded before notification, for every event that is
/// not a duplicate, matched or not. A store failure is treated as
/// "signature unknown" and the event still processes.
pub async fn process_event(state: &AppState, event: &WebhookEvent) -> EventOutcome {
    match state.dedup.has(&event.signature).await {
        Ok(true) => return EventOutcome::Duplicate,
        Ok(false) => {}
        Err(e) => {
            warn!(signature = %event.signature, "Dedup lookup failed: {}", e);
        }
    }

    if let Err(e) = state.dedup.mark_processed(&event.signature).await {
        warn!(signature = %event.signature, "Dedup record failed: {}", e);
    }

    if !matches_event(event) {
        return EventOutcome::Ignored;
    }

    let summary = decode_event(event);
    let message = format_alert(&summary);

    match state.notifier.send(&message).await {
        Ok(()) => {
            info!(signature = %event.signature, "Withdrawal alert sent");
            EventOutcome::Notified
        }
        Err(e) => {
            warn!(signature = %event.signature, "Alert delivery failed: {}", e);
            EventOutcome::NotifyFailed
        }
    }
}

/// Process a batch of events strictly in sequence order
///
/// The outcome of one event never blocks or alters processing of the next.
pub async fn process_batch(state: &AppState, events: &[WebhookEvent]) -> BatchStats {
    let mut stats = BatchStats {
        received: events.len(),
        ..Default::default()
    };

    for event in events {
        let outcome = process_event(state, event).await;
        stats.record(outcome);
    }

    stats
}

/// Fixed acknowledgement body; the sender always sees success
#[derive(Debug, Serialize)]
struct Ack {
    received: bool,
}

async fn receive_webhook(State(state): State<AppState>, Json(body): Json<Value>) -> Json<Ack> {
    let events = decode_events(flatten_payload(body));
    let stats = process_batch(&state, &events).await;

    info!(
        received = stats.received,
        duplicates = stats.duplicates,
        ignored = stats.ignored,
        notified = stats.notified,
        failed = stats.failed,
        "Processed webhook batch"
    );

    Json(Ack { received: true })
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    dedup_backend: &'static str,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        dedup_backend: state.dedup.backend_name(),
    })
}

/// Build the service router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .route("/health", get(health_check))
        .with_state(state)
}
