//! Webhook Payload Types
//!
//! Wire types for the enhanced transaction events the webhook provider
//! delivers, plus normalization of single-object-or-array bodies into a
//! flat event sequence.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A single token movement within a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenTransfer {
    /// Owner of the source token account
    pub from_user_account: String,
    /// Owner of the destination token account
    pub to_user_account: String,
    /// Token mint address
    pub mint: String,
    /// Transfer amount in display units
    pub token_amount: f64,
}

/// An enhanced transaction event as delivered by the webhook
///
/// Only `signature` and `timestamp` are required on the wire; every other
/// field defaults so a sparsely populated event still decodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Transaction signature, used as the dedup key
    pub signature: String,
    /// Unix timestamp in seconds
    pub timestamp: i64,
    /// Transaction type classification (e.g., "WITHDRAW_SOL")
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// Free-text description of the transaction
    #[serde(default)]
    pub description: String,
    /// Originating program or platform (e.g., "SYSTEM_PROGRAM")
    #[serde(default)]
    pub source: String,
    /// Transaction fee in lamports
    #[serde(default)]
    pub fee: u64,
    /// Token movements, in instruction order
    #[serde(default)]
    pub token_transfers: Vec<TokenTransfer>,
}

/// Normalize a webhook body into a flat list of raw event values
///
/// The provider posts either a single event object or an array of them.
pub fn flatten_payload(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Decode raw event values, dropping any that do not parse
///
/// A malformed event is logged and skipped; it never aborts the rest of
/// the batch.
pub fn decode_events(raw: Vec<Value>) -> Vec<WebhookEvent> {
    let mut events = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value::<WebhookEvent>(value) {
            Ok(event) => events.push(event),
            Err(e) => warn!("Skipping undecodable event: {}", e),
        }
    }
    events
}
