//! Event Decoder
//!
//! Turns a raw webhook event into a normalized withdrawal summary:
//! first token transfer only, fee converted from lamports to SOL,
//! timestamp rendered as ISO-8601.

use chrono::DateTime;

use crate::event::WebhookEvent;
use crate::tokens::resolve_symbol;

/// Lamports per SOL, the fee display conversion factor
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Token movement details taken from the first transfer in an event
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawalDetail {
    /// Owner of the source token account
    pub from: String,
    /// Owner of the destination token account
    pub to: String,
    /// Resolved display symbol for the mint
    pub symbol: String,
    /// Transfer amount in display units
    pub amount: f64,
    /// Token mint address
    pub mint: String,
}

/// Normalized summary of one withdrawal event
#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawalSummary {
    /// Transaction signature
    pub signature: String,
    /// ISO-8601 rendering of the event timestamp
    pub timestamp: String,
    /// Transaction type classification
    pub event_type: String,
    /// Originating program or platform
    pub source: String,
    /// Populated from the first token transfer only; `None` when the event
    /// carries no transfers
    pub detail: Option<WithdrawalDetail>,
    /// Transaction fee in SOL
    pub fee_sol: f64,
}

/// Render an epoch-seconds timestamp as ISO-8601
///
/// Falls back to the raw value as a string if the timestamp is outside the
/// representable range.
pub fn format_timestamp(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| epoch_secs.to_string())
}

/// Decode a webhook event into a withdrawal summary
///
/// Transfers past the first are ignored. No side effects; the caller
/// guarantees `signature` and `timestamp` are present (wire parsing
/// enforces both).
pub fn decode_event(event: &WebhookEvent) -> WithdrawalSummary {
    let detail = event.token_transfers.first().map(|transfer| WithdrawalDetail {
        from: transfer.from_user_account.clone(),
        to: transfer.to_user_account.clone(),
        symbol: resolve_symbol(&transfer.mint),
        amount: transfer.token_amount,
        mint: transfer.mint.clone(),
    });

    WithdrawalSummary {
        signature: event.signature.clone(),
        timestamp: format_timestamp(event.timestamp),
        event_type: event.event_type.clone(),
        source: event.source.clone(),
        detail,
        fee_sol: event.fee as f64 / LAMPORTS_PER_SOL,
    }
}
