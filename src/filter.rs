//! Withdrawal Event Filtering
//!
//! Classifies incoming events as withdrawals by matching against the
//! transaction type or its free-text description.

use crate::event::WebhookEvent;

/// Substring that marks an event as a withdrawal, matched case-insensitively
const WITHDRAW_MARKER: &str = "withdraw";

/// Check whether a type/description pair indicates a withdrawal
///
/// # Arguments
/// * `event_type` - The transaction type classification
/// * `description` - The free-text transaction description
///
/// # Returns
/// `true` if either field contains "withdraw" (case-insensitive)
pub fn is_withdrawal(event_type: &str, description: &str) -> bool {
    event_type.to_lowercase().contains(WITHDRAW_MARKER)
        || description.to_lowercase().contains(WITHDRAW_MARKER)
}

/// Check whether an event should produce an alert
pub fn matches_event(event: &WebhookEvent) -> bool {
    is_withdrawal(&event.event_type, &event.description)
}
