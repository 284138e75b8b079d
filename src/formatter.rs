//! Alert Formatting
//!
//! Renders a withdrawal summary as a Telegram Markdown message with a
//! transaction explorer link.

use crate::decoder::WithdrawalSummary;

/// Transaction explorer base URL, keyed by signature
pub const EXPLORER_TX_URL: &str = "https://solscan.io/tx";

/// Render a withdrawal summary as a Markdown alert
///
/// The token block is present only when the summary carries transfer
/// detail. Interpolated content is not escaped.
pub fn format_alert(summary: &WithdrawalSummary) -> String {
    let mut message = String::new();

    message.push_str("🚨 *Withdrawal Detected*\n\n");
    message.push_str(&format!("*Type:* {}\n", summary.event_type));
    message.push_str(&format!("*Source:* {}\n", summary.source));
    message.push_str(&format!("*Time:* {}\n", summary.timestamp));

    if let Some(detail) = &summary.detail {
        message.push_str(&format!("\n*Token:* {}\n", detail.symbol));
        message.push_str(&format!("*Amount:* {}\n", detail.amount));
        message.push_str(&format!("*From:* `{}`\n", detail.from));
        message.push_str(&format!("*To:* `{}`\n", detail.to));
    }

    message.push_str(&format!("\n*Fee:* {} SOL\n", summary.fee_sol));
    message.push_str(&format!("*Signature:* `{}`\n", summary.signature));
    message.push_str(&format!(
        "[View on Solscan]({}/{})",
        EXPLORER_TX_URL, summary.signature
    ));

    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::WithdrawalDetail;

    fn summary_with_detail() -> WithdrawalSummary {
        WithdrawalSummary {
            signature: "abc123".to_string(),
            timestamp: "2023-11-14T22:13:20+00:00".to_string(),
            event_type: "WITHDRAW_SOL".to_string(),
            source: "SYSTEM_PROGRAM".to_string(),
            detail: Some(WithdrawalDetail {
                from: "A".to_string(),
                to: "B".to_string(),
                symbol: "USDC".to_string(),
                amount: 10.0,
                mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            }),
            fee_sol: 0.005,
        }
    }

    #[test]
    fn test_alert_contains_all_fields() {
        let message = format_alert(&summary_with_detail());

        assert!(message.contains("WITHDRAW_SOL"));
        assert!(message.contains("SYSTEM_PROGRAM"));
        assert!(message.contains("2023-11-14T22:13:20+00:00"));
        assert!(message.contains("USDC"));
        assert!(message.contains("10"));
        assert!(message.contains("`A`"));
        assert!(message.contains("`B`"));
        assert!(message.contains("`abc123`"));
    }

    #[test]
    fn test_alert_fee_line() {
        let message = format_alert(&summary_with_detail());
        assert!(message.contains("*Fee:* 0.005 SOL"));
    }

    #[test]
    fn test_alert_explorer_link() {
        let message = format_alert(&summary_with_detail());
        assert!(message.contains("https://solscan.io/tx/abc123"));
    }

    #[test]
    fn test_alert_without_detail_omits_token_block() {
        let mut summary = summary_with_detail();
        summary.detail = None;

        let message = format_alert(&summary);
        assert!(!message.contains("*Token:*"));
        assert!(!message.contains("*Amount:*"));
        assert!(message.contains("*Fee:*"));
        assert!(message.contains("`abc123`"));
    }

    #[test]
    fn test_alert_whole_number_amount_renders_bare() {
        let message = format_alert(&summary_with_detail());
        assert!(message.contains("*Amount:* 10\n"));
    }

    #[test]
    fn test_alert_is_deterministic() {
        let summary = summary_with_detail();
        assert_eq!(format_alert(&summary), format_alert(&summary));
    }
}
