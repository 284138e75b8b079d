//! Known Token Registry
//!
//! Static mapping from mint addresses to display symbols, with a truncated
//! fallback for mints the registry does not know.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Number of mint characters kept when falling back to a truncated form
const TRUNCATED_MINT_LEN: usize = 8;

/// Mints with well-known display symbols
static KNOWN_TOKENS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", "USDC");
    map.insert("Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB", "USDT");
    map.insert("So11111111111111111111111111111111111111112", "SOL");
    map.insert("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263", "BONK");
    map.insert("JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", "JUP");
    map
});

/// Look up the display symbol for a known mint
///
/// # Arguments
/// * `mint` - The token mint address
///
/// # Returns
/// `Some(&str)` with the symbol if the mint is known, `None` otherwise
pub fn lookup_symbol(mint: &str) -> Option<&'static str> {
    KNOWN_TOKENS.get(mint).copied()
}

/// Resolve a mint to a display symbol
///
/// Unknown mints fall back to their first 8 characters followed by `...`;
/// mints shorter than that pass through unchanged.
pub fn resolve_symbol(mint: &str) -> String {
    if let Some(symbol) = lookup_symbol(mint) {
        return symbol.to_string();
    }

    if mint.chars().count() >= TRUNCATED_MINT_LEN {
        let prefix: String = mint.chars().take(TRUNCATED_MINT_LEN).collect();
        format!("{}...", prefix)
    } else {
        mint.to_string()
    }
}
