//! Redis key generation functions
//!
//! Centralizes all key patterns used for account storage, the bounded
//! history log, and the leaderboard indexes.

use shared::WalletKey;

use crate::domain::LeaderboardSort;

/// Key prefix for account hashes
const ACCOUNT_KEY_PREFIX: &str = "account:";

/// Suffix for the per-account history list
const HISTORY_KEY_SUFFIX: &str = ":history";

/// Prefix for leaderboard sorted sets
const LEADERBOARD_KEY_PREFIX: &str = "leaderboard:";

/// Key of the account hash for a wallet
pub fn account_key(wallet: &WalletKey) -> String {
    format!("{}{}", ACCOUNT_KEY_PREFIX, wallet)
}

/// Key of the bounded wager-history list for a wallet
pub fn history_key(wallet: &WalletKey) -> String {
    format!("{}{}{}", ACCOUNT_KEY_PREFIX, wallet, HISTORY_KEY_SUFFIX)
}

/// Key of the leaderboard sorted set for an ordering
pub fn leaderboard_key(sort: LeaderboardSort) -> String {
    format!("{}{}", LEADERBOARD_KEY_PREFIX, sort.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(s: &str) -> WalletKey {
        WalletKey::new(s).unwrap()
    }

    #[test]
    fn test_account_key_format() {
        assert_eq!(account_key(&wallet("0xAbc")), "account:0xabc");
    }

    #[test]
    fn test_history_key_format() {
        assert_eq!(history_key(&wallet("0xabc")), "account:0xabc:history");
    }

    #[test]
    fn test_leaderboard_key_format() {
        assert_eq!(leaderboard_key(LeaderboardSort::Points), "leaderboard:points");
        assert_eq!(leaderboard_key(LeaderboardSort::Earned), "leaderboard:earned");
    }
}
