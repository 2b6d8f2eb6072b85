use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::WalletKey;

use crate::domain::{Account, LeaderboardSort, WagerRecord};
use crate::errors::Result;

/// Compound settlement write, applied atomically or not at all.
///
/// The engine computes every field before the write; the repository's only
/// job is to commit them together, guarded by the version the engine read.
#[derive(Debug, Clone)]
pub struct SettlementUpdate {
    pub record: WagerRecord,
    pub new_balance: f64,
    pub new_streak: u32,
    pub earned_delta: f64,
}

/// Result of an atomic daily-bonus claim.
#[derive(Debug, Clone, PartialEq)]
pub enum BonusClaim {
    Claimed { amount: f64, account: Account },
    AlreadyClaimedToday,
    NotFound,
}

/// Ledger store abstraction.
///
/// One account document per wallet; per-account mutations are serialized
/// by the store (conditional writes), never by engine-side locking.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up an account, creating it with the given starting balance and
    /// zeroed statistics when absent. Returns `true` when newly created.
    async fn get_or_create(&self, wallet: &WalletKey, starting_balance: f64)
        -> Result<(Account, bool)>;

    async fn find(&self, wallet: &WalletKey) -> Result<Option<Account>>;

    /// Apply one settlement: set balance and streak, bump counters,
    /// accumulate earnings, append the record with capacity eviction.
    ///
    /// Commits only if the stored version still equals `expected_version`;
    /// returns `None` (with nothing written) when the check misses.
    async fn apply_settlement(
        &self,
        wallet: &WalletKey,
        expected_version: i64,
        update: SettlementUpdate,
    ) -> Result<Option<Account>>;

    /// Atomically check the UTC calendar-day gate and credit the bonus.
    /// The amount is derived from the streak the store holds at commit
    /// time, so a racing settlement cannot split check from credit.
    async fn claim_bonus(&self, wallet: &WalletKey, now: DateTime<Utc>) -> Result<BonusClaim>;

    /// Most recent wager records, newest first.
    async fn history(&self, wallet: &WalletKey, limit: usize) -> Result<Vec<WagerRecord>>;

    /// Top accounts under the given ordering.
    async fn leaderboard(&self, sort: LeaderboardSort, limit: usize) -> Result<Vec<Account>>;

    /// Liveness probe against the underlying store.
    async fn ping(&self) -> Result<()>;
}
