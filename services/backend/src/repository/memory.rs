//! In-memory AccountRepository
//!
//! A mutexed map with the same conditional-write semantics as the Redis
//! store. Backs the hermetic test suites and local development without a
//! running Redis.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{WalletKey, HISTORY_CAPACITY};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::domain::{Account, LeaderboardSort, WagerRecord};
use crate::engine::bonus;
use crate::errors::Result;

use super::account_repository::{AccountRepository, BonusClaim, SettlementUpdate};

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    /// Newest first, truncated to capacity on append.
    history: VecDeque<WagerRecord>,
}

#[derive(Default)]
pub struct MemoryAccountRepository {
    accounts: Mutex<HashMap<String, StoredAccount>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn get_or_create(
        &self,
        wallet: &WalletKey,
        starting_balance: f64,
    ) -> Result<(Account, bool)> {
        let mut accounts = self.accounts.lock().expect("account map poisoned");
        if let Some(stored) = accounts.get(wallet.as_str()) {
            return Ok((stored.account.clone(), false));
        }

        let account = Account {
            wallet: wallet.as_str().to_string(),
            balance: starting_balance,
            total_wins: 0,
            total_losses: 0,
            total_wagers: 0,
            current_streak: 0,
            total_earned: 0.0,
            last_bonus_claimed_at: None,
            created_at: Utc::now(),
            version: 0,
        };
        accounts.insert(
            wallet.as_str().to_string(),
            StoredAccount {
                account: account.clone(),
                history: VecDeque::new(),
            },
        );
        Ok((account, true))
    }

    async fn find(&self, wallet: &WalletKey) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().expect("account map poisoned");
        Ok(accounts.get(wallet.as_str()).map(|s| s.account.clone()))
    }

    async fn apply_settlement(
        &self,
        wallet: &WalletKey,
        expected_version: i64,
        update: SettlementUpdate,
    ) -> Result<Option<Account>> {
        let mut accounts = self.accounts.lock().expect("account map poisoned");
        let Some(stored) = accounts.get_mut(wallet.as_str()) else {
            return Ok(None);
        };
        if stored.account.version != expected_version {
            return Ok(None);
        }

        let account = &mut stored.account;
        account.balance = update.new_balance;
        account.current_streak = update.new_streak;
        account.total_wagers += 1;
        if update.record.is_winner {
            account.total_wins += 1;
        } else {
            account.total_losses += 1;
        }
        if update.earned_delta > 0.0 {
            account.total_earned += update.earned_delta;
        }
        account.version += 1;

        stored.history.push_front(update.record);
        stored.history.truncate(HISTORY_CAPACITY);

        Ok(Some(stored.account.clone()))
    }

    async fn claim_bonus(&self, wallet: &WalletKey, now: DateTime<Utc>) -> Result<BonusClaim> {
        let mut accounts = self.accounts.lock().expect("account map poisoned");
        let Some(stored) = accounts.get_mut(wallet.as_str()) else {
            return Ok(BonusClaim::NotFound);
        };

        let account = &mut stored.account;
        if !bonus::can_claim(account.last_bonus_claimed_at, now) {
            return Ok(BonusClaim::AlreadyClaimedToday);
        }

        let amount = bonus::bonus_amount(account.current_streak);
        account.balance += amount;
        account.total_earned += amount;
        account.last_bonus_claimed_at = Some(now);
        account.version += 1;

        Ok(BonusClaim::Claimed {
            amount,
            account: account.clone(),
        })
    }

    async fn history(&self, wallet: &WalletKey, limit: usize) -> Result<Vec<WagerRecord>> {
        let accounts = self.accounts.lock().expect("account map poisoned");
        Ok(accounts
            .get(wallet.as_str())
            .map(|s| s.history.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn leaderboard(&self, sort: LeaderboardSort, limit: usize) -> Result<Vec<Account>> {
        let accounts = self.accounts.lock().expect("account map poisoned");
        let mut rows: Vec<Account> = accounts.values().map(|s| s.account.clone()).collect();

        // Tie-breakers mirror the ranking semantics of the read-side views:
        // secondary keys keep the ordering stable for equal primary scores.
        match sort {
            LeaderboardSort::Points => rows.sort_by(|a, b| {
                b.balance
                    .total_cmp(&a.balance)
                    .then(b.total_wins.cmp(&a.total_wins))
            }),
            LeaderboardSort::Wins => rows.sort_by(|a, b| {
                b.total_wins
                    .cmp(&a.total_wins)
                    .then(a.total_wagers.cmp(&b.total_wagers))
            }),
            LeaderboardSort::Streak => rows.sort_by(|a, b| {
                b.current_streak
                    .cmp(&a.current_streak)
                    .then(b.total_wins.cmp(&a.total_wins))
            }),
            LeaderboardSort::Earned => rows.sort_by(|a, b| {
                b.total_earned
                    .total_cmp(&a.total_earned)
                    .then(b.balance.total_cmp(&a.balance))
            }),
        }

        rows.truncate(limit);
        Ok(rows)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::settlement;
    use shared::{CoinSide, Leverage, WagerAmount};

    fn wallet(s: &str) -> WalletKey {
        WalletKey::new(s).unwrap()
    }

    fn winning_update(account: &Account, stake: f64) -> SettlementUpdate {
        let s = settlement::settle(
            account.balance,
            account.current_streak,
            WagerAmount::new(stake).unwrap(),
            CoinSide::Heads,
            Leverage::new(2.0).unwrap(),
            CoinSide::Heads,
            Utc::now(),
        );
        SettlementUpdate {
            record: s.record,
            new_balance: s.new_balance,
            new_streak: s.new_streak,
            earned_delta: s.earned_delta,
        }
    }

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let repo = MemoryAccountRepository::new();
        let w = wallet("0xAAA");

        let (first, created) = repo.get_or_create(&w, 1000.0).await.unwrap();
        assert!(created);
        assert_eq!(first.balance, 1000.0);

        let (second, created) = repo.get_or_create(&w, 1000.0).await.unwrap();
        assert!(!created);
        assert_eq!(second.wallet, first.wallet);
    }

    #[tokio::test]
    async fn stale_version_commits_nothing() {
        let repo = MemoryAccountRepository::new();
        let w = wallet("0xbbb");
        let (account, _) = repo.get_or_create(&w, 1000.0).await.unwrap();

        let update = winning_update(&account, 100.0);
        let applied = repo
            .apply_settlement(&w, account.version + 1, update)
            .await
            .unwrap();
        assert!(applied.is_none());

        let unchanged = repo.find(&w).await.unwrap().unwrap();
        assert_eq!(unchanged, account);
        assert!(repo.history(&w, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn settlement_bumps_version_and_counters() {
        let repo = MemoryAccountRepository::new();
        let w = wallet("0xccc");
        let (account, _) = repo.get_or_create(&w, 1000.0).await.unwrap();

        let update = winning_update(&account, 100.0);
        let after = repo
            .apply_settlement(&w, account.version, update)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(after.version, account.version + 1);
        assert_eq!(after.total_wagers, 1);
        assert_eq!(after.total_wins, 1);
        assert_eq!(after.total_losses, 0);
        assert_eq!(after.current_streak, 1);
        assert_eq!(repo.history(&w, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn history_is_bounded_and_keeps_the_newest() {
        let repo = MemoryAccountRepository::new();
        let w = wallet("0xddd");
        let (mut account, _) = repo.get_or_create(&w, 1000.0).await.unwrap();

        let total = HISTORY_CAPACITY + 5;
        for _ in 0..total {
            let update = winning_update(&account, 1.0);
            account = repo
                .apply_settlement(&w, account.version, update)
                .await
                .unwrap()
                .unwrap();
        }

        let history = repo.history(&w, HISTORY_CAPACITY * 2).await.unwrap();
        assert_eq!(history.len(), HISTORY_CAPACITY);

        // Newest first: the head of the log is the last record appended.
        let newest = &history[0];
        let oldest = history.last().unwrap();
        assert!(newest.occurred_at >= oldest.occurred_at);
        assert_eq!(account.total_wagers as usize, total);
    }

    #[tokio::test]
    async fn leaderboard_orderings() {
        let repo = MemoryAccountRepository::new();
        for (name, balance) in [("0xa", 500.0), ("0xb", 1500.0), ("0xc", 1000.0)] {
            let w = wallet(name);
            repo.get_or_create(&w, balance).await.unwrap();
        }

        let by_points = repo.leaderboard(LeaderboardSort::Points, 10).await.unwrap();
        let wallets: Vec<&str> = by_points.iter().map(|a| a.wallet.as_str()).collect();
        assert_eq!(wallets, vec!["0xb", "0xc", "0xa"]);

        let top_two = repo.leaderboard(LeaderboardSort::Points, 2).await.unwrap();
        assert_eq!(top_two.len(), 2);
    }
}
