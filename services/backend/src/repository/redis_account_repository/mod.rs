//! Redis-based AccountRepository implementation
//!
//! One hash per account, a bounded list for wager history, and sorted
//! sets for the leaderboard orderings. Every mutation runs as a Lua
//! script so per-account writes are serialized by the store.

mod deserialization;
mod keys;
mod lua_scripts;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};
use shared::{WalletKey, DAILY_BONUS_BASE, DAILY_BONUS_PER_STREAK, HISTORY_CAPACITY};

use crate::domain::{Account, LeaderboardSort, WagerRecord};
use crate::errors::{AppError, Result};

use super::account_repository::{AccountRepository, BonusClaim, SettlementUpdate};

pub use deserialization::load_account_from_hash;
pub use keys::*;
pub use lua_scripts::*;

pub struct RedisAccountRepository {
    redis: ConnectionManager,
}

impl RedisAccountRepository {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    async fn load_required(&self, wallet: &WalletKey) -> Result<Account> {
        let mut redis_conn = self.redis.clone();
        load_account_from_hash(&mut redis_conn, wallet)
            .await?
            .ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "Account {} vanished between write and read-back",
                    wallet
                ))
            })
    }
}

#[async_trait]
impl AccountRepository for RedisAccountRepository {
    async fn get_or_create(
        &self,
        wallet: &WalletKey,
        starting_balance: f64,
    ) -> Result<(Account, bool)> {
        let mut redis_conn = self.redis.clone();
        let created: i32 = Script::new(CREATE_ACCOUNT_SCRIPT)
            .key(account_key(wallet))
            .key(leaderboard_key(LeaderboardSort::Points))
            .key(leaderboard_key(LeaderboardSort::Wins))
            .key(leaderboard_key(LeaderboardSort::Streak))
            .key(leaderboard_key(LeaderboardSort::Earned))
            .arg(wallet.as_str())
            .arg(starting_balance)
            .arg(Utc::now().timestamp_millis())
            .invoke_async(&mut redis_conn)
            .await?;

        let account = self.load_required(wallet).await?;
        Ok((account, created == 1))
    }

    async fn find(&self, wallet: &WalletKey) -> Result<Option<Account>> {
        let mut redis_conn = self.redis.clone();
        load_account_from_hash(&mut redis_conn, wallet).await
    }

    async fn apply_settlement(
        &self,
        wallet: &WalletKey,
        expected_version: i64,
        update: SettlementUpdate,
    ) -> Result<Option<Account>> {
        let record_json = serde_json::to_string(&update.record)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Record encoding failed: {}", e)))?;

        let mut redis_conn = self.redis.clone();
        let applied: i32 = Script::new(SETTLE_SCRIPT)
            .key(account_key(wallet))
            .key(history_key(wallet))
            .key(leaderboard_key(LeaderboardSort::Points))
            .key(leaderboard_key(LeaderboardSort::Wins))
            .key(leaderboard_key(LeaderboardSort::Streak))
            .key(leaderboard_key(LeaderboardSort::Earned))
            .arg(expected_version)
            .arg(update.new_balance)
            .arg(update.new_streak)
            .arg(if update.record.is_winner { "1" } else { "0" })
            .arg(update.earned_delta)
            .arg(record_json)
            .arg(HISTORY_CAPACITY)
            .arg(wallet.as_str())
            .invoke_async(&mut redis_conn)
            .await?;

        if applied != 1 {
            return Ok(None);
        }
        Ok(Some(self.load_required(wallet).await?))
    }

    async fn claim_bonus(&self, wallet: &WalletKey, now: DateTime<Utc>) -> Result<BonusClaim> {
        let today = now.date_naive().to_string();

        let mut redis_conn = self.redis.clone();
        let reply: Vec<String> = Script::new(CLAIM_BONUS_SCRIPT)
            .key(account_key(wallet))
            .key(leaderboard_key(LeaderboardSort::Points))
            .key(leaderboard_key(LeaderboardSort::Earned))
            .arg(today)
            .arg(now.timestamp_millis())
            .arg(DAILY_BONUS_BASE)
            .arg(DAILY_BONUS_PER_STREAK)
            .arg(wallet.as_str())
            .invoke_async(&mut redis_conn)
            .await?;

        match reply.first().map(String::as_str) {
            Some("claimed") => {
                let amount: f64 = reply
                    .get(1)
                    .and_then(|raw| raw.parse().ok())
                    .ok_or_else(|| {
                        AppError::Internal(anyhow::anyhow!("Claim script returned no amount"))
                    })?;
                let account = self.load_required(wallet).await?;
                Ok(BonusClaim::Claimed { amount, account })
            }
            Some("already_claimed") => Ok(BonusClaim::AlreadyClaimedToday),
            Some("not_found") => Ok(BonusClaim::NotFound),
            other => Err(AppError::Internal(anyhow::anyhow!(
                "Unexpected claim script reply: {:?}",
                other
            ))),
        }
    }

    async fn history(&self, wallet: &WalletKey, limit: usize) -> Result<Vec<WagerRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut redis_conn = self.redis.clone();
        let raw: Vec<String> = redis_conn
            .lrange(history_key(wallet), 0, limit as isize - 1)
            .await?;

        raw.iter()
            .map(|entry| {
                serde_json::from_str(entry).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!(
                        "Corrupt history entry for {}: {}",
                        wallet,
                        e
                    ))
                })
            })
            .collect()
    }

    async fn leaderboard(&self, sort: LeaderboardSort, limit: usize) -> Result<Vec<Account>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut redis_conn = self.redis.clone();
        let wallets: Vec<String> = redis_conn
            .zrevrange(leaderboard_key(sort), 0, limit as isize - 1)
            .await?;

        let mut rows = Vec::with_capacity(wallets.len());
        for raw in wallets {
            // Index entries are written by the same scripts that write the
            // hash, so a missing account here is a stale index row; skip it.
            let Ok(wallet) = WalletKey::new(&raw) else {
                continue;
            };
            if let Some(account) = load_account_from_hash(&mut redis_conn, &wallet).await? {
                rows.push(account);
            }
        }
        Ok(rows)
    }

    async fn ping(&self) -> Result<()> {
        let mut redis_conn = self.redis.clone();
        let _: String = redis::cmd("PING").query_async(&mut redis_conn).await?;
        Ok(())
    }
}
