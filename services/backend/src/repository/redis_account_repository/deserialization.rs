//! Deserialization of accounts from Redis hash storage
//!
//! The creation script writes every field, so decoding is strict: a hash
//! missing a required field is corrupt and surfaces as an internal error
//! rather than being papered over with defaults.

use chrono::{DateTime, TimeZone, Utc};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use shared::WalletKey;
use std::collections::HashMap;

use super::keys::account_key;
use crate::domain::Account;
use crate::errors::{AppError, Result};

fn required<'a>(
    map: &'a HashMap<String, String>,
    wallet: &WalletKey,
    field: &str,
) -> Result<&'a str> {
    map.get(field).map(String::as_str).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "Account {} is missing field '{}'",
            wallet,
            field
        ))
    })
}

fn parse<T: std::str::FromStr>(raw: &str, wallet: &WalletKey, field: &str) -> Result<T> {
    raw.parse::<T>().map_err(|_| {
        AppError::Internal(anyhow::anyhow!(
            "Account {} has invalid '{}': '{}'",
            wallet,
            field,
            raw
        ))
    })
}

fn timestamp_ms(ms: i64, wallet: &WalletKey, field: &str) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single().ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "Account {} has out-of-range '{}': {}",
            wallet,
            field,
            ms
        ))
    })
}

/// Load an account from hash storage.
///
/// Returns `Ok(None)` when the wallet has never been registered.
pub async fn load_account_from_hash(
    redis: &mut ConnectionManager,
    wallet: &WalletKey,
) -> Result<Option<Account>> {
    let key = account_key(wallet);
    let map: HashMap<String, String> = redis.hgetall(&key).await?;

    if map.is_empty() {
        return Ok(None);
    }

    let created_at_ms: i64 = parse(required(&map, wallet, "created_at_ms")?, wallet, "created_at_ms")?;
    let last_bonus_claimed_at = match required(&map, wallet, "last_bonus_claimed_ms")? {
        "" => None,
        raw => {
            let ms: i64 = parse(raw, wallet, "last_bonus_claimed_ms")?;
            Some(timestamp_ms(ms, wallet, "last_bonus_claimed_ms")?)
        }
    };

    Ok(Some(Account {
        wallet: required(&map, wallet, "wallet")?.to_string(),
        balance: parse(required(&map, wallet, "balance")?, wallet, "balance")?,
        total_wins: parse(required(&map, wallet, "total_wins")?, wallet, "total_wins")?,
        total_losses: parse(required(&map, wallet, "total_losses")?, wallet, "total_losses")?,
        total_wagers: parse(required(&map, wallet, "total_wagers")?, wallet, "total_wagers")?,
        current_streak: parse(
            required(&map, wallet, "current_streak")?,
            wallet,
            "current_streak",
        )?,
        total_earned: parse(required(&map, wallet, "total_earned")?, wallet, "total_earned")?,
        last_bonus_claimed_at,
        created_at: timestamp_ms(created_at_ms, wallet, "created_at_ms")?,
        version: parse(required(&map, wallet, "version")?, wallet, "version")?,
    }))
}
