use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::CoinSide;
use uuid::Uuid;

/// Persistent per-wallet ledger record.
///
/// `version` is the store-side modification counter used for conditional
/// writes; it never leaves the service (see [`AccountSummary`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub wallet: String,
    pub balance: f64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub total_wagers: u64,
    pub current_streak: u32,
    pub total_earned: f64,
    pub last_bonus_claimed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub version: i64,
}

/// Public view of an account, returned by every mutating endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub wallet_address: String,
    pub balance: f64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub total_wagers: u64,
    pub current_streak: u32,
    pub total_earned: f64,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            wallet_address: account.wallet.clone(),
            balance: account.balance,
            total_wins: account.total_wins,
            total_losses: account.total_losses,
            total_wagers: account.total_wagers,
            current_streak: account.current_streak,
            total_earned: account.total_earned,
        }
    }
}

/// Immutable log entry for one settled coin flip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagerRecord {
    pub record_id: Uuid,
    pub outcome: CoinSide,
    pub chosen_side: CoinSide,
    pub wager_amount: f64,
    pub leverage: f64,
    pub points_delta: f64,
    pub is_winner: bool,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAccountRequest {
    pub wallet_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceWagerRequest {
    pub wallet_address: String,
    pub wager_amount: f64,
    pub chosen_side: String,
    pub leverage: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimBonusRequest {
    pub wallet_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WagerResponse {
    pub outcome: CoinSide,
    pub is_winner: bool,
    pub points_delta: f64,
    pub leverage: f64,
    pub streak: u32,
    pub streak_bonus: f64,
    pub account: AccountSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusStatusResponse {
    pub can_claim: bool,
    pub bonus_amount: f64,
    pub current_streak: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimBonusResponse {
    pub bonus_amount: f64,
    pub account: AccountSummary,
}

/// Leaderboard orderings. Each maps to a maintained ranking in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardSort {
    Points,
    Wins,
    Streak,
    Earned,
}

impl LeaderboardSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "points" => Some(Self::Points),
            "wins" => Some(Self::Wins),
            "streak" => Some(Self::Streak),
            "earned" => Some(Self::Earned),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Wins => "wins",
            Self::Streak => "streak",
            Self::Earned => "earned",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub wallet_address: String,
    pub points: f64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub total_wagers: u64,
    pub current_streak: u32,
    pub total_earned: f64,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub sort: LeaderboardSort,
}
