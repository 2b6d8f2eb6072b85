use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use shared::{WalletKey, DASHBOARD_WINDOW_DAYS, HISTORY_CAPACITY, RECENT_GAMES_LIMIT};
use std::collections::BTreeMap;

use crate::{
    domain::{Account, WagerRecord},
    errors::{AppError, Result},
    state::AppState,
};

use super::accounts::WalletQuery;
use super::leaderboard::win_rate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_wagers: u64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub win_rate: f64,
    pub current_points: f64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_points_won: f64,
    pub total_points_lost: f64,
    pub biggest_win: Option<WagerRecord>,
}

/// Per-day aggregate over the recent window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub wins: u64,
    pub losses: u64,
    pub points_delta: f64,
}

/// Per-hour-of-day aggregate over the retained history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: u32,
    pub wins: u64,
    pub losses: u64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub day_breakdown: Vec<DayBucket>,
    pub hour_breakdown: Vec<HourBucket>,
    pub recent_games: Vec<WagerRecord>,
}

/// Aggregate the retained history into the dashboard view.
///
/// `history` is newest-first, as the repository returns it. Best-streak is
/// computed over the retained window only; a streak that started before
/// the oldest retained record is counted from where the log picks it up.
pub fn build_dashboard(
    account: &Account,
    history: &[WagerRecord],
    now: DateTime<Utc>,
) -> DashboardResponse {
    let window_start = now - Duration::days(DASHBOARD_WINDOW_DAYS);

    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for game in history.iter().filter(|g| g.occurred_at >= window_start) {
        let date = game.occurred_at.date_naive();
        let bucket = days.entry(date).or_insert(DayBucket {
            date,
            wins: 0,
            losses: 0,
            points_delta: 0.0,
        });
        if game.is_winner {
            bucket.wins += 1;
        } else {
            bucket.losses += 1;
        }
        bucket.points_delta += game.points_delta;
    }

    let mut hours: Vec<HourBucket> = (0..24)
        .map(|hour| HourBucket {
            hour,
            wins: 0,
            losses: 0,
            count: 0,
        })
        .collect();
    for game in history {
        let bucket = &mut hours[game.occurred_at.hour() as usize];
        bucket.count += 1;
        if game.is_winner {
            bucket.wins += 1;
        } else {
            bucket.losses += 1;
        }
    }

    // Oldest-to-newest pass for the best run of consecutive wins.
    let mut best_streak = 0u32;
    let mut run = 0u32;
    for game in history.iter().rev() {
        if game.is_winner {
            run += 1;
            best_streak = best_streak.max(run);
        } else {
            run = 0;
        }
    }

    let total_points_won: f64 = history
        .iter()
        .filter(|g| g.is_winner)
        .map(|g| g.points_delta)
        .sum();
    let total_points_lost: f64 = history
        .iter()
        .filter(|g| !g.is_winner)
        .map(|g| g.points_delta.abs())
        .sum();
    let biggest_win = history
        .iter()
        .filter(|g| g.is_winner)
        .max_by(|a, b| a.points_delta.total_cmp(&b.points_delta))
        .cloned();

    DashboardResponse {
        stats: DashboardStats {
            total_wagers: account.total_wagers,
            total_wins: account.total_wins,
            total_losses: account.total_losses,
            win_rate: win_rate(account.total_wins, account.total_wagers),
            current_points: account.balance,
            current_streak: account.current_streak,
            best_streak,
            total_points_won,
            total_points_lost,
            biggest_win,
        },
        day_breakdown: days.into_values().collect(),
        hour_breakdown: hours,
        recent_games: history.iter().take(RECENT_GAMES_LIMIT).cloned().collect(),
    }
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<WalletQuery>,
) -> Result<Json<DashboardResponse>> {
    let wallet = WalletKey::new(&query.wallet_address)?;

    let span = tracing::info_span!("get_dashboard", %wallet);
    let _enter = span.enter();

    let repo = state.engine.repository();
    let account = repo
        .find(&wallet)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {} not found", wallet)))?;
    let history = repo.history(&wallet, HISTORY_CAPACITY).await?;

    Ok(Json(build_dashboard(&account, &history, Utc::now())))
}
