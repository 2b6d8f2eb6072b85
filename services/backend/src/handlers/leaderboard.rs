use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT};

use crate::{
    domain::{Account, LeaderboardEntry, LeaderboardResponse, LeaderboardSort},
    errors::{AppError, Result},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub sort: Option<String>,
    pub limit: Option<usize>,
}

/// Win rate as a percentage, rounded to one decimal.
pub fn win_rate(total_wins: u64, total_wagers: u64) -> f64 {
    if total_wagers == 0 {
        return 0.0;
    }
    let rate = total_wins as f64 / total_wagers as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

fn entry(rank: usize, account: &Account) -> LeaderboardEntry {
    LeaderboardEntry {
        rank,
        wallet_address: account.wallet.clone(),
        points: account.balance,
        total_wins: account.total_wins,
        total_losses: account.total_losses,
        total_wagers: account.total_wagers,
        current_streak: account.current_streak,
        total_earned: account.total_earned,
        win_rate: win_rate(account.total_wins, account.total_wagers),
    }
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>> {
    let sort = match query.sort.as_deref() {
        None => LeaderboardSort::Points,
        Some(raw) => LeaderboardSort::parse(raw)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown leaderboard sort: '{}'", raw)))?,
    };
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
        .clamp(1, MAX_LEADERBOARD_LIMIT);

    let span = tracing::info_span!("get_leaderboard", sort = sort.as_str(), limit);
    let _enter = span.enter();

    let accounts = state.engine.repository().leaderboard(sort, limit).await?;
    let leaderboard = accounts
        .iter()
        .enumerate()
        .map(|(i, account)| entry(i + 1, account))
        .collect();

    Ok(Json(LeaderboardResponse { leaderboard, sort }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_rounds_to_one_decimal() {
        assert_eq!(win_rate(0, 0), 0.0);
        assert_eq!(win_rate(1, 2), 50.0);
        assert_eq!(win_rate(1, 3), 33.3);
        assert_eq!(win_rate(2, 3), 66.7);
    }
}
