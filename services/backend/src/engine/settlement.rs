//! Pure settlement math
//!
//! Everything here is side-effect free: given the pre-wager account state,
//! the validated request, and the drawn outcome, compute the streak
//! transition, payout, and the immutable wager record. The repository
//! applies the result in one conditional write.

use chrono::{DateTime, Utc};
use shared::{CoinSide, Leverage, WagerAmount, STREAK_BONUS_CAP, STREAK_BONUS_STEP};
use uuid::Uuid;

use crate::domain::WagerRecord;

/// Computed effect of one settled wager, ready to be applied atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub record: WagerRecord,
    pub new_balance: f64,
    pub new_streak: u32,
    /// Profit amplifier from the post-settlement streak. 1.0 on a loss.
    pub streak_bonus: f64,
    /// Amount added to `total_earned` (the win profit; 0 on a loss).
    pub earned_delta: f64,
}

/// Profit multiplier for a given streak: 10% per consecutive win,
/// capped at 2x. The cap is applied before the multiplier touches profit.
pub fn streak_multiplier(streak: u32) -> f64 {
    (1.0 + STREAK_BONUS_STEP * streak as f64).min(STREAK_BONUS_CAP)
}

/// Streak transition: wins extend the streak, any loss resets it.
pub fn next_streak(current: u32, is_winner: bool) -> u32 {
    if is_winner {
        current + 1
    } else {
        0
    }
}

/// Settle one wager against the drawn outcome.
///
/// Win: profit = stake * (leverage - 1), amplified by the streak
/// multiplier of the *new* streak. The margin itself is never at stake on
/// a win (it stays on the books), so profit uses `leverage - 1`.
/// Loss: the margin is forfeited, nothing more.
pub fn settle(
    balance: f64,
    current_streak: u32,
    stake: WagerAmount,
    chosen_side: CoinSide,
    leverage: Leverage,
    outcome: CoinSide,
    occurred_at: DateTime<Utc>,
) -> Settlement {
    let is_winner = outcome == chosen_side;
    let new_streak = next_streak(current_streak, is_winner);

    let (points_delta, streak_bonus, earned_delta) = if is_winner {
        let multiplier = streak_multiplier(new_streak);
        let base_profit = stake.as_f64() * (leverage.as_f64() - 1.0);
        let profit = base_profit * multiplier;
        (profit, multiplier, profit)
    } else {
        (-stake.as_f64(), 1.0, 0.0)
    };

    let record = WagerRecord {
        record_id: Uuid::new_v4(),
        outcome,
        chosen_side,
        wager_amount: stake.as_f64(),
        leverage: leverage.as_f64(),
        points_delta,
        is_winner,
        occurred_at,
    };

    Settlement {
        record,
        new_balance: balance + points_delta,
        new_streak,
        streak_bonus,
        earned_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stake(v: f64) -> WagerAmount {
        WagerAmount::new(v).unwrap()
    }

    fn lev(v: f64) -> Leverage {
        Leverage::new(v).unwrap()
    }

    #[test]
    fn multiplier_is_exact_at_the_anchors() {
        assert_eq!(streak_multiplier(0), 1.0);
        assert_eq!(streak_multiplier(10), 2.0);
        assert_eq!(streak_multiplier(11), 2.0);
        assert_eq!(streak_multiplier(100), 2.0);
    }

    #[test]
    fn multiplier_grows_ten_percent_per_win() {
        assert!((streak_multiplier(1) - 1.1).abs() < 1e-12);
        assert!((streak_multiplier(5) - 1.5).abs() < 1e-12);
        assert!((streak_multiplier(9) - 1.9).abs() < 1e-12);
    }

    #[test]
    fn streak_transitions() {
        assert_eq!(next_streak(0, true), 1);
        assert_eq!(next_streak(7, true), 8);
        assert_eq!(next_streak(7, false), 0);
        assert_eq!(next_streak(0, false), 0);
    }

    #[test]
    fn winning_settlement_uses_new_streak_for_the_bonus() {
        // balance 1000, streak 0, wager 100 on heads at 3x, outcome heads:
        // base profit 100 * (3-1) = 200, streak becomes 1, multiplier 1.1,
        // profit 220, balance 1220.
        let now = Utc::now();
        let s = settle(
            1000.0,
            0,
            stake(100.0),
            CoinSide::Heads,
            lev(3.0),
            CoinSide::Heads,
            now,
        );
        assert!(s.record.is_winner);
        assert_eq!(s.new_streak, 1);
        assert!((s.record.points_delta - 220.0).abs() < 1e-9);
        assert!((s.new_balance - 1220.0).abs() < 1e-9);
        assert!((s.streak_bonus - 1.1).abs() < 1e-12);
        assert_eq!(s.earned_delta, s.record.points_delta);
        assert_eq!(s.record.occurred_at, now);
    }

    #[test]
    fn losing_settlement_forfeits_exactly_the_margin() {
        // Leverage must not scale the loss.
        let s = settle(
            1000.0,
            3,
            stake(200.0),
            CoinSide::Tails,
            lev(5.0),
            CoinSide::Heads,
            Utc::now(),
        );
        assert!(!s.record.is_winner);
        assert_eq!(s.record.points_delta, -200.0);
        assert_eq!(s.new_balance, 800.0);
        assert_eq!(s.new_streak, 0);
        assert_eq!(s.streak_bonus, 1.0);
        assert_eq!(s.earned_delta, 0.0);
    }

    #[test]
    fn one_x_leverage_win_is_a_balance_noop() {
        let s = settle(
            500.0,
            0,
            stake(50.0),
            CoinSide::Heads,
            lev(1.0),
            CoinSide::Heads,
            Utc::now(),
        );
        assert!(s.record.is_winner);
        assert_eq!(s.record.points_delta, 0.0);
        assert_eq!(s.new_balance, 500.0);
        assert_eq!(s.new_streak, 1);
    }

    #[test]
    fn capped_streak_pays_exactly_double_profit() {
        // Streak 9 going into the wager becomes 10, so the multiplier is
        // exactly 2.0 and profit is stake * (leverage - 1) * 2.
        let s = settle(
            10_000.0,
            9,
            stake(100.0),
            CoinSide::Tails,
            lev(2.0),
            CoinSide::Tails,
            Utc::now(),
        );
        assert_eq!(s.new_streak, 10);
        assert_eq!(s.streak_bonus, 2.0);
        assert!((s.record.points_delta - 200.0).abs() < 1e-9);
    }

    #[test]
    fn full_balance_wager_is_allowed_and_conserves_on_loss() {
        let s = settle(
            750.0,
            2,
            stake(750.0),
            CoinSide::Heads,
            lev(10.0),
            CoinSide::Tails,
            Utc::now(),
        );
        assert_eq!(s.new_balance, 0.0);
    }

    #[test]
    fn record_mirrors_the_request() {
        let s = settle(
            1000.0,
            0,
            stake(42.5),
            CoinSide::Tails,
            lev(7.0),
            CoinSide::Heads,
            Utc::now(),
        );
        assert_eq!(s.record.chosen_side, CoinSide::Tails);
        assert_eq!(s.record.outcome, CoinSide::Heads);
        assert_eq!(s.record.wager_amount, 42.5);
        assert_eq!(s.record.leverage, 7.0);
    }
}
