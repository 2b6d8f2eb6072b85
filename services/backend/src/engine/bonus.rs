//! Daily bonus math and calendar-day eligibility
//!
//! Eligibility is a calendar-date comparison, not a rolling 24h window.
//! All day boundaries are UTC so check and claim can never disagree
//! across server locales.

use chrono::{DateTime, Utc};
use shared::{DAILY_BONUS_BASE, DAILY_BONUS_PER_STREAK};

/// Bonus credited on a successful claim: base 50 plus 10 per current
/// win streak, uncapped.
pub fn bonus_amount(streak: u32) -> f64 {
    DAILY_BONUS_BASE + DAILY_BONUS_PER_STREAK * streak as f64
}

/// True when both timestamps fall on the same UTC calendar date.
pub fn same_utc_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// A bonus is claimable when it has never been claimed, or when the last
/// claim was on an earlier UTC date.
pub fn can_claim(last_claimed_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_claimed_at {
        None => true,
        Some(last) => !same_utc_day(last, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bonus_scales_with_streak() {
        assert_eq!(bonus_amount(0), 50.0);
        assert_eq!(bonus_amount(1), 60.0);
        assert_eq!(bonus_amount(3), 80.0);
        assert_eq!(bonus_amount(25), 300.0);
    }

    #[test]
    fn same_day_boundary_is_calendar_not_rolling() {
        let late = Utc.with_ymd_and_hms(2026, 8, 5, 23, 59, 0).unwrap();
        let early_next = Utc.with_ymd_and_hms(2026, 8, 6, 0, 1, 0).unwrap();
        let same_day = Utc.with_ymd_and_hms(2026, 8, 5, 0, 5, 0).unwrap();

        // Two minutes apart but across midnight: different days.
        assert!(!same_utc_day(late, early_next));
        // Almost 24h apart but the same date: same day.
        assert!(same_utc_day(late, same_day));
    }

    #[test]
    fn claim_eligibility() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let this_morning = Utc.with_ymd_and_hms(2026, 8, 6, 0, 30, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2026, 8, 5, 23, 59, 59).unwrap();

        assert!(can_claim(None, now));
        assert!(can_claim(Some(yesterday), now));
        assert!(!can_claim(Some(this_morning), now));
        assert!(!can_claim(Some(now), now));
    }
}
