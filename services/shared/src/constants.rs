/// Shared constants for the points coin-flip betting system
///
/// This module centralizes all magic numbers and game parameters
/// to prevent inconsistencies between the engine, storage layer, and tests.

/// Starting point balance credited when an account is first registered.
///
/// Rationale: large enough to survive a losing streak at the default
/// leverage, small enough that the daily bonus stays meaningful.
pub const STARTING_BALANCE: f64 = 1_000.0;

/// Maximum number of wager records retained per account.
///
/// History is a fixed-capacity log: the newest record is prepended and
/// anything past this capacity is evicted, oldest first.
pub const HISTORY_CAPACITY: usize = 1_000;

/// Leverage applied when a wager request omits one.
pub const DEFAULT_LEVERAGE: f64 = 2.0;

/// Minimum accepted leverage (1x: winning returns the margin, no profit).
pub const MIN_LEVERAGE: f64 = 1.0;

/// Maximum accepted leverage.
///
/// Rationale: caps the payout a single flip can mint. Losses are always
/// limited to the margin regardless of leverage.
pub const MAX_LEVERAGE: f64 = 100.0;

/// Profit amplification per consecutive win (10% per streak step).
pub const STREAK_BONUS_STEP: f64 = 0.1;

/// Ceiling on the streak profit multiplier (2x, reached at a 10 streak).
pub const STREAK_BONUS_CAP: f64 = 2.0;

/// Base daily bonus in points.
pub const DAILY_BONUS_BASE: f64 = 50.0;

/// Additional daily bonus points per current win streak.
pub const DAILY_BONUS_PER_STREAK: f64 = 10.0;

/// Default number of rows returned by the leaderboard endpoint.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Upper bound on leaderboard rows per request.
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Number of games in the dashboard "recent games" slice.
pub const RECENT_GAMES_LIMIT: usize = 20;

/// Size of the dashboard per-day breakdown window, in days.
pub const DASHBOARD_WINDOW_DAYS: i64 = 30;
