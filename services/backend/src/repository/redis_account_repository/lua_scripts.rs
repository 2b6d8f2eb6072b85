//! Redis Lua scripts for atomic ledger mutations
//!
//! Every mutating operation on an account is a single script invocation,
//! so the store serializes concurrent writers per account and a failed
//! precondition commits nothing.

/// Lua script to create an account hash if it does not exist yet
///
/// Keys: [account_key, lb_points, lb_wins, lb_streak, lb_earned]
/// Args: [wallet, starting_balance, now_ms]
///
/// Returns: 1 if created, 0 if the account already existed
pub const CREATE_ACCOUNT_SCRIPT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
  return 0
end

redis.call('HSET', KEYS[1],
  'wallet', ARGV[1],
  'balance', ARGV[2],
  'total_wins', '0',
  'total_losses', '0',
  'total_wagers', '0',
  'current_streak', '0',
  'total_earned', '0',
  'last_bonus_claimed_ms', '',
  'last_bonus_day', '',
  'created_at_ms', ARGV[3],
  'version', '0'
)

redis.call('ZADD', KEYS[2], tonumber(ARGV[2]), ARGV[1])
redis.call('ZADD', KEYS[3], 0, ARGV[1])
redis.call('ZADD', KEYS[4], 0, ARGV[1])
redis.call('ZADD', KEYS[5], 0, ARGV[1])

return 1
"#;

/// Lua script applying one settlement as a guarded compound write
///
/// Keys: [account_key, history_key, lb_points, lb_wins, lb_streak, lb_earned]
/// Args: [expected_version, new_balance, new_streak, won, earned_delta,
///        record_json, history_capacity, wallet]
///
/// Returns: 1 if applied, 0 if the version check missed (nothing written)
///
/// The version compare-and-set rejects any write computed against a stale
/// read; the history list is trimmed to capacity in the same transaction.
pub const SETTLE_SCRIPT: &str = r#"
local current = tonumber(redis.call('HGET', KEYS[1], 'version') or '-1')
if current ~= tonumber(ARGV[1]) then
  return 0
end

redis.call('HSET', KEYS[1],
  'balance', ARGV[2],
  'current_streak', ARGV[3]
)
redis.call('HINCRBY', KEYS[1], 'total_wagers', 1)

local wins
if ARGV[4] == '1' then
  wins = redis.call('HINCRBY', KEYS[1], 'total_wins', 1)
else
  redis.call('HINCRBY', KEYS[1], 'total_losses', 1)
  wins = tonumber(redis.call('HGET', KEYS[1], 'total_wins') or '0')
end

if tonumber(ARGV[5]) > 0 then
  redis.call('HINCRBYFLOAT', KEYS[1], 'total_earned', ARGV[5])
end
redis.call('HINCRBY', KEYS[1], 'version', 1)

redis.call('LPUSH', KEYS[2], ARGV[6])
redis.call('LTRIM', KEYS[2], 0, tonumber(ARGV[7]) - 1)

local earned = redis.call('HGET', KEYS[1], 'total_earned')
redis.call('ZADD', KEYS[3], tonumber(ARGV[2]), ARGV[8])
redis.call('ZADD', KEYS[4], wins, ARGV[8])
redis.call('ZADD', KEYS[5], tonumber(ARGV[3]), ARGV[8])
redis.call('ZADD', KEYS[6], tonumber(earned), ARGV[8])

return 1
"#;

/// Lua script for the atomic daily-bonus claim
///
/// Keys: [account_key, lb_points, lb_earned]
/// Args: [today_utc_date, now_ms, bonus_base, bonus_per_streak, wallet]
///
/// Returns: ['not_found'] | ['already_claimed'] | ['claimed', amount]
///
/// The day gate and the credit happen in one step, and the amount is
/// computed from the streak the script reads, so a concurrent settlement
/// cannot split the eligibility check from the credit.
pub const CLAIM_BONUS_SCRIPT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 0 then
  return {'not_found'}
end

local claimed_day = redis.call('HGET', KEYS[1], 'last_bonus_day')
if claimed_day == ARGV[1] then
  return {'already_claimed'}
end

local streak = tonumber(redis.call('HGET', KEYS[1], 'current_streak') or '0')
local amount = tonumber(ARGV[3]) + tonumber(ARGV[4]) * streak

local balance = redis.call('HINCRBYFLOAT', KEYS[1], 'balance', amount)
local earned = redis.call('HINCRBYFLOAT', KEYS[1], 'total_earned', amount)
redis.call('HSET', KEYS[1],
  'last_bonus_claimed_ms', ARGV[2],
  'last_bonus_day', ARGV[1]
)
redis.call('HINCRBY', KEYS[1], 'version', 1)

redis.call('ZADD', KEYS[2], tonumber(balance), ARGV[5])
redis.call('ZADD', KEYS[3], tonumber(earned), ARGV[5])

return {'claimed', tostring(amount)}
"#;
