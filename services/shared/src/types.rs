/// Type-safe wrappers for domain primitives
///
/// These types enforce validation at construction time so the settlement
/// engine never operates on an unchecked wallet key, stake, or leverage.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Wallet address must not be empty")]
    EmptyWallet,

    #[error("Invalid wager amount: {0} (must be a finite number greater than zero)")]
    InvalidWagerAmount(f64),

    #[error("Invalid leverage: {0} (must be between {MIN_LEVERAGE}x and {MAX_LEVERAGE}x)")]
    LeverageOutOfRange(f64),

    #[error("Invalid coin side: '{0}' (expected 'heads' or 'tails')")]
    InvalidCoinSide(String),
}

/// Normalized wallet identifier.
///
/// Wallet addresses arrive in mixed case from wallet providers; the ledger
/// is keyed by the trimmed, lower-cased form, fixed here once so lookups
/// and writes can never disagree on the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct WalletKey(String);

impl WalletKey {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::EmptyWallet);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for WalletKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Display for WalletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One face of the coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoinSide::Heads => "heads",
            CoinSide::Tails => "tails",
        }
    }
}

impl FromStr for CoinSide {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heads" => Ok(CoinSide::Heads),
            "tails" => Ok(CoinSide::Tails),
            other => Err(ValidationError::InvalidCoinSide(other.to_string())),
        }
    }
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated stake (the margin): finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct WagerAmount(f64);

impl WagerAmount {
    pub fn new(amount: f64) -> Result<Self, ValidationError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidWagerAmount(amount));
        }
        Ok(Self(amount))
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

/// Validated leverage multiplier in [1, 100].
///
/// Leverage scales win profit only; loss exposure stays at the margin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Leverage(f64);

impl Leverage {
    pub fn new(leverage: f64) -> Result<Self, ValidationError> {
        if !leverage.is_finite() || !(MIN_LEVERAGE..=MAX_LEVERAGE).contains(&leverage) {
            return Err(ValidationError::LeverageOutOfRange(leverage));
        }
        Ok(Self(leverage))
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Default for Leverage {
    fn default() -> Self {
        Self(DEFAULT_LEVERAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_key_normalizes_case_and_whitespace() {
        let key = WalletKey::new("  0xAbCdEf1234  ").unwrap();
        assert_eq!(key.as_str(), "0xabcdef1234");
    }

    #[test]
    fn wallet_key_rejects_empty() {
        assert_eq!(WalletKey::new("   "), Err(ValidationError::EmptyWallet));
    }

    #[test]
    fn coin_side_parses_exact_strings_only() {
        assert_eq!("heads".parse::<CoinSide>().unwrap(), CoinSide::Heads);
        assert_eq!("tails".parse::<CoinSide>().unwrap(), CoinSide::Tails);
        assert!("Heads".parse::<CoinSide>().is_err());
        assert!("edge".parse::<CoinSide>().is_err());
    }

    #[test]
    fn wager_amount_bounds() {
        assert!(WagerAmount::new(0.01).is_ok());
        assert!(WagerAmount::new(0.0).is_err());
        assert!(WagerAmount::new(-5.0).is_err());
        assert!(WagerAmount::new(f64::NAN).is_err());
        assert!(WagerAmount::new(f64::INFINITY).is_err());
    }

    #[test]
    fn leverage_bounds_inclusive() {
        assert!(Leverage::new(1.0).is_ok());
        assert!(Leverage::new(100.0).is_ok());
        assert!(Leverage::new(0.99).is_err());
        assert!(Leverage::new(100.01).is_err());
        assert!(Leverage::new(f64::NAN).is_err());
        assert_eq!(Leverage::default().as_f64(), DEFAULT_LEVERAGE);
    }
}
