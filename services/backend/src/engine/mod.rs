//! Wager settlement and bonus engines
//!
//! Stateless orchestration over the injected ledger repository: validate,
//! read the account once, draw, compute, and issue a single conditional
//! write. All arithmetic lives in the pure submodules.

pub mod bonus;
pub mod rng;
pub mod settlement;

use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;

use shared::{CoinSide, Leverage, WagerAmount, WalletKey};

use crate::domain::{
    Account, AccountSummary, BonusStatusResponse, ClaimBonusResponse, PlaceWagerRequest,
    WagerResponse,
};
use crate::errors::{AppError, Result};
use crate::repository::{AccountRepository, BonusClaim, SettlementUpdate};

use rng::OutcomeSource;

pub struct SettlementEngine {
    repo: Arc<dyn AccountRepository>,
    outcomes: Arc<dyn OutcomeSource>,
    starting_balance: f64,
}

impl SettlementEngine {
    pub fn new(
        repo: Arc<dyn AccountRepository>,
        outcomes: Arc<dyn OutcomeSource>,
        starting_balance: f64,
    ) -> Self {
        Self {
            repo,
            outcomes,
            starting_balance,
        }
    }

    /// Read-side access for the aggregation endpoints and health probes.
    pub fn repository(&self) -> &dyn AccountRepository {
        self.repo.as_ref()
    }

    pub async fn get_or_create_account(&self, wallet_address: &str) -> Result<(Account, bool)> {
        let wallet = WalletKey::new(wallet_address)?;
        let (account, created) = self
            .repo
            .get_or_create(&wallet, self.starting_balance)
            .await?;
        if created {
            tracing::info!(wallet = %wallet, balance = account.balance, "Account created");
            metrics::counter!("accounts_created_total").increment(1);
        }
        Ok((account, created))
    }

    /// Settle one coin-flip wager.
    ///
    /// Validation happens before the draw; the draw happens before the
    /// write; the write is conditional on the version read. A missed
    /// condition means nothing was committed and surfaces as a conflict
    /// (a retry is a fresh wager with a fresh draw).
    pub async fn place_wager(&self, req: &PlaceWagerRequest) -> Result<WagerResponse> {
        let wallet = WalletKey::new(&req.wallet_address)?;
        let stake = WagerAmount::new(req.wager_amount)?;
        let chosen_side = CoinSide::from_str(&req.chosen_side)?;
        let leverage = match req.leverage {
            Some(value) => Leverage::new(value)?,
            None => Leverage::default(),
        };

        let account = self
            .repo
            .find(&wallet)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account {} not found", wallet)))?;

        if stake.as_f64() > account.balance {
            return Err(AppError::InsufficientBalance);
        }

        let outcome = self.outcomes.flip();
        let settlement = settlement::settle(
            account.balance,
            account.current_streak,
            stake,
            chosen_side,
            leverage,
            outcome,
            Utc::now(),
        );

        let update = SettlementUpdate {
            record: settlement.record.clone(),
            new_balance: settlement.new_balance,
            new_streak: settlement.new_streak,
            earned_delta: settlement.earned_delta,
        };

        let updated = self
            .repo
            .apply_settlement(&wallet, account.version, update)
            .await?
            .ok_or(AppError::WriteConflict)?;

        let result_label = if settlement.record.is_winner {
            "win"
        } else {
            "loss"
        };
        tracing::info!(
            wallet = %wallet,
            outcome = %outcome,
            result = result_label,
            points_delta = settlement.record.points_delta,
            streak = settlement.new_streak,
            "Wager settled"
        );
        metrics::counter!("wagers_settled_total", "result" => result_label).increment(1);

        Ok(WagerResponse {
            outcome,
            is_winner: settlement.record.is_winner,
            points_delta: settlement.record.points_delta,
            leverage: leverage.as_f64(),
            streak: settlement.new_streak,
            streak_bonus: settlement.streak_bonus,
            account: AccountSummary::from(&updated),
        })
    }

    /// Report claim eligibility without side effects. Unknown wallets see
    /// the base offer a fresh account would get.
    pub async fn check_daily_bonus(&self, wallet_address: &str) -> Result<BonusStatusResponse> {
        let wallet = WalletKey::new(wallet_address)?;
        let Some(account) = self.repo.find(&wallet).await? else {
            return Ok(BonusStatusResponse {
                can_claim: true,
                bonus_amount: bonus::bonus_amount(0),
                current_streak: 0,
            });
        };

        Ok(BonusStatusResponse {
            can_claim: bonus::can_claim(account.last_bonus_claimed_at, Utc::now()),
            bonus_amount: bonus::bonus_amount(account.current_streak),
            current_streak: account.current_streak,
        })
    }

    pub async fn claim_daily_bonus(&self, wallet_address: &str) -> Result<ClaimBonusResponse> {
        let wallet = WalletKey::new(wallet_address)?;
        match self.repo.claim_bonus(&wallet, Utc::now()).await? {
            BonusClaim::Claimed { amount, account } => {
                tracing::info!(wallet = %wallet, amount, "Daily bonus claimed");
                metrics::counter!("daily_bonuses_claimed_total").increment(1);
                Ok(ClaimBonusResponse {
                    bonus_amount: amount,
                    account: AccountSummary::from(&account),
                })
            }
            BonusClaim::AlreadyClaimedToday => Err(AppError::AlreadyClaimedToday),
            BonusClaim::NotFound => {
                Err(AppError::NotFound(format!("Account {} not found", wallet)))
            }
        }
    }
}
