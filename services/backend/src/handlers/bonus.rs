use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    domain::{BonusStatusResponse, ClaimBonusRequest, ClaimBonusResponse},
    errors::Result,
    extractors::ValidatedJson,
    state::AppState,
};

use super::accounts::WalletQuery;

pub async fn check_bonus(
    State(state): State<AppState>,
    Query(query): Query<WalletQuery>,
) -> Result<Json<BonusStatusResponse>> {
    let status = state.engine.check_daily_bonus(&query.wallet_address).await?;
    Ok(Json(status))
}

pub async fn claim_bonus(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ClaimBonusRequest>,
) -> Result<Json<ClaimBonusResponse>> {
    let span = tracing::info_span!("claim_bonus", wallet = %req.wallet_address);
    let _enter = span.enter();

    let response = state.engine.claim_daily_bonus(&req.wallet_address).await?;
    Ok(Json(response))
}
