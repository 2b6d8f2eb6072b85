use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    domain::{AccountSummary, RegisterAccountRequest},
    errors::Result,
    extractors::ValidatedJson,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct WalletQuery {
    pub wallet_address: String,
}

/// Lookup-or-create used by the wallet-connect flow.
pub async fn get_account(
    State(state): State<AppState>,
    Query(query): Query<WalletQuery>,
) -> Result<Json<AccountSummary>> {
    let (account, _) = state
        .engine
        .get_or_create_account(&query.wallet_address)
        .await?;
    Ok(Json(AccountSummary::from(&account)))
}

pub async fn register_account(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterAccountRequest>,
) -> Result<(StatusCode, Json<AccountSummary>)> {
    let span = tracing::info_span!("register_account", wallet = %req.wallet_address);
    let _enter = span.enter();

    let (account, created) = state
        .engine
        .get_or_create_account(&req.wallet_address)
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(AccountSummary::from(&account))))
}
