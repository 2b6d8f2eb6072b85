use axum::{extract::State, Json};

use crate::{
    domain::{PlaceWagerRequest, WagerResponse},
    errors::Result,
    extractors::ValidatedJson,
    state::AppState,
};

pub async fn place_wager(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PlaceWagerRequest>,
) -> Result<Json<WagerResponse>> {
    // One span for the whole settlement lifecycle
    let span = tracing::info_span!(
        "place_wager",
        wallet = %req.wallet_address,
        wager.amount = req.wager_amount,
        wager.side = %req.chosen_side,
    );
    let _enter = span.enter();

    let response = state.engine.place_wager(&req).await?;
    Ok(Json(response))
}
