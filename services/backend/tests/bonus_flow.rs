/// Daily bonus check/claim integration tests
mod common;

use common::{parse_error, register, test_server, wager};
use serde_json::{json, Value};
use shared::CoinSide;
use std::sync::Arc;

use backend::engine::rng::FixedOutcome;

#[tokio::test]
async fn unknown_wallet_sees_the_base_offer_but_cannot_claim() {
    let server = test_server(Arc::new(FixedOutcome(CoinSide::Heads)));

    let status = server
        .get("/api/bonus")
        .add_query_param("wallet_address", "0xNew")
        .await
        .json::<Value>();
    assert_eq!(status["can_claim"], true);
    assert_eq!(status["bonus_amount"].as_f64().unwrap(), 50.0);
    assert_eq!(status["current_streak"], 0);

    let response = server
        .post("/api/bonus/claim")
        .json(&json!({ "wallet_address": "0xNew" }))
        .await;
    assert_eq!(response.status_code().as_u16(), 404);
    let (code, _, _) = parse_error(&response.json::<Value>());
    assert_eq!(code, "NOT_FOUND_ACCOUNT");
}

#[tokio::test]
async fn claim_is_one_shot_per_calendar_day() {
    let server = test_server(Arc::new(FixedOutcome(CoinSide::Heads)));
    register(&server, "0xKate").await;

    let claim = server
        .post("/api/bonus/claim")
        .json(&json!({ "wallet_address": "0xKate" }))
        .await;
    assert_eq!(claim.status_code().as_u16(), 200);
    let claim = claim.json::<Value>();
    assert_eq!(claim["bonus_amount"].as_f64().unwrap(), 50.0);
    assert_eq!(claim["account"]["balance"].as_f64().unwrap(), 1050.0);

    // Second claim the same day is rejected and credits nothing.
    let second = server
        .post("/api/bonus/claim")
        .json(&json!({ "wallet_address": "0xKate" }))
        .await;
    assert_eq!(second.status_code().as_u16(), 400);
    let (code, _, category) = parse_error(&second.json::<Value>());
    assert_eq!(code, "VALIDATION_BONUS_ALREADY_CLAIMED");
    assert_eq!(category, "Validation");

    let account = server
        .get("/api/account")
        .add_query_param("wallet_address", "0xKate")
        .await
        .json::<Value>();
    assert_eq!(account["balance"].as_f64().unwrap(), 1050.0);

    let status = server
        .get("/api/bonus")
        .add_query_param("wallet_address", "0xKate")
        .await
        .json::<Value>();
    assert_eq!(status["can_claim"], false);
}

#[tokio::test]
async fn bonus_scales_with_the_current_streak() {
    let server = test_server(Arc::new(FixedOutcome(CoinSide::Heads)));
    register(&server, "0xLeo").await;

    for _ in 0..3 {
        wager(&server, "0xLeo", 10.0, "heads", None).await;
    }

    let status = server
        .get("/api/bonus")
        .add_query_param("wallet_address", "0xLeo")
        .await
        .json::<Value>();
    assert_eq!(status["current_streak"], 3);
    assert_eq!(status["bonus_amount"].as_f64().unwrap(), 80.0);

    let claim = server
        .post("/api/bonus/claim")
        .json(&json!({ "wallet_address": "0xLeo" }))
        .await
        .json::<Value>();
    assert_eq!(claim["bonus_amount"].as_f64().unwrap(), 80.0);
    assert_eq!(claim["account"]["current_streak"], 3);
}

#[tokio::test]
async fn bonus_counts_toward_total_earned() {
    let server = test_server(Arc::new(FixedOutcome(CoinSide::Heads)));
    register(&server, "0xMia").await;

    server
        .post("/api/bonus/claim")
        .json(&json!({ "wallet_address": "0xMia" }))
        .await;

    let account = server
        .get("/api/account")
        .add_query_param("wallet_address", "0xMia")
        .await
        .json::<Value>();
    assert_eq!(account["total_earned"].as_f64().unwrap(), 50.0);
}
