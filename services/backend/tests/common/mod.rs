/// Common test utilities for the API integration tests
///
/// Tests run hermetically: the router is served in-process by axum-test
/// over the in-memory ledger, with the coin draw replaced by a scripted
/// source so outcomes are deterministic.
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use backend::config::Config;
use backend::engine::rng::OutcomeSource;
use backend::engine::SettlementEngine;
use backend::repository::MemoryAccountRepository;
use backend::state::AppState;

pub fn test_server(outcomes: Arc<dyn OutcomeSource>) -> TestServer {
    let engine = SettlementEngine::new(
        Arc::new(MemoryAccountRepository::new()),
        outcomes,
        1000.0,
    );
    let state = AppState::new(Config::default(), engine);
    TestServer::new(backend::build_router(state)).expect("Failed to start test server")
}

/// Register an account through the API and return its summary.
#[allow(dead_code)]
pub async fn register(server: &TestServer, wallet: &str) -> Value {
    let response = server
        .post("/api/account")
        .json(&json!({ "wallet_address": wallet }))
        .await;
    assert_eq!(response.status_code().as_u16(), 201, "{}", response.text());
    response.json::<Value>()
}

/// Place a wager through the API, asserting success.
#[allow(dead_code)]
pub async fn wager(
    server: &TestServer,
    wallet: &str,
    amount: f64,
    side: &str,
    leverage: Option<f64>,
) -> Value {
    let mut body = json!({
        "wallet_address": wallet,
        "wager_amount": amount,
        "chosen_side": side,
    });
    if let Some(leverage) = leverage {
        body["leverage"] = json!(leverage);
    }
    let response = server.post("/api/wager").json(&body).await;
    assert_eq!(response.status_code().as_u16(), 200, "{}", response.text());
    response.json::<Value>()
}

/// Parse the standard error envelope into (code, message, category).
#[allow(dead_code)]
pub fn parse_error(body: &Value) -> (String, String, String) {
    let error = body.get("error").expect("No error object in response");
    (
        error["code"].as_str().unwrap_or_default().to_string(),
        error["message"].as_str().unwrap_or_default().to_string(),
        error["category"].as_str().unwrap_or_default().to_string(),
    )
}
