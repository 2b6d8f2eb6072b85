use crate::config::Config;
use crate::engine::SettlementEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<SettlementEngine>,
}

impl AppState {
    pub fn new(config: Config, engine: SettlementEngine) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}
