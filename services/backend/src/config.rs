use shared::STARTING_BALANCE;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_port: u16,
    pub metrics_port: u16,
    pub redis: RedisConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Balance credited to a freshly registered account.
    pub starting_balance: f64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()?,
            metrics_port: env::var("METRICS_PORT")
                .unwrap_or_else(|_| "9090".to_string())
                .parse()?,
            redis: RedisConfig {
                url: env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            },
            game: GameConfig {
                starting_balance: env::var("STARTING_BALANCE")
                    .unwrap_or_else(|_| STARTING_BALANCE.to_string())
                    .parse()?,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_port: 3001,
            metrics_port: 9090,
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
            },
            game: GameConfig {
                starting_balance: STARTING_BALANCE,
            },
        }
    }
}
