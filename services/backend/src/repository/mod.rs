pub mod account_repository;
pub mod memory;
pub mod redis_account_repository;

pub use account_repository::{AccountRepository, BonusClaim, SettlementUpdate};
pub use memory::MemoryAccountRepository;
pub use redis_account_repository::RedisAccountRepository;
