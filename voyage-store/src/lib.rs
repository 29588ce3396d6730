pub mod config;
pub mod database;
pub mod memory;
pub mod redis_repo;
pub mod trip_repo;

pub use config::{StoreBackend, StoreConfig};
pub use database::DbClient;
pub use memory::InMemoryRecordStore;
pub use redis_repo::RedisRecordStore;
pub use trip_repo::PostgresRecordStore;
