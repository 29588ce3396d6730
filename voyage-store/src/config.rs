use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use voyage_core::{RecordStore, TripError, TripResult};

use crate::{DbClient, InMemoryRecordStore, PostgresRecordStore, RedisRecordStore};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Redis,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

fn required<'a>(value: &'a Option<String>, key: &str) -> TripResult<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| TripError::Persistence(format!("store.{} is not configured", key)))
}

impl StoreConfig {
    /// Open the configured backend, running migrations where applicable.
    pub async fn connect(&self) -> TripResult<Arc<dyn RecordStore>> {
        match self.backend {
            StoreBackend::Postgres => {
                let url = required(&self.database_url, "database_url")?;
                let db = DbClient::new(url, self.max_connections)
                    .await
                    .map_err(TripError::persistence)?;
                db.migrate().await.map_err(TripError::persistence)?;
                info!("Using PostgreSQL record store");
                Ok(Arc::new(PostgresRecordStore::new(db.pool)))
            }
            StoreBackend::Redis => {
                let url = required(&self.redis_url, "redis_url")?;
                let store = RedisRecordStore::new(url)
                    .await
                    .map_err(TripError::persistence)?;
                info!("Using Redis record store");
                Ok(Arc::new(store))
            }
            StoreBackend::Memory => {
                info!("Using in-memory record store");
                Ok(Arc::new(InMemoryRecordStore::new()))
            }
        }
    }
}
