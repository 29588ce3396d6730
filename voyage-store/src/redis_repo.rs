use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::{debug, info};
use voyage_core::{RecordStore, TripError, TripRecord, TripResult};

/// Trip records stored as JSON strings under `trip:{ref}`.
#[derive(Clone)]
pub struct RedisRecordStore {
    client: redis::Client,
}

pub(crate) fn trip_key(reference: &str) -> String {
    format!("trip:{}", reference)
}

impl RedisRecordStore {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        info!("Redis record store configured");
        Ok(Self { client })
    }

    async fn connection(&self) -> TripResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(TripError::persistence)
    }
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn put(&self, record: &TripRecord) -> TripResult<()> {
        let payload = serde_json::to_string(record).map_err(TripError::persistence)?;
        let mut conn = self.connection().await?;

        // SET NX: records are immutable once written
        let created: bool = conn
            .set_nx(trip_key(&record.reference), payload)
            .await
            .map_err(TripError::persistence)?;
        if !created {
            return Err(TripError::Persistence(format!(
                "trip {} already exists",
                record.reference
            )));
        }

        debug!(reference = %record.reference, "Trip record stored");
        Ok(())
    }

    async fn get(&self, reference: &str) -> TripResult<Option<TripRecord>> {
        let mut conn = self.connection().await?;
        let payload: Option<String> = conn
            .get(trip_key(reference))
            .await
            .map_err(TripError::persistence)?;

        payload
            .map(|p| serde_json::from_str(&p).map_err(TripError::persistence))
            .transpose()
    }
}
