use async_trait::async_trait;

use crate::models::TripRecord;
use crate::TripResult;

/// Repository trait for the orchestrator's composite trip records.
/// Single-key access only.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put(&self, record: &TripRecord) -> TripResult<()>;

    async fn get(&self, reference: &str) -> TripResult<Option<TripRecord>>;
}
