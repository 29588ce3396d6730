use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use voyage_core::{RecordStore, TripError, TripRecord, TripResult};

/// Process-local record store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<String, TripRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put(&self, record: &TripRecord) -> TripResult<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.reference) {
            return Err(TripError::Persistence(format!(
                "trip {} already exists",
                record.reference
            )));
        }
        records.insert(record.reference.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, reference: &str) -> TripResult<Option<TripRecord>> {
        Ok(self.records.read().await.get(reference).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use voyage_core::{ResourceKind, TripBookingRequest};

    fn record(reference: &str) -> TripRecord {
        let request = TripBookingRequest {
            name: "Ada".to_string(),
            trip_name: "Offsite".to_string(),
            destination: "Lisbon".to_string(),
            start: Some(Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2026, 5, 4, 18, 0, 0).unwrap()),
            members: vec!["Ada".to_string()],
            flight: None,
            hotel: None,
            car: None,
        };
        let mut record = TripRecord::new(reference.to_string(), request);
        record.set_sub_ref(ResourceKind::Hotel, "H1".to_string());
        record
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryRecordStore::new();
        assert!(store.is_empty().await);

        store.put(&record("T1")).await.unwrap();
        let loaded = store.get("T1").await.unwrap().expect("record missing");
        assert_eq!(loaded, record_with_created(&loaded, "T1"));
        assert_eq!(loaded.sub_ref(ResourceKind::Hotel), Some("H1"));
        assert!(store.get("T2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_records_are_immutable() {
        let store = InMemoryRecordStore::new();
        store.put(&record("T1")).await.unwrap();
        let err = store.put(&record("T1")).await.unwrap_err();
        assert!(matches!(err, TripError::Persistence(_)));
        assert_eq!(store.len().await, 1);
    }

    fn record_with_created(loaded: &TripRecord, reference: &str) -> TripRecord {
        let mut expected = record(reference);
        expected.created = loaded.created;
        expected
    }
}
