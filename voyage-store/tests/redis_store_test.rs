//! Runs against a live Redis server. Start one and run with
//! `REDIS_URL=redis://... cargo test -p voyage-store -- --ignored`.

use chrono::{TimeZone, Utc};
use voyage_core::{
    RandomReferenceGenerator, RecordStore, ReferenceGenerator, ResourceKind, TripBookingRequest,
    TripError, TripRecord,
};
use voyage_store::RedisRecordStore;

async fn store() -> RedisRecordStore {
    let url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
    RedisRecordStore::new(&url).await.expect("connect")
}

fn record(reference: String) -> TripRecord {
    let request = TripBookingRequest {
        name: "Ada".to_string(),
        trip_name: "Offsite".to_string(),
        destination: "Lisbon".to_string(),
        start: Some(Utc.timestamp_opt(1_777_626_000, 123_456_789).unwrap()),
        end: Some(Utc.with_ymd_and_hms(2026, 5, 4, 18, 0, 0).unwrap()),
        members: vec!["Ada".to_string(), "Grace".to_string()],
        flight: None,
        hotel: None,
        car: None,
    };
    let mut record = TripRecord::new(reference, request);
    record.created = Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0).unwrap();
    record.set_sub_ref(ResourceKind::Flight, "F1".to_string());
    record.set_sub_ref(ResourceKind::Car, "C1".to_string());
    record
}

#[tokio::test]
#[ignore]
async fn test_put_then_get_preserves_record() {
    let store = store().await;
    let record = record(RandomReferenceGenerator::new().next_ref());

    store.put(&record).await.unwrap();
    let loaded = store.get(&record.reference).await.unwrap().expect("record missing");

    assert_eq!(loaded, record);
    assert_eq!(loaded.request.start, record.request.start);
    assert_eq!(loaded.sub_ref(ResourceKind::Hotel), None);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_put_is_rejected() {
    let store = store().await;
    let record = record(RandomReferenceGenerator::new().next_ref());
    store.put(&record).await.unwrap();

    let err = store.put(&record).await.unwrap_err();

    assert!(matches!(err, TripError::Persistence(_)));
}

#[tokio::test]
#[ignore]
async fn test_get_missing_is_none() {
    let store = store().await;
    let reference = RandomReferenceGenerator::new().next_ref();

    assert!(store.get(&reference).await.unwrap().is_none());
}
