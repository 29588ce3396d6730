use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;
use voyage_core::{RecordStore, TripBookingRequest, TripError, TripRecord, TripResult};

pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TripRow {
    #[sqlx(rename = "ref")]
    reference: String,
    created: DateTime<Utc>,
    request: Json<TripBookingRequest>,
    flight_ref: Option<String>,
    hotel_ref: Option<String>,
    car_ref: Option<String>,
}

impl From<TripRow> for TripRecord {
    fn from(row: TripRow) -> Self {
        TripRecord {
            reference: row.reference,
            created: row.created,
            request: row.request.0,
            flight_ref: row.flight_ref,
            hotel_ref: row.hotel_ref,
            car_ref: row.car_ref,
        }
    }
}

fn map_insert_error(reference: &str, err: sqlx::Error) -> TripError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            TripError::Persistence(format!("trip {} already exists", reference))
        }
        _ => TripError::persistence(err),
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn put(&self, record: &TripRecord) -> TripResult<()> {
        sqlx::query(
            r#"
            INSERT INTO trips ("ref", created, request, flight_ref, hotel_ref, car_ref)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&record.reference)
        .bind(record.created)
        .bind(Json(&record.request))
        .bind(&record.flight_ref)
        .bind(&record.hotel_ref)
        .bind(&record.car_ref)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(&record.reference, e))?;

        debug!(reference = %record.reference, "Trip record stored");
        Ok(())
    }

    async fn get(&self, reference: &str) -> TripResult<Option<TripRecord>> {
        let row = sqlx::query_as::<_, TripRow>(
            r#"
            SELECT "ref", created, request, flight_ref, hotel_ref, car_ref
            FROM trips
            WHERE "ref" = $1
            "#,
        )
        .bind(reference)
        .fetch_optional(&self.pool)
        .await
        .map_err(TripError::persistence)?;

        Ok(row.map(TripRecord::from))
    }
}
