use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, info, warn};
use voyage_core::{TripBookingRequest, TripConfirmation};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct BookingQuery {
    #[serde(rename = "ref")]
    reference: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/booking", post(book_trip).get(get_booking))
        .route("/health", get(health))
}

async fn book_trip(
    State(state): State<AppState>,
    payload: Result<Json<TripBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TripConfirmation>), AppError> {
    let Json(request) = payload.map_err(|e| {
        error!(error = %e, "Failed to unmarshal request body");
        AppError::ValidationError(e.body_text())
    })?;

    if let Err(e) = request.validate() {
        warn!(error = %e, "Invalid booking request");
        return Err(e.into());
    }

    let confirmation = state.trips.book_trip(request).await?;

    info!(trip_ref = %confirmation.reference, "Booked trip");
    Ok((StatusCode::CREATED, Json(confirmation)))
}

async fn get_booking(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> Result<Json<TripConfirmation>, AppError> {
    let reference = query
        .reference
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::ValidationError("missing ref".to_string()))?;

    let confirmation = state.trips.get_booking(&reference).await.map_err(|e| {
        error!(error = %e, trip_ref = %reference, "Failed to fetch booking");
        AppError::from(e)
    })?;

    info!(trip_ref = %reference, "Fetched booking");
    Ok(Json(confirmation))
}

async fn health() -> &'static str {
    "ok"
}
