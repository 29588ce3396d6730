pub mod models;
pub mod resource;
pub mod supplier;
pub mod repository;
pub mod reference;

pub use models::{
    BookCarRentalRequest, BookFlightRequest, BookHotelRequest, CarRentalConfirmation,
    FlightConfirmation, HotelConfirmation, SubBookingRef, TripBookingRequest, TripConfirmation,
    TripRecord,
};
pub use reference::{RandomReferenceGenerator, ReferenceGenerator};
pub use repository::RecordStore;
pub use resource::{BookableResource, Car, Flight, Hotel, ResourceKind, SubOperation};
pub use supplier::SubBookingClient;

#[derive(Debug, thiserror::Error)]
pub enum TripError {
    /// Caller-supplied data was rejected. The message is shown to the caller as is.
    #[error("{0}")]
    Validation(String),
    /// No trip record exists for the reference.
    #[error("no such booking: {0}")]
    NotFound(String),
    #[error("{kind} booking not found: {reference}")]
    SubBookingNotFound {
        kind: ResourceKind,
        reference: String,
    },
    /// A downstream service call failed, either at the transport level
    /// (`status` is `None`) or with an unexpected HTTP status.
    #[error("{kind} {operation} request failed ({}): {detail}", status_label(.status))]
    Downstream {
        kind: ResourceKind,
        operation: SubOperation,
        status: Option<u16>,
        detail: String,
    },
    #[error("persistence error: {0}")]
    Persistence(String),
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "transport error".to_string(),
    }
}

impl TripError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TripError::Validation(msg.into())
    }

    pub fn persistence(err: impl std::fmt::Display) -> Self {
        TripError::Persistence(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TripError::NotFound(_))
    }
}

pub type TripResult<T> = Result<T, TripError>;
