use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{
    BookCarRentalRequest, BookFlightRequest, BookHotelRequest, CarRentalConfirmation,
    FlightConfirmation, HotelConfirmation,
};

/// The three kinds of sub-resource a trip can bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Flight,
    Hotel,
    Car,
}

impl ResourceKind {
    /// Booking order used by the orchestrator for both writes and reads.
    pub const BOOKING_ORDER: [ResourceKind; 3] =
        [ResourceKind::Flight, ResourceKind::Hotel, ResourceKind::Car];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Flight => "flight",
            ResourceKind::Hotel => "hotel",
            ResourceKind::Car => "car",
        }
    }

    /// Path segment of the owning service's booking endpoint.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceKind::Flight => "flights",
            ResourceKind::Hotel => "hotels",
            ResourceKind::Car => "cars",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubOperation {
    Create,
    Fetch,
}

impl fmt::Display for SubOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubOperation::Create => f.write_str("create"),
            SubOperation::Fetch => f.write_str("fetch"),
        }
    }
}

/// Type-level description of one bookable sub-resource: its tag, the
/// request the owning service accepts and the confirmation it returns.
pub trait BookableResource: Send + Sync + 'static {
    const KIND: ResourceKind;
    type Request: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync;
    type Confirmation: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync;

    fn reference(confirmation: &Self::Confirmation) -> &str;
}

#[derive(Debug, Clone, Copy)]
pub struct Flight;

#[derive(Debug, Clone, Copy)]
pub struct Hotel;

#[derive(Debug, Clone, Copy)]
pub struct Car;

impl BookableResource for Flight {
    const KIND: ResourceKind = ResourceKind::Flight;
    type Request = BookFlightRequest;
    type Confirmation = FlightConfirmation;

    fn reference(confirmation: &FlightConfirmation) -> &str {
        &confirmation.reference
    }
}

impl BookableResource for Hotel {
    const KIND: ResourceKind = ResourceKind::Hotel;
    type Request = BookHotelRequest;
    type Confirmation = HotelConfirmation;

    fn reference(confirmation: &HotelConfirmation) -> &str {
        &confirmation.reference
    }
}

impl BookableResource for Car {
    const KIND: ResourceKind = ResourceKind::Car;
    type Request = BookCarRentalRequest;
    type Confirmation = CarRentalConfirmation;

    fn reference(confirmation: &CarRentalConfirmation) -> &str {
        &confirmation.reference
    }
}
