use async_trait::async_trait;

use crate::resource::BookableResource;
use crate::TripResult;

/// Capability to book and look up one kind of sub-resource at the service
/// that owns it. Implementations must be safe to share across concurrent
/// orchestrations.
#[async_trait]
pub trait SubBookingClient<R: BookableResource>: Send + Sync {
    /// Create a booking from an already validated request. Returns the
    /// downstream reference together with the full confirmation.
    async fn create(&self, request: &R::Request) -> TripResult<(String, R::Confirmation)>;

    /// Fetch the live confirmation for `reference`. An unknown reference
    /// yields `TripError::SubBookingNotFound`.
    async fn fetch(&self, reference: &str) -> TripResult<R::Confirmation>;
}
