//! Composite trip booking across the flight, hotel and car services.
//!
//! Sub-resources are always handled one at a time in the order flight,
//! hotel, car, for both booking and retrieval. The first failure aborts the
//! operation. Sub-bookings committed earlier in the same call are not
//! cancelled; they are logged as orphans and no trip record is written.

use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn, Span};
use voyage_core::{
    BookableResource, Car, Flight, Hotel, RecordStore, ReferenceGenerator, ResourceKind,
    SubBookingClient, SubOperation, TripBookingRequest, TripConfirmation, TripError, TripRecord,
    TripResult,
};

/// Capabilities the orchestrator is built from.
pub struct TripDependencies {
    pub references: Arc<dyn ReferenceGenerator>,
    pub store: Arc<dyn RecordStore>,
    pub flights: Arc<dyn SubBookingClient<Flight>>,
    pub hotels: Arc<dyn SubBookingClient<Hotel>>,
    pub cars: Arc<dyn SubBookingClient<Car>>,
}

#[derive(Clone)]
pub struct TripOrchestrator {
    references: Arc<dyn ReferenceGenerator>,
    store: Arc<dyn RecordStore>,
    flights: Arc<dyn SubBookingClient<Flight>>,
    hotels: Arc<dyn SubBookingClient<Hotel>>,
    cars: Arc<dyn SubBookingClient<Car>>,
}

impl TripOrchestrator {
    pub fn new(deps: TripDependencies) -> Self {
        Self {
            references: deps.references,
            store: deps.store,
            flights: deps.flights,
            hotels: deps.hotels,
            cars: deps.cars,
        }
    }

    /// Book every requested sub-resource, then persist the trip record.
    ///
    /// The request must already have passed `TripBookingRequest::validate`.
    #[instrument(skip_all, fields(trip_ref = tracing::field::Empty))]
    pub async fn book_trip(&self, request: TripBookingRequest) -> TripResult<TripConfirmation> {
        let reference = self.references.next_ref();
        Span::current().record("trip_ref", reference.as_str());

        let mut record = TripRecord::new(reference.clone(), request.clone());
        let mut confirmation = TripConfirmation::new(reference, request);

        if let Err(err) = self.book_sub_resources(&mut record, &mut confirmation).await {
            report_orphans(&record, &err);
            return Err(err);
        }

        if let Err(err) = self.store.put(&record).await {
            report_orphans(&record, &err);
            return Err(err);
        }

        info!(
            trip_ref = %record.reference,
            sub_bookings = record.sub_refs().len(),
            "Booked trip"
        );
        Ok(confirmation)
    }

    async fn book_sub_resources(
        &self,
        record: &mut TripRecord,
        confirmation: &mut TripConfirmation,
    ) -> TripResult<()> {
        if let Some(request) = &confirmation.trip.flight {
            let (reference, booked) = create_sub_booking(self.flights.as_ref(), request).await?;
            record.set_sub_ref(ResourceKind::Flight, reference);
            confirmation.flight_confirmation = Some(booked);
        }
        if let Some(request) = &confirmation.trip.hotel {
            let (reference, booked) = create_sub_booking(self.hotels.as_ref(), request).await?;
            record.set_sub_ref(ResourceKind::Hotel, reference);
            confirmation.hotel_confirmation = Some(booked);
        }
        if let Some(request) = &confirmation.trip.car {
            let (reference, booked) = create_sub_booking(self.cars.as_ref(), request).await?;
            record.set_sub_ref(ResourceKind::Car, reference);
            confirmation.car_rental_confirmation = Some(booked);
        }
        Ok(())
    }

    /// Rebuild a trip confirmation from the stored record, re-fetching every
    /// sub-booking from its owning service.
    #[instrument(skip(self))]
    pub async fn get_booking(&self, trip_ref: &str) -> TripResult<TripConfirmation> {
        let record = self
            .store
            .get(trip_ref)
            .await?
            .ok_or_else(|| TripError::NotFound(trip_ref.to_string()))?;

        let mut confirmation = TripConfirmation::new(record.reference.clone(), record.request.clone());

        if let Some(reference) = record.sub_ref(ResourceKind::Flight) {
            confirmation.flight_confirmation = Some(fetch_sub_booking(self.flights.as_ref(), reference).await?);
        }
        if let Some(reference) = record.sub_ref(ResourceKind::Hotel) {
            confirmation.hotel_confirmation = Some(fetch_sub_booking(self.hotels.as_ref(), reference).await?);
        }
        if let Some(reference) = record.sub_ref(ResourceKind::Car) {
            confirmation.car_rental_confirmation = Some(fetch_sub_booking(self.cars.as_ref(), reference).await?);
        }

        debug!(trip_ref, "Fetched trip");
        Ok(confirmation)
    }
}

async fn create_sub_booking<R: BookableResource>(
    client: &dyn SubBookingClient<R>,
    request: &R::Request,
) -> TripResult<(String, R::Confirmation)> {
    let kind = R::KIND;
    debug!(%kind, "Booking sub-resource");
    let (reference, confirmation) = client.create(request).await?;
    debug!(%kind, %reference, "Sub-resource booked");
    Ok((reference, confirmation))
}

// A sub-booking the trip record points at but the owning service no longer
// knows is a broken trip, not a missing one.
async fn fetch_sub_booking<R: BookableResource>(
    client: &dyn SubBookingClient<R>,
    reference: &str,
) -> TripResult<R::Confirmation> {
    client.fetch(reference).await.map_err(|err| match err {
        TripError::SubBookingNotFound { kind, reference } => TripError::Downstream {
            kind,
            operation: SubOperation::Fetch,
            status: Some(404),
            detail: format!("{} booking {} not found", kind, reference),
        },
        other => other,
    })
}

fn report_orphans(record: &TripRecord, err: &TripError) {
    error!(trip_ref = %record.reference, error = %err, "Failed to book trip");
    // TODO: replace with compensating cancellations once the sub-services expose a cancel endpoint.
    for orphan in record.sub_refs() {
        warn!(
            trip_ref = %record.reference,
            kind = %orphan.kind,
            reference = %orphan.reference,
            "Sub-booking left without a trip record"
        );
    }
}
