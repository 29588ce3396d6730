//! HTTP implementation of [`SubBookingClient`] for the flight, hotel and
//! car services. All three share one shape:
//!
//! - `POST {base}/{kind}s/booking` with the JSON request, `201 Created` on success
//! - `GET {base}/{kind}s/booking?ref=<ref>`, `200 OK` on success

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::marker::PhantomData;
use tracing::{debug, error};
use voyage_core::{
    BookableResource, Car, Flight, Hotel, SubBookingClient, SubOperation, TripError, TripResult,
};

use crate::config::ServicesConfig;

pub struct HttpBookingClient<R> {
    http: Client,
    endpoint: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R: BookableResource> HttpBookingClient<R> {
    /// `base_url` is the service root, e.g. `http://flight-service:8000`.
    pub fn new(http: Client, base_url: &str) -> Self {
        let endpoint = format!(
            "{}/{}/booking",
            base_url.trim_end_matches('/'),
            R::KIND.path_segment()
        );
        Self {
            http,
            endpoint,
            _resource: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn failure(operation: SubOperation, status: Option<u16>, detail: String) -> TripError {
        let kind = R::KIND;
        error!(%kind, %operation, ?status, "Sub-booking request failed: {}", detail);
        TripError::Downstream {
            kind: R::KIND,
            operation,
            status,
            detail,
        }
    }

    fn decode(operation: SubOperation, status: StatusCode, body: &str) -> TripResult<R::Confirmation> {
        serde_json::from_str(body).map_err(|e| {
            Self::failure(
                operation,
                Some(status.as_u16()),
                format!("invalid confirmation body: {}", e),
            )
        })
    }
}

impl<R> Clone for HttpBookingClient<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            endpoint: self.endpoint.clone(),
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R: BookableResource> SubBookingClient<R> for HttpBookingClient<R> {
    async fn create(&self, request: &R::Request) -> TripResult<(String, R::Confirmation)> {
        let operation = SubOperation::Create;
        let kind = R::KIND;
        debug!(%kind, url = %self.endpoint, "Creating sub-booking");

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::failure(operation, None, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Self::failure(operation, Some(status.as_u16()), e.to_string()))?;

        if status != StatusCode::CREATED {
            return Err(Self::failure(operation, Some(status.as_u16()), body));
        }

        let confirmation = Self::decode(operation, status, &body)?;
        let reference = R::reference(&confirmation).to_string();
        if reference.is_empty() {
            return Err(Self::failure(
                operation,
                Some(status.as_u16()),
                "confirmation has no ref".to_string(),
            ));
        }
        Ok((reference, confirmation))
    }

    async fn fetch(&self, reference: &str) -> TripResult<R::Confirmation> {
        let operation = SubOperation::Fetch;
        let kind = R::KIND;
        debug!(%kind, url = %self.endpoint, reference, "Fetching sub-booking");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("ref", reference)])
            .send()
            .await
            .map_err(|e| Self::failure(operation, None, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TripError::SubBookingNotFound {
                kind,
                reference: reference.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::failure(operation, Some(status.as_u16()), e.to_string()))?;

        if status != StatusCode::OK {
            return Err(Self::failure(operation, Some(status.as_u16()), body));
        }

        Self::decode(operation, status, &body)
    }
}

/// The three HTTP clients, sharing one connection pool.
#[derive(Clone)]
pub struct HttpClients {
    pub flight: HttpBookingClient<Flight>,
    pub hotel: HttpBookingClient<Hotel>,
    pub car: HttpBookingClient<Car>,
}

impl HttpClients {
    pub fn from_config(config: &ServicesConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            flight: HttpBookingClient::new(http.clone(), &config.flight_service_url),
            hotel: HttpBookingClient::new(http.clone(), &config.hotel_service_url),
            car: HttpBookingClient::new(http, &config.car_service_url),
        })
    }
}
