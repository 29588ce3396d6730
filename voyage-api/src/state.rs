use std::sync::Arc;
use std::time::Duration;
use voyage_client::HttpClients;
use voyage_core::RandomReferenceGenerator;
use voyage_trip::{TripDependencies, TripOrchestrator};

use crate::app_config::Config;

#[derive(Clone)]
pub struct AppState {
    pub trips: TripOrchestrator,
    pub request_timeout: Duration,
}

impl AppState {
    /// Wire the orchestrator to the configured store and downstream services.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = config.store.connect().await?;
        let clients = HttpClients::from_config(&config.services)?;

        let trips = TripOrchestrator::new(TripDependencies {
            references: Arc::new(RandomReferenceGenerator::new()),
            store,
            flights: Arc::new(clients.flight),
            hotels: Arc::new(clients.hotel),
            cars: Arc::new(clients.car),
        });

        Ok(Self {
            trips,
            request_timeout: config.server.request_timeout(),
        })
    }
}
