use serde::Deserialize;
use std::time::Duration;

/// Endpoints of the downstream booking services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub flight_service_url: String,
    pub hotel_service_url: String,
    pub car_service_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 10 }

impl ServicesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
