pub mod config;
pub mod http;

pub use config::ServicesConfig;
pub use http::{HttpBookingClient, HttpClients};
