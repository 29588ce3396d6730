pub mod orchestrator;

pub use orchestrator::{TripDependencies, TripOrchestrator};
