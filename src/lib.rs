//! Home Energy Estimator
//!
//! Resolves a postal address through a geocoding provider, pulls the latest
//! national energy-consumption figure from the EIA statistics API and derives
//! rough house size, window count and monthly energy usage estimates.

pub mod api;
pub mod config;
pub mod energy;
pub mod error;
pub mod estimation;
pub mod geocoding;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod web;

// Re-export core types for public API
pub use config::EstimatorConfig;
pub use energy::{EiaClient, EnergyDataFetcher};
pub use error::{EstimatorError, TransportError};
pub use geocoding::{AddressValidator, NominatimClient};
pub use models::{
    AddressDetails, AddressQuery, DataSource, EnergyEstimate, EstimationResult, LocationRecord,
};
pub use pipeline::{EstimationPipeline, PipelineState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, EstimatorError>;
