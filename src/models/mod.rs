//! Data models for the estimator
//!
//! - Location: the validated address query and the geocoded location record
//! - Estimate: energy figures, their provenance and the assembled result

pub mod estimate;
pub mod location;

// Re-export all public types for convenient access
pub use estimate::{DataSource, EnergyEstimate, EstimationResult};
pub use location::{AddressDetails, AddressQuery, LocationRecord};
