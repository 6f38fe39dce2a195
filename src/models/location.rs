//! Address query and geocoded location models

use serde::{Deserialize, Serialize};

use crate::{EstimatorError, Result};

/// A free-text address or postal code that passed input validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressQuery(String);

impl AddressQuery {
    /// Minimum number of characters after trimming
    pub const MIN_LENGTH: usize = 3;

    /// Validate user input. The stored text is trimmed.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(EstimatorError::validation("Address is required"));
        }

        if trimmed.chars().count() < Self::MIN_LENGTH {
            return Err(EstimatorError::validation(
                "Please enter a valid address or postal code",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AddressQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured sub-fields of a geocoded address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressDetails {
    pub house_number: Option<String>,
    pub road: Option<String>,
    /// Name of the building, if the provider knows one
    pub building: Option<String>,
}

impl AddressDetails {
    /// A house number like "12/3" marks a unit in a multi-family dwelling
    #[must_use]
    pub fn is_multi_unit(&self) -> bool {
        self.house_number
            .as_deref()
            .is_some_and(|number| number.contains('/'))
    }

    #[must_use]
    pub fn has_named_building(&self) -> bool {
        self.building
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

/// Best-match result of a geocoding lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Full human-readable address from the provider
    pub display_name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Coarse classification ("house", "apartment", "building", ...)
    pub property_type: Option<String>,
    pub address_details: Option<AddressDetails>,
}

impl LocationRecord {
    /// Create a new location without type or address details
    #[must_use]
    pub fn new(display_name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            display_name: display_name.into(),
            latitude,
            longitude,
            property_type: None,
            address_details: None,
        }
    }

    #[must_use]
    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = Some(property_type.into());
        self
    }

    #[must_use]
    pub fn with_address_details(mut self, details: AddressDetails) -> Self {
        self.address_details = Some(details);
        self
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
