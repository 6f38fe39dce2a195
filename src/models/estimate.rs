//! Energy estimate and assembled estimation result

use serde::{Deserialize, Serialize};

use super::location::{AddressDetails, LocationRecord};
use crate::estimation;

/// Where the monthly energy figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    /// Derived from the EIA national consumption statistics
    #[serde(rename = "EIA")]
    Eia,
    /// Derived from the house-size fallback formula
    Estimated,
}

impl DataSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Eia => "EIA",
            DataSource::Estimated => "Estimated",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monthly energy usage in kWh together with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyEstimate {
    pub monthly_kwh: u64,
    pub source: DataSource,
}

impl EnergyEstimate {
    /// Wrap a residential kWh/month figure obtained from EIA data
    #[must_use]
    pub fn from_eia(monthly_kwh: f64) -> Self {
        Self {
            monthly_kwh: monthly_kwh.max(0.0).round() as u64,
            source: DataSource::Eia,
        }
    }

    /// Fallback figure derived from the house size
    #[must_use]
    pub fn fallback(house_size_sqft: u32) -> Self {
        Self {
            monthly_kwh: u64::from(estimation::estimate_fallback_energy(house_size_sqft)),
            source: DataSource::Estimated,
        }
    }
}

/// Complete output of one successful pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub address: String,
    pub property_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address_details: Option<AddressDetails>,
    pub house_size_sqft: u32,
    pub window_count: u32,
    pub monthly_energy_kwh: u64,
    pub annual_energy_kwh: u64,
    pub estimated_monthly_cost: u64,
    pub data_source: DataSource,
}

impl EstimationResult {
    /// Build the result from the geocoded location and the derived metrics
    #[must_use]
    pub fn assemble(
        location: LocationRecord,
        house_size_sqft: u32,
        window_count: u32,
        energy: EnergyEstimate,
    ) -> Self {
        let property_type = estimation::property_type_label(&location).to_string();

        Self {
            address: location.display_name,
            property_type,
            latitude: location.latitude,
            longitude: location.longitude,
            address_details: location.address_details,
            house_size_sqft,
            window_count,
            monthly_energy_kwh: energy.monthly_kwh,
            annual_energy_kwh: estimation::annual_energy(energy.monthly_kwh),
            estimated_monthly_cost: estimation::estimate_monthly_cost(energy.monthly_kwh),
            data_source: energy.source,
        }
    }
}
