//! Property report cards
//!
//! Presentation-neutral summary of an [`EstimationResult`]: one card per
//! figure with its label, description and, for the bounded figures, a meter
//! reading against a typical maximum.

use serde::{Deserialize, Serialize};

use crate::models::{DataSource, EstimationResult};

/// Window count at which the windows meter reads 100%
pub const MAX_WINDOWS: u64 = 30;
/// Monthly kWh at which the energy meter reads 100%
pub const MAX_ENERGY: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterLevel {
    Success,
    Warning,
    Error,
}

impl MeterLevel {
    fn from_percentage(percentage: f64) -> Self {
        if percentage > 80.0 {
            MeterLevel::Error
        } else if percentage > 60.0 {
            MeterLevel::Warning
        } else {
            MeterLevel::Success
        }
    }
}

/// Reading of a value against its typical maximum, capped at 100%
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meter {
    pub percentage: f64,
    pub level: MeterLevel,
    pub caption: String,
}

impl Meter {
    #[must_use]
    pub fn new(value: u64, max: u64) -> Self {
        let percentage = if max > 0 {
            (value as f64 / max as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        Self {
            percentage,
            level: MeterLevel::from_percentage(percentage),
            caption: format!("{percentage:.1}% of typical maximum"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub value: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meter: Option<Meter>,
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "House #12 Main Street", or whichever half is known
fn address_tooltip(result: &EstimationResult) -> Option<String> {
    let details = result.address_details.as_ref()?;
    let house = details
        .house_number
        .as_deref()
        .map(|number| format!("House #{number}"));

    let parts: Vec<&str> = [house.as_deref(), details.road.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();

    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Build the address, house size, windows and energy usage cards
#[must_use]
pub fn cards(result: &EstimationResult) -> Vec<Card> {
    let energy_description = match result.data_source {
        DataSource::Eia => "Based on total energy consumption data from EIA",
        DataSource::Estimated => "Based on typical residential energy consumption",
    };

    vec![
        Card {
            title: "Address".to_string(),
            value: result.address.clone(),
            description: format!("{} property", capitalize(&result.property_type)),
            tooltip: address_tooltip(result),
            meter: None,
        },
        Card {
            title: "House Size".to_string(),
            value: format!("{} sq ft", result.house_size_sqft),
            description: format!(
                "Based on typical {} size in this area",
                result.property_type
            ),
            tooltip: Some("Estimated based on property type and location".to_string()),
            meter: None,
        },
        Card {
            title: "Windows".to_string(),
            value: format!("{} windows", result.window_count),
            description: "Based on typical window-to-floor-area ratio".to_string(),
            tooltip: Some(
                "Estimated based on house size and typical residential patterns".to_string(),
            ),
            meter: Some(Meter::new(u64::from(result.window_count), MAX_WINDOWS)),
        },
        Card {
            title: "Energy Usage".to_string(),
            value: format!("{} kWh", result.monthly_energy_kwh),
            description: energy_description.to_string(),
            tooltip: Some("Estimated based on house size and typical consumption".to_string()),
            meter: Some(Meter::new(result.monthly_energy_kwh, MAX_ENERGY)),
        },
    ]
}
