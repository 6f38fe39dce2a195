//! Address validation through the Nominatim geocoding API
//!
//! A lookup asks the provider for a single best match with address details
//! expanded, then checks the match is usable before handing it on as a
//! [`LocationRecord`].

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::TransportError;
use crate::Result;
use crate::models::{AddressQuery, LocationRecord};

/// Resolves an address query to a single location
#[async_trait]
pub trait AddressValidator: Send + Sync {
    async fn validate(&self, query: &AddressQuery) -> Result<LocationRecord>;
}

/// Nominatim (OpenStreetMap) geocoding client
pub struct NominatimClient {
    client: Client,
    base_url: String,
    accept_language: String,
}

impl NominatimClient {
    /// Create a new client
    pub fn new(config: &GeocodingConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.as_str())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            accept_language: config.accept_language.clone(),
        })
    }

    fn search_url(&self, query: &AddressQuery) -> String {
        format!(
            "{}/search?q={}&format=json&limit=1&addressdetails=1&accept-language={}",
            self.base_url,
            urlencoding::encode(query.as_str()),
            urlencoding::encode(&self.accept_language)
        )
    }
}

#[async_trait]
impl AddressValidator for NominatimClient {
    #[instrument(skip(self, query), fields(query = %query))]
    async fn validate(&self, query: &AddressQuery) -> Result<LocationRecord> {
        let start_time = Instant::now();
        let url = self.search_url(query);
        debug!("Nominatim request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoding provider returned {}", status);
            return Err(TransportError::Remote {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown error").to_string(),
            }
            .into());
        }

        let body = response.bytes().await.map_err(TransportError::from)?;
        let location = nominatim::parse_best_match(&body, query)?;

        info!(
            "Geocoded '{}' to {} ({}) in {:.3}s",
            query,
            location.display_name,
            location.format_coordinates(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(location)
    }
}

/// Nominatim response structures and conversion
mod nominatim {
    use serde::Deserialize;

    use crate::models::{AddressDetails, AddressQuery, LocationRecord};
    use crate::{EstimatorError, Result};

    #[derive(Debug, Deserialize)]
    pub struct SearchResult {
        pub display_name: Option<String>,
        /// Coordinates arrive as decimal strings
        pub lat: Option<String>,
        pub lon: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub class: Option<String>,
        pub address: Option<Address>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Address {
        pub house_number: Option<String>,
        pub road: Option<String>,
        pub building: Option<String>,
    }

    impl From<Address> for AddressDetails {
        fn from(address: Address) -> Self {
            AddressDetails {
                house_number: address.house_number,
                road: address.road,
                building: address.building,
            }
        }
    }

    fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
        raw.and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
    }

    /// Take the first candidate of a search response and check it is usable
    pub fn parse_best_match(body: &[u8], query: &AddressQuery) -> Result<LocationRecord> {
        let results: Vec<SearchResult> = serde_json::from_slice(body).map_err(|e| {
            EstimatorError::invalid_data(format!("unexpected geocoding response: {e}"))
        })?;

        let Some(best) = results.into_iter().next() else {
            return Err(EstimatorError::not_found(query.as_str()));
        };

        let display_name = best
            .display_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| EstimatorError::invalid_data("result has no display name"))?;

        let (Some(latitude), Some(longitude)) = (
            parse_coordinate(best.lat.as_deref()),
            parse_coordinate(best.lon.as_deref()),
        ) else {
            return Err(EstimatorError::invalid_data(
                "result has no usable coordinates",
            ));
        };

        let mut location = LocationRecord::new(display_name, latitude, longitude);
        location.property_type = best.kind.or(best.class).filter(|kind| !kind.is_empty());
        location.address_details = best.address.map(AddressDetails::from);

        Ok(location)
    }
}
