//! Estimation pipeline
//!
//! One run is a strictly ordered sequence:
//!
//! 1. validate the query and geocode it (the only step that can fail)
//! 2. fetch the national energy figure (failure absorbed)
//! 3. derive house size, windows and energy
//! 4. assemble the result
//!
//! Each submission is its own run; runs share nothing but the immutable
//! provider clients.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::config::EstimatorConfig;
use crate::energy::{EiaClient, EnergyDataFetcher};
use crate::estimation;
use crate::geocoding::{AddressValidator, NominatimClient};
use crate::models::{AddressQuery, EnergyEstimate, EstimationResult};
use crate::Result;

/// Observable outcome of the most recent submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineState {
    #[default]
    Idle,
    Running {
        query: String,
    },
    Success {
        result: EstimationResult,
    },
    Failure {
        error: String,
        message: String,
    },
}

/// Orchestrates geocoding, energy lookup and estimation
#[derive(Clone)]
pub struct EstimationPipeline {
    validator: Arc<dyn AddressValidator>,
    energy: Arc<dyn EnergyDataFetcher>,
    geocode_delay: Duration,
}

impl EstimationPipeline {
    /// Courtesy delay before each geocoding request
    pub const DEFAULT_GEOCODE_DELAY: Duration = Duration::from_secs(1);

    pub fn new(validator: Arc<dyn AddressValidator>, energy: Arc<dyn EnergyDataFetcher>) -> Self {
        Self {
            validator,
            energy,
            geocode_delay: Self::DEFAULT_GEOCODE_DELAY,
        }
    }

    #[must_use]
    pub fn with_geocode_delay(mut self, delay: Duration) -> Self {
        self.geocode_delay = delay;
        self
    }

    /// Build a pipeline backed by the Nominatim and EIA clients
    pub fn from_config(config: &EstimatorConfig) -> anyhow::Result<Self> {
        let validator = NominatimClient::new(&config.geocoding)?;
        let energy = EiaClient::new(&config.energy)?;

        if config.energy.api_key.is_none() {
            warn!("No EIA API key configured; energy figures will always be estimated");
        }

        Ok(Self::new(Arc::new(validator), Arc::new(energy))
            .with_geocode_delay(Duration::from_millis(config.geocoding.request_delay_ms)))
    }

    /// Run one submission to completion
    #[instrument(skip(self))]
    pub async fn run(&self, query: &str) -> Result<EstimationResult> {
        let query = AddressQuery::parse(query)?;

        if !self.geocode_delay.is_zero() {
            debug!("Waiting {:?} before geocoding", self.geocode_delay);
            tokio::time::sleep(self.geocode_delay).await;
        }
        let location = self.validator.validate(&query).await?;

        let recent_usage = self.energy.fetch_recent_usage().await;

        let house_size = estimation::estimate_house_size(&location);
        let window_count = estimation::estimate_window_count(house_size, &location);
        let energy = match recent_usage {
            Some(kwh) => EnergyEstimate::from_eia(kwh),
            None => EnergyEstimate::fallback(house_size),
        };

        let result = EstimationResult::assemble(location, house_size, window_count, energy);

        info!(
            "Estimated {} sq ft, {} windows, {} kWh/month ({}) for '{}'",
            result.house_size_sqft,
            result.window_count,
            result.monthly_energy_kwh,
            result.data_source,
            result.address
        );

        Ok(result)
    }

    /// Run one submission, publishing its state transitions
    ///
    /// Overlapping submissions all publish to the same channel; whichever
    /// finishes last is what observers see.
    pub async fn run_tracked(
        &self,
        query: &str,
        state: &watch::Sender<PipelineState>,
    ) -> Result<EstimationResult> {
        state.send_replace(PipelineState::Running {
            query: query.trim().to_string(),
        });

        let outcome = self.run(query).await;

        state.send_replace(match &outcome {
            Ok(result) => PipelineState::Success {
                result: result.clone(),
            },
            Err(e) => PipelineState::Failure {
                error: e.kind().to_string(),
                message: e.user_message(),
            },
        });

        outcome
    }
}
