//! National energy statistics from the EIA v2 API
//!
//! The most recent monthly total-energy consumption figure (trillion BTU) is
//! converted to kWh and scaled to the residential share. Every failure
//! degrades to `None` so the caller can fall back to a formula.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::EnergyConfig;

/// kWh per trillion BTU
pub const KWH_PER_TRILLION_BTU: f64 = 293_071_070.0;
/// Residential share of total national consumption
pub const RESIDENTIAL_SHARE: f64 = 0.2;

/// Supplies a recent residential energy figure in kWh/month
#[async_trait]
pub trait EnergyDataFetcher: Send + Sync {
    /// Never fails; `None` means no usable figure
    async fn fetch_recent_usage(&self) -> Option<f64>;
}

/// Convert a raw trillion-BTU value to the residential kWh estimate
#[must_use]
pub fn residential_monthly_kwh(trillion_btu: f64) -> f64 {
    trillion_btu * KWH_PER_TRILLION_BTU * RESIDENTIAL_SHARE
}

/// EIA API client
pub struct EiaClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl EiaClient {
    /// Create a new client
    pub fn new(config: &EnergyConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn data_url(&self, api_key: &str) -> String {
        format!(
            "{}/total-energy/data/?api_key={}&frequency=monthly&data[0]=value&sort[0][column]=period&sort[0][direction]=desc&offset=0&length=5000",
            self.base_url,
            urlencoding::encode(api_key)
        )
    }

    async fn fetch_latest(&self) -> Result<eia::LatestValue> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("no EIA API key configured"))?;

        debug!("Requesting monthly total-energy data from {}", self.base_url);

        let response = self
            .client
            .get(self.data_url(api_key))
            .send()
            .await
            .context("EIA request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("EIA API responded with {status}");
        }

        let body = response.bytes().await.context("Failed to read EIA response")?;
        eia::parse_latest(&body)
    }
}

#[async_trait]
impl EnergyDataFetcher for EiaClient {
    #[instrument(skip(self))]
    async fn fetch_recent_usage(&self) -> Option<f64> {
        let start_time = Instant::now();

        match self.fetch_latest().await {
            Ok(latest) => {
                let kwh = residential_monthly_kwh(latest.trillion_btu);
                info!(
                    "EIA figure for {}: {} trillion BTU -> {:.0} kWh residential in {:.3}s",
                    latest.period.as_deref().unwrap_or("unknown period"),
                    latest.trillion_btu,
                    kwh,
                    start_time.elapsed().as_secs_f64()
                );
                Some(kwh)
            }
            Err(e) => {
                warn!("Energy data unavailable, falling back to estimate: {:#}", e);
                None
            }
        }
    }
}

/// EIA response structures
mod eia {
    use anyhow::{Context, Result, anyhow, bail};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct DataResponse {
        pub response: Option<ResponseBody>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseBody {
        #[serde(default)]
        pub data: Vec<Record>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Record {
        pub period: Option<String>,
        pub value: Option<RawValue>,
    }

    /// EIA sends values either as JSON numbers or as numeric strings
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum RawValue {
        Number(f64),
        Text(String),
    }

    impl RawValue {
        fn as_f64(&self) -> Option<f64> {
            match self {
                RawValue::Number(n) => Some(*n),
                RawValue::Text(s) => s.trim().parse().ok(),
            }
        }
    }

    #[derive(Debug, PartialEq)]
    pub struct LatestValue {
        pub period: Option<String>,
        pub trillion_btu: f64,
    }

    /// Extract the first (most recent) record's value
    pub fn parse_latest(body: &[u8]) -> Result<LatestValue> {
        let parsed: DataResponse =
            serde_json::from_slice(body).context("Failed to parse EIA response")?;

        let record = parsed
            .response
            .and_then(|r| r.data.into_iter().next())
            .ok_or_else(|| anyhow!("EIA response contains no data records"))?;

        let trillion_btu = record
            .value
            .as_ref()
            .and_then(RawValue::as_f64)
            .ok_or_else(|| anyhow!("EIA record has no numeric value"))?;

        // zero, negative or non-finite readings are not usable
        if !trillion_btu.is_finite() || trillion_btu <= 0.0 {
            bail!("EIA record value {trillion_btu} is not usable");
        }

        Ok(LatestValue {
            period: record.period,
            trillion_btu,
        })
    }
}
