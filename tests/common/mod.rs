#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use home_energy_estimator::{
    AddressDetails, AddressQuery, AddressValidator, EnergyDataFetcher, EstimationPipeline,
    EstimatorError, LocationRecord,
};

/// Geocoder answering from a fixed list of (query, record) pairs
pub struct StaticGeocoder {
    entries: Vec<(String, LocationRecord)>,
    pub calls: AtomicUsize,
}

impl StaticGeocoder {
    pub fn new(entries: Vec<(&str, LocationRecord)>) -> Arc<Self> {
        Arc::new(Self {
            entries: entries
                .into_iter()
                .map(|(query, record)| (query.to_string(), record))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressValidator for StaticGeocoder {
    async fn validate(&self, query: &AddressQuery) -> home_energy_estimator::Result<LocationRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries
            .iter()
            .find(|(known, _)| known == query.as_str())
            .map(|(_, record)| record.clone())
            .ok_or_else(|| EstimatorError::not_found(query.as_str()))
    }
}

pub struct StaticEnergy {
    usage: Option<f64>,
    pub calls: AtomicUsize,
}

impl StaticEnergy {
    pub fn new(usage: Option<f64>) -> Arc<Self> {
        Arc::new(Self {
            usage,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EnergyDataFetcher for StaticEnergy {
    async fn fetch_recent_usage(&self) -> Option<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.usage
    }
}

/// Known addresses used across the integration tests
pub fn known_addresses() -> Vec<(&'static str, LocationRecord)> {
    vec![
        (
            "123 Main St, Vancouver",
            LocationRecord::new("123, Main Street, Vancouver, British Columbia, Canada", 49.2827, -123.1207)
                .with_property_type("house")
                .with_address_details(AddressDetails {
                    house_number: Some("123".into()),
                    road: Some("Main Street".into()),
                    building: None,
                }),
        ),
        (
            "V6B 1A1",
            LocationRecord::new("V6B 1A1, Downtown, Vancouver, British Columbia, Canada", 49.2800, -123.1150)
                .with_property_type("apartment"),
        ),
    ]
}

pub fn pipeline(geocoder: &Arc<StaticGeocoder>, energy: &Arc<StaticEnergy>) -> EstimationPipeline {
    EstimationPipeline::new(geocoder.clone(), energy.clone()).with_geocode_delay(Duration::ZERO)
}
