//! Real HTTP clients against local stub providers

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use home_energy_estimator::config::{EnergyConfig, GeocodingConfig};
use home_energy_estimator::{
    AddressQuery, AddressValidator, DataSource, EiaClient, EnergyDataFetcher, EstimationPipeline,
    EstimatorError, NominatimClient, TransportError,
};

async fn search(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    assert_eq!(params.get("format").map(String::as_str), Some("json"));
    assert_eq!(params.get("limit").map(String::as_str), Some("1"));
    assert_eq!(params.get("addressdetails").map(String::as_str), Some("1"));

    match params.get("q").map(String::as_str) {
        Some("V6B 1A1") => Json(json!([{
            "lat": "49.2800",
            "lon": "-123.1150",
            "class": "building",
            "type": "apartment",
            "display_name": "V6B 1A1, Downtown, Vancouver, British Columbia, Canada",
            "address": {"road": "Cambie Street", "building": "Harbour Tower"}
        }]))
        .into_response(),
        Some("busy street") => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => Json(json!([])).into_response(),
    }
}

async fn total_energy(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("api_key").map(String::as_str) {
        Some("good-key") => Json(json!({"response": {"data": [
            {"period": "2024-06", "value": "0.0001"},
            {"period": "2024-05", "value": "9000"}
        ]}}))
        .into_response(),
        _ => (StatusCode::FORBIDDEN, Json(json!({"error": "invalid api key"}))).into_response(),
    }
}

/// Serve both stub providers on an ephemeral port and return the base URL
async fn spawn_providers() -> String {
    let app = Router::new()
        .route("/search", get(search))
        .route("/total-energy/data/", get(total_energy));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn geocoder(base_url: &str) -> NominatimClient {
    NominatimClient::new(&GeocodingConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        ..GeocodingConfig::default()
    })
    .unwrap()
}

fn energy(base_url: &str, api_key: &str) -> EiaClient {
    EiaClient::new(&EnergyConfig {
        api_key: Some(api_key.to_string()),
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_geocoder_parses_provider_result() {
    let base_url = spawn_providers().await;

    let location = geocoder(&base_url)
        .validate(&AddressQuery::parse("V6B 1A1").unwrap())
        .await
        .unwrap();

    assert_eq!(location.property_type.as_deref(), Some("apartment"));
    assert_eq!(location.latitude, 49.28);
    assert!(location.address_details.unwrap().has_named_building());
}

#[tokio::test]
async fn test_geocoder_empty_result_is_not_found() {
    let base_url = spawn_providers().await;

    let err = geocoder(&base_url)
        .validate(&AddressQuery::parse("Atlantis").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, EstimatorError::not_found("Atlantis"));
}

#[tokio::test]
async fn test_geocoder_error_status_is_remote() {
    let base_url = spawn_providers().await;

    let err = geocoder(&base_url)
        .validate(&AddressQuery::parse("busy street").unwrap())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EstimatorError::Transport(TransportError::Remote {
            status: 503,
            reason: "Service Unavailable".to_string(),
        })
    );
    assert_eq!(err.user_message(), "Server error: 503 - Service Unavailable");
}

#[tokio::test]
async fn test_energy_client_reads_latest_record() {
    let base_url = spawn_providers().await;

    let kwh = energy(&base_url, "good-key").fetch_recent_usage().await.unwrap();

    assert_eq!(kwh.round(), 5861.0);
}

#[tokio::test]
async fn test_energy_client_rejected_key_yields_none() {
    let base_url = spawn_providers().await;

    assert_eq!(energy(&base_url, "bad-key").fetch_recent_usage().await, None);
}

#[tokio::test]
async fn test_full_pipeline_over_http() {
    let base_url = spawn_providers().await;
    let pipeline = EstimationPipeline::new(
        Arc::new(geocoder(&base_url)),
        Arc::new(energy(&base_url, "good-key")),
    )
    .with_geocode_delay(Duration::from_millis(10));

    let result = pipeline.run("V6B 1A1").await.unwrap();

    // apartment with a named building: 1000 * 0.5
    assert_eq!(result.house_size_sqft, 500);
    assert_eq!(result.window_count, 5);
    assert_eq!(result.monthly_energy_kwh, 5861);
    assert_eq!(result.data_source, DataSource::Eia);
}
