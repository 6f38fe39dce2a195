use std::path::PathBuf;

use anyhow::{Context, Result};
use home_energy_estimator::{EstimationPipeline, EstimatorConfig, VERSION, logging, web};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional explicit config file as the only argument
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config =
        EstimatorConfig::load_from_path(config_path).context("Failed to load configuration")?;

    logging::init(&config.logging)?;
    info!("Home Energy Estimator v{} starting", VERSION);

    let pipeline = EstimationPipeline::from_config(&config)?;
    web::run(&config.server, pipeline).await
}
