// Loads the gazetteer and wakes every inference model ahead of traffic.

use anyhow::{Context, anyhow};
use songsense::ai::InferenceClient;
use songsense::core::config::AppConfig;
use songsense::nlp::Gazetteer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    songsense::setup_logging();

    let config = AppConfig::from_env().map_err(|e| anyhow!("Config error: {e}"))?;

    let gazetteer = Gazetteer::bundled();
    info!("Gazetteer ready with {} entries", gazetteer.len());

    let client = InferenceClient::from_config(&config).context("building inference client")?;
    client.warm_up().await.context("warming up models")?;

    info!("All models warmed up");
    Ok(())
}
