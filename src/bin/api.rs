use lambda_runtime::{Error, service_fn};
use songsense::core::config::AppConfig;
use songsense::summarize::SummaryOrchestrator;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    songsense::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let orchestrator = SummaryOrchestrator::from_config(&config)
        .map_err(|e| Error::from(format!("Failed to initialize summarizers: {}", e)))?;
    let orchestrator = &orchestrator;

    lambda_runtime::run(service_fn(move |event| async move {
        songsense::api::handler(orchestrator, event).await
    }))
    .await
}
