use anyhow::{Context, Result};
use std::sync::Arc;
use vaartha::{analysis, api, config, logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::init_config().context("invalid configuration")?;
    logging::init_tracing(config);
    tracing::info!(
        classifier_provider = ?config.classifier_provider,
        classifier_url = %config.classifier_url,
        classifier_model = %config.classifier_model,
        fact_check_enabled = config.fact_check_api_key.is_some(),
        log_file = %config.log_file.display(),
        "Loaded configuration"
    );

    let service = analysis::AnalysisService::new()
        .await
        .context("failed to initialize analysis service")?;
    let app = api::create_router(Arc::new(service));

    let listener = server::bind_listener(config.server_port)
        .await
        .context("failed to bind listener")?;
    let port = listener.local_addr().context("listener has no address")?.port();
    tracing::info!("Listening on http://0.0.0.0:{port}");
    server::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")
}
