use service_core::observability::{init_tracing, shutdown_tracing};
use stuff_service::config::{LoggingConfig, StuffConfig};
use stuff_service::services::init_metrics;
use stuff_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let logging = LoggingConfig::load()
        .map_err(|e| std::io::Error::other(format!("Configuration error: {}", e)))?;
    init_tracing(
        "stuff-service",
        &logging.level,
        logging.otlp_endpoint.as_deref(),
    );

    // Must be installed before any metrics are recorded
    init_metrics().map_err(|e| {
        tracing::error!("Failed to initialize metrics: {}", e);
        std::io::Error::other(format!("Metrics error: {}", e))
    })?;

    let config = StuffConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    // Without the store no request can be served, so a failed connect is fatal
    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start stuff-service: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    let result = app.run_until_stopped().await;
    shutdown_tracing();
    result
}
