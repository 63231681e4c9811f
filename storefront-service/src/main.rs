use service_core::observability::init_tracing;
use storefront_service::config::StorefrontConfig;
use storefront_service::services::init_metrics;
use storefront_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = StorefrontConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "storefront-service",
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );
    init_metrics();

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    application.run_until_stopped().await
}
