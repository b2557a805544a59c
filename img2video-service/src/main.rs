use img2video_service::config::Img2VideoConfig;
use img2video_service::services::init_metrics;
use img2video_service::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok().filter(|e| !e.is_empty());
    init_tracing("img2video-service", "info", otlp_endpoint.as_deref());

    init_metrics();

    let config = Img2VideoConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
