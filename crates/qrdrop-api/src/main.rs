use qrdrop_core::config::log_format_from_lookup;
use qrdrop_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    // Logging comes up before the full configuration so config errors are reported.
    qrdrop_infra::init_telemetry(log_format_from_lookup(&|key: &str| std::env::var(key).ok()))
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
    })?;
    tracing::info!(environment = %config.environment(), "Configuration loaded");

    let (_state, router) = qrdrop_api::setup::initialize_app(config.clone()).await?;

    qrdrop_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
