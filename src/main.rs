mod adapters;
mod application;
mod config;
mod domain;
mod interface;
mod ports;
#[cfg(all(test, unix))]
mod test_support;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::RuntimeService;
use config::Config;
use interface::http::create_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("dockpanel={},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting dockpanel v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    // Select the backend once; it serves every request from here on
    let runtime_service = RuntimeService::detect(&config.engine()).await;
    info!("✓ Runtime backend: {}", runtime_service.backend());

    // Create HTTP server
    let app = create_router(runtime_service, config.request_timeout);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("✓ dockpanel listening on {}", addr);
    info!("  → API: http://localhost:{}/api/v1/dashboard", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
