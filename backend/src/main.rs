//! Hazard Relay - server binary

use hazard_relay::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hazard_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    tracing::info!("Starting Hazard Relay");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        feed = %config.upstream.feed_url,
        timeout_secs = config.upstream.timeout_secs,
        "Upstream services configured"
    );

    let addr = config.bind_address();
    let state = AppState::new(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
