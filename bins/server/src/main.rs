//! Print Relay Server
//!
//! Main entry point for the Print Relay backend service.

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use printrelay_api::{AppState, create_router};
use printrelay_mail::{PrintRelay, build_transport};
use printrelay_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "printrelay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Create mail transport and relay
    let transport = build_transport(&config.mail)?;
    let relay = PrintRelay::new(transport, &config.mail);
    info!(
        transport = relay.transport_name(),
        timeout_secs = config.mail.timeout_secs,
        sender_configured = config.mail.sender().is_some(),
        destination_configured = config.mail.destination().is_some(),
        "Mail relay configured"
    );
    if config.server.diagnostics_enabled {
        warn!("Diagnostic route /test-email is enabled");
    }

    // Create router
    let app = create_router(AppState::new(relay), &config.server);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
