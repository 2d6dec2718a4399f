//! # forecast-server
//!
//! Binary entry point: loads configuration, initializes tracing and serves
//! the forecasting API.

use clap::Parser;
use forecast_server::config::ServeArgs;
use forecast_server::{build_router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "forecast_server=info,forecaster_api=info,tower_http=info".into()
            }),
        )
        .init();

    let args = ServeArgs::parse();
    let addr = args.socket_addr()?;
    let app = build_router(AppState::default());

    tracing::info!(
        "forecast-server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
