//! Slotwatch
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - COWIN_CENTER_CODES: Comma-separated location codes to monitor
//! - COWIN_DISTRICT_CODE_URL: Availability query base URL template
//! - COWIN_REQUEST_USER_AGENT: User-Agent sent with every availability query
//! - PAGER_DUTY_ROUTING_KEY: Routing key for trigger events
//! - PAGER_DUTY_ALERT_URL: Paging endpoint URL
//! - RUST_LOG: Log level (default: info)
//!
//! An optional `.env` file in the working directory is loaded first.

use slotwatch::availability::AvailabilityClient;
use slotwatch::config::Config;
use slotwatch::pager::PagerClient;
use slotwatch::watcher::Watcher;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The .env file is optional; hold on to the result until logging is up.
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slotwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Ok(path) => tracing::info!("Loaded environment from {}", path.display()),
        Err(e) => tracing::info!("Could not load env variables: {}", e),
    }

    let config = Config::from_env()?;

    tracing::info!("Slotwatch {} configuration:", env!("CARGO_PKG_VERSION"));
    tracing::info!("  Locations monitored: {}", config.center_codes.len());
    for code in &config.center_codes {
        tracing::info!("    - {}", code);
    }
    tracing::info!("  Availability endpoint: {}", config.availability_url);
    tracing::info!("  Paging endpoint: {}", config.pager_url);

    let client = AvailabilityClient::new(&config.availability_url, &config.user_agent);
    let pager = PagerClient::new(&config.pager_url);
    let watcher = Watcher::new(client, pager, config.center_codes, config.routing_key);

    // Runs until the process is killed.
    watcher.run().await;
    Ok(())
}
