use anyhow::Context;
use momo_gateway::{config::ConfigValidator, shared::LoggingUtils, AppConfig, HttpServer};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        // Logging may not be initialized yet when configuration fails
        eprintln!("Fatal error: {:#}", e);
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize logging
    LoggingUtils::initialize(&config.logging.level, &config.logging.format)
        .context("Failed to initialize logging")?;
    ConfigValidator::log_startup_warnings(&config);

    info!("Starting MoMo payments gateway...");

    // Create and start server
    let server = HttpServer::new(config).context("Failed to initialize server")?;
    info!("Server starting on {}", server.config().server_address());

    server.run().await.context("Server error")?;

    Ok(())
}
