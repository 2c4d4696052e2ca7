/**
 * Stellar Server Entry Point
 *
 * Loads `.env`, initializes tracing, resolves the configuration and runs the
 * bootstrap sequence. Any startup failure exits with status 1.
 */

use stellar_backend::backend::server::{bootstrap, ServerConfig, StartupError};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    if let Err(e) = run().await {
        tracing::error!("Server startup failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    let server = bootstrap(config).await?;
    server.serve().await
}
