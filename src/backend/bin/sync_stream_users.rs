/**
 * One-shot Stream user sync
 *
 * Pushes every user in the database into the Stream directory and exits.
 * Only `DATABASE_URL`, `STREAM_API_KEY` and `STREAM_API_SECRET` are read,
 * and the schema is left as it is.
 *
 * Exits with status 1 if configuration is missing, the database is
 * unreachable or the pass stops early.
 */

use stellar_backend::backend::server::{connect_pool, SyncConfig};
use stellar_backend::backend::stream::StreamClient;
use stellar_backend::backend::sync::{sync_stream_users, SyncOutcome};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let pool = match connect_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let stream = StreamClient::new(config.stream);
    let outcome = sync_stream_users(&pool, &stream).await;
    pool.close().await;

    match outcome {
        SyncOutcome::Failed { .. } => std::process::exit(1),
        SyncOutcome::NoUsers | SyncOutcome::Completed { .. } => {}
    }
}
