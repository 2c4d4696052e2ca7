/**
 * Server Initialization
 *
 * `bootstrap` turns a `ServerConfig` into a bound, ready-to-serve `Server`.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL and run migrations
 * 2. Create the Stream client and session keys
 * 3. Build the router
 * 4. Run the warm-up directory sync (development only by default)
 * 5. Bind the listener
 *
 * A database or bind failure aborts startup. A sync failure is logged and
 * startup continues.
 */

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::routes::create_router;
use crate::backend::server::config::{ConfigError, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::stream::StreamClient;
use crate::backend::sync::{sync_stream_users, SyncOutcome, UserSource};

const DB_MAX_CONNECTIONS: u32 = 10;
const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Fatal startup failures
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to connect to database: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Failed to run database migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// A bound listener plus the application it will serve
pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("listener", &self.listener.local_addr().ok())
            .finish_non_exhaustive()
    }
}

impl Server {
    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr, StartupError> {
        self.listener.local_addr().map_err(StartupError::Bind)
    }

    /// Serve until Ctrl-C
    pub async fn serve(self) -> Result<(), StartupError> {
        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!("Server running on port {}", addr.port());
        }

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(StartupError::Serve)?;

        tracing::info!("Server shut down gracefully");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal");
}

/// Connect to PostgreSQL without touching the schema
pub async fn connect_pool(database_url: &str) -> Result<PgPool, StartupError> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(DB_MAX_CONNECTIONS)
        .acquire_timeout(DB_ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await
        .map_err(StartupError::Database)?;

    tracing::info!("Database connected");
    Ok(pool)
}

/// Connect to PostgreSQL and bring the schema up to date
pub async fn connect_database(database_url: &str) -> Result<PgPool, StartupError> {
    let pool = connect_pool(database_url).await?;

    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed");

    Ok(pool)
}

/// Log the result of a warm-up sync
fn log_sync_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::NoUsers => tracing::info!("Warm-up sync: no users to sync"),
        SyncOutcome::Completed { batches, users } => {
            tracing::info!("Warm-up sync: {} users in {} batches", users, batches)
        }
        SyncOutcome::Failed {
            batches_succeeded,
            batches_total,
            error,
            ..
        } => tracing::warn!(
            "Warm-up sync stopped after {}/{} batches: {}; continuing startup",
            batches_succeeded,
            batches_total,
            error
        ),
    }
}

/// Prepare the server described by `config`
///
/// # Errors
///
/// Returns `StartupError` if the database is unreachable, migrations fail, or
/// the port cannot be bound. No route is served in that case.
pub async fn bootstrap(config: ServerConfig) -> Result<Server, StartupError> {
    tracing::info!("Initializing Stellar backend server ({:?} mode)", config.mode);

    let db_pool = connect_database(&config.database_url).await?;

    let app_state = AppState {
        db_pool,
        stream: StreamClient::new(config.stream.clone()),
        sessions: SessionKeys::new(config.jwt_secret.clone(), config.mode.is_production()),
    };

    let app = create_router(app_state.clone(), &config);
    tracing::info!("Router configured");

    let listener = warm_up_and_bind(&config, &app_state.db_pool, &app_state.stream).await?;

    Ok(Server { listener, app })
}

/// Run the warm-up sync if enabled, then bind the listener
///
/// The sync outcome is only logged; a failed pass never prevents binding.
pub async fn warm_up_and_bind(
    config: &ServerConfig,
    users: &dyn UserSource,
    stream: &StreamClient,
) -> Result<TcpListener, StartupError> {
    if config.runs_warmup_sync {
        let outcome = sync_stream_users(users, stream).await;
        log_sync_outcome(&outcome);
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.map_err(StartupError::Bind)?;
    tracing::info!("Listening on {}", addr);

    Ok(listener)
}
