/**
 * Application State Management
 *
 * `AppState` holds the long-lived resources every handler may need: the
 * database pool, the Stream client and the session signing keys. Each is
 * created once during bootstrap and shared by cloning handles.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the piece they
 * need, e.g. `State(pool): State<PgPool>`.
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::stream::StreamClient;

/// Application state shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: PgPool,

    /// Stream client, constructed once from the configured credentials
    pub stream: StreamClient,

    /// Session token signing secret and cookie policy
    pub sessions: SessionKeys,
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for StreamClient {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.stream.clone()
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}
