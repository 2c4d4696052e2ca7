/**
 * Router Configuration
 *
 * Combines the API groups, the frontend bundle and the middleware stack
 * into a single Axum router.
 *
 * # Middleware Order (outermost first)
 *
 * 1. Security headers
 * 2. CORS
 * 3. Request tracing
 *
 * JSON bodies and cookies are handled per handler by the `Json` and
 * `CookieJar` extractors.
 */

use std::path::Path;

use axum::{http::Uri, Router};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::security::{cors_layer, security_headers};
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Static bundle with `index.html` as the fallback for client-side routes
fn frontend_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

async fn not_found(uri: Uri) -> BackendError {
    BackendError::not_found(format!("Route {} not found", uri.path()))
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Shared handler state
/// * `config` - Decides frontend serving and the CORS allow-list
///
/// # Fallback
///
/// With `serves_frontend`, unmatched requests are answered from
/// `frontend_dir`, falling back to its `index.html`. Otherwise they get a
/// JSON 404.
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    let router = configure_api_routes(Router::new());

    let router = if config.serves_frontend {
        tracing::info!("Serving frontend from {}", config.frontend_dir.display());
        router.fallback_service(frontend_service(&config.frontend_dir))
    } else {
        router.fallback(not_found)
    };

    let mut router = router
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins));

    for layer in security_headers() {
        router = router.layer(layer);
    }

    router
}
