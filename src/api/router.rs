use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::middleware::{logging_middleware, token_filter};
use super::state::AppState;

/// Create the full router with application state
///
/// Every route of the auth router sits behind the token filter (which forwards
/// allow-listed paths such as `/login` unchecked). Health probes are mounted
/// outside it.
pub fn create_router(state: AppState) -> Router {
    let protected = auth::create_auth_router()
        .layer(middleware::from_fn_with_state(state.clone(), token_filter));

    let probes = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check));

    protected
        .merge(probes)
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
