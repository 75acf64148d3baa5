//! Router assembly.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::require_auth;
use crate::state::AppState;

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/sessions", get(handlers::sessions::list_published));

    let protected_routes = Router::new()
        .route("/auth/verify", get(handlers::auth::verify))
        .route("/my-sessions", get(handlers::sessions::list_mine))
        .route(
            "/my-sessions/save-draft",
            post(handlers::sessions::save_draft),
        )
        .route("/my-sessions/publish", post(handlers::sessions::publish))
        .route(
            "/my-sessions/{id}",
            get(handlers::sessions::get_session)
                .put(handlers::sessions::update_session)
                .delete(handlers::sessions::delete_session),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
