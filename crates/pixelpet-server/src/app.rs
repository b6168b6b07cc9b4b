//! Axum application builder.
//!
//! Account and pet routes are mounted twice: at the root and under
//! `/api`, which is where the bundled browser client calls them.

use std::path::Path;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::routes::{account, health, pet};
use crate::state::ServerState;

fn api_routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(account::register))
        .route("/login", post(account::login))
        .route("/pet", get(pet::get_pet))
        .route("/pet/mood", get(pet::get_mood))
        .route("/feed", post(pet::feed))
        .route("/play", post(pet::play))
        .route("/sleep", post(pet::sleep))
        .route("/reset", post(pet::reset))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Create the Axum application with all routes.
///
/// When `static_dir` is set, unmatched paths are served from it.
pub fn create_app(state: ServerState, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/health", get(health::health))
        .merge(api_routes())
        .nest("/api", api_routes());

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state)
}
