mod body;
mod cors;
mod error;
mod height;
mod lifecycle;
mod proxy;

pub use lifecycle::{start, ServerConfig};

use std::path::Path;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::routing::{delete, get, put};
use axum::{middleware, Router};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use height_relay_core::provider::HeightProvider;
use height_relay_core::store::HeightStore;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub store: Arc<dyn HeightStore>,
    pub provider: Arc<dyn HeightProvider>,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

const BODY_LIMIT: usize = 64 * 1024;

/// Build the full HTTP surface. Files under `public_dir` win over the
/// dynamic routes; anything neither serves gets the JSON 404.
///
/// A subdirectory of `public_dir` answers its own bare path with a redirect
/// to the trailing-slash form (so `public/block-info/` turns `GET /block-info`
/// into a 307), the same way `/` resolves to `index.html`. Paths below it
/// still fall through to the routes when no file matches.
pub fn build_router(state: AppState, public_dir: &Path) -> Router {
    let shared = Arc::new(state);

    let api = Router::new()
        .route("/current-height-db", get(height::get_current_height))
        .route("/latest-block-height", get(proxy::latest_block_height))
        .route(
            "/delete-and-instantiate/{height}",
            delete(height::delete_and_instantiate),
        )
        .route("/update-height", put(height::update_height))
        .route("/block-info/{height}", get(proxy::block_info))
        .route("/get-current-difficulty", get(proxy::current_difficulty))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(shared);

    let static_files = ServeDir::new(public_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(api);

    Router::new()
        .fallback_service(static_files)
        .layer(middleware::from_fn(cors::cors_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http-request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

async fn not_found() -> error::AppError {
    error::AppError::NotFound("Not Found".to_string())
}
