//! HTTP API in front of yt-dlp metadata extraction.
//!
//! Routes:
//!
//! | Route | Guarded | Purpose |
//! |---|---|---|
//! | `GET /` | no | static greeting |
//! | `GET /health` | no | liveness report |
//! | `GET /authd` | yes | credential check |
//! | `GET /ytdlp` | yes | metadata for the configured demo URL |
//! | `GET /info?url=..&format=..` | yes | metadata for any URL |
//!
//! Every error leaves the service as an [`error::ErrorEnvelope`].

pub mod auth;
pub mod config;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod health;
pub mod state;

use axum::{Router, extract::Request, middleware, routing::get};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::Span;

use handlers::{extract, general};
use state::AppState;

pub fn app(state: AppState) -> Router {
    let guarded = Router::new()
        .route("/authd", get(general::authd))
        .route("/ytdlp", get(extract::ytdlp))
        .route("/info", get(extract::info))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    Router::new()
        .route("/", get(general::root))
        .route("/health", get(general::health))
        .merge(guarded)
        .fallback(general::not_found)
        .method_not_allowed_fallback(general::method_not_allowed)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %uuid7::uuid7()
    )
}
