//! REST API for the Al-Sawda Warehouses company site.
//!
//! Serves the company profile, service catalogue, project gallery, customer
//! reviews and contact forms as JSON under `/api`.

pub mod config;
pub mod envelope;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

pub use crate::config::Config;
pub use crate::error::ApiError;
pub use crate::state::AppState;

/// Build the full application: routes, open CORS and request tracing.
///
/// A trailing slash is trimmed before routing, so `/api/services/` and
/// `/api/services` reach the same handler. Serve the result with
/// `axum::ServiceExt::<Request>::into_make_service`.
pub fn app(state: AppState) -> NormalizePath<Router> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = routes::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePath::trim_trailing_slash(router)
}
