//! Route handlers, one module per resource.
//!
//! Routes described as admin operations (contact form review, catalogue
//! writes) are not authenticated; deployments must restrict them upstream.

pub mod company;
pub mod contact;
pub mod health;
pub mod projects;
pub mod reviews;
pub mod services;

use axum::routing::get;
use axum::Router;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Static status
        .route("/api", get(health::root))
        .route("/api/health", get(health::health))
        // Resources
        .nest("/api/company", company::router())
        .nest("/api/services", services::router())
        .nest("/api/projects", projects::router())
        .nest("/api/reviews", reviews::router())
        .nest("/api/contact", contact::router())
        .fallback(unknown_route)
}

async fn unknown_route() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
