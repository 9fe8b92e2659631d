//! Root and health check endpoints.

use axum::Json;
use serde::Serialize;

/// API version reported by the root endpoint.
pub const API_VERSION: &str = "1.0.0";

#[derive(Serialize)]
pub struct Welcome {
    pub message: String,
    pub message_en: String,
    pub version: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct Health {
    pub status: String,
    pub message: String,
}

/// Static welcome payload.
pub async fn root() -> Json<Welcome> {
    Json(Welcome {
        message: "مرحباً بك في API شركة المستودعات السوداء المحدودة".to_string(),
        message_en: "Welcome to Al-Sawda Warehouses Limited Company API".to_string(),
        version: API_VERSION.to_string(),
        status: "active".to_string(),
    })
}

/// Health check endpoint.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        message: "Al-Sawda Warehouses API is running smoothly".to_string(),
    })
}
