//! Liveness handlers

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Root banner response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BannerResponse {
    pub message: String,
}

/// Healthcheck handler
///
/// Returns service health status
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Root handler
#[endpoint(tags("health"), summary = "Server banner")]
pub(crate) async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Server Running!".to_string(),
    })
}
