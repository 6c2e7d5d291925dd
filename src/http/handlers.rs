//! HTTP API request handlers
//!
//! Handlers that map HTTP requests onto the tracker pipeline.

use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{debug, error};

use super::types::{ErrorResponse, HealthResponse, InfoResponse, TrackRequest};
use crate::error::TrackError;
use crate::scraping::PageFetcher;
use crate::tracker::{TrackQuery, Tracker};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Tracker<PageFetcher>>,
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET on the track route is informational only
pub async fn track_price_info() -> impl IntoResponse {
    Json(InfoResponse {
        message: "This endpoint requires a POST request with a product URL and ZIP code"
            .to_string(),
        method: "GET".to_string(),
    })
}

/// Track-price endpoint
pub async fn track_price(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TrackRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            debug!(%rejection, "rejecting malformed track-price body");
            return error_response(&TrackError::InvalidRequestBody(
                "Invalid JSON in request body".to_string(),
            ));
        }
    };

    let client_id = client_ip(&headers);
    debug!(
        client = %client_id,
        product_url = ?request.product_url,
        product_id = ?request.product_id,
        "track-price request"
    );

    let query = TrackQuery {
        product_url: request.product_url,
        product_id: request.product_id,
        zip_code: request.zip_code,
    };

    match state.tracker.track(&query, &client_id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => {
            error!(client = %client_id, code = err.code(), "track-price failed: {}", err);
            error_response(&err)
        }
    }
}

/// Best-effort client IP from proxy headers
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Render a tracking error with its HTTP status
fn error_response(err: &TrackError) -> axum::response::Response {
    (
        err.status_code(),
        Json(ErrorResponse::new(err.code(), err.to_string())),
    )
        .into_response()
}
