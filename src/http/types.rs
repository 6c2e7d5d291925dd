//! HTTP API request/response types
//!
//! JSON-serializable types for the HTTP API. A successful track response is
//! the [`crate::types::ProductRecord`] itself.

use serde::{Deserialize, Serialize};

/// Track-price request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    /// Raw marketplace product URL
    #[serde(default)]
    pub product_url: Option<String>,
    /// Bare product identifier (alternative to `product_url`)
    #[serde(default)]
    pub product_id: Option<String>,
    /// ZIP/PIN code: 5-digit US ZIP or 6-digit Indian PIN
    #[serde(default)]
    pub zip_code: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Whether the service is healthy
    pub healthy: bool,
    /// Service version
    pub version: String,
}

/// Informational response for GET on the track route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    /// Usage hint
    pub message: String,
    /// The method that was used
    pub method: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_camel_case_body() {
        let body = r#"{"productId":"B000000000","zipCode":"201301"}"#;
        let request: TrackRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.product_id.as_deref(), Some("B000000000"));
        assert_eq!(request.zip_code.as_deref(), Some("201301"));
        assert!(request.product_url.is_none());
    }

    #[test]
    fn test_request_fields_all_default_to_none() {
        let request: TrackRequest = serde_json::from_str("{}").unwrap();
        assert!(request.product_url.is_none());
        assert!(request.product_id.is_none());
        assert!(request.zip_code.is_none());
    }
}
