//! Error taxonomy for the tracking pipeline
//!
//! Every failure a request can surface maps onto one of these variants.
//! Overview generation is deliberately absent: it degrades to a placeholder
//! and never fails a request.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur while tracking a product
#[derive(Debug, Error)]
pub enum TrackError {
    /// Request body was missing, malformed, or named neither/both of
    /// productUrl and productId
    #[error("{0}")]
    InvalidRequestBody(String),

    /// URL host is not one of the supported marketplaces
    #[error("Only Amazon.in and Amazon.com URLs are currently supported")]
    UnsupportedMarketplace,

    /// URL could not be parsed at all
    #[error("Please enter a valid URL: {0}")]
    InvalidUrl(String),

    /// ZIP/PIN code was missing or malformed
    #[error("Please enter a valid 6-digit Indian PIN code or 5-digit US ZIP code")]
    MissingLocale,

    /// Client exceeded the request quota or is in a block period
    #[error("{0}")]
    RateLimited(String),

    /// Product page fetch failed or returned a non-success status
    #[error("Failed to fetch product page: {status}")]
    FetchFailed { status: u16 },

    /// A required field could not be located in the page markup
    #[error("Could not extract product {field}")]
    ExtractionFailed { field: &'static str },

    /// Anything else
    #[error("An unexpected error occurred")]
    Internal(#[from] anyhow::Error),
}

impl TrackError {
    /// Short machine-readable code for the error response body
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequestBody(_) => "INVALID_REQUEST",
            Self::UnsupportedMarketplace => "UNSUPPORTED_MARKETPLACE",
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::MissingLocale => "INVALID_ZIP_CODE",
            Self::RateLimited(_) => "RATE_LIMITED",
            Self::FetchFailed { .. } => "FETCH_FAILED",
            Self::ExtractionFailed { .. } => "EXTRACTION_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status this error surfaces as.
    ///
    /// The mapping is deliberately coarse: all validation problems are 400,
    /// quota problems are 429, and every downstream fetch or extraction
    /// failure is a 500 echoing the underlying message.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_)
            | Self::UnsupportedMarketplace
            | Self::InvalidUrl(_)
            | Self::MissingLocale => StatusCode::BAD_REQUEST,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::FetchFailed { .. } | Self::ExtractionFailed { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Result type for tracking operations
pub type TrackResult<T> = Result<T, TrackError>;
