//! Core data types shared across the service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked product as extracted from a marketplace page.
///
/// `name` and `price` are always present in a successful result; the
/// extractor fails hard when either is missing. `image_url`, `overview`,
/// and `description` are best-effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Product title as shown on the page
    pub name: String,
    /// Price as decimal text with currency symbols stripped
    pub price: String,
    /// Currency symbol inferred from the marketplace host
    pub currency: String,
    /// When the extraction happened (UTC)
    pub timestamp: DateTime<Utc>,
    /// Main product image, when one of the image selectors matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Canonical product URL the data came from
    pub url: String,
    /// ZIP/PIN code the request was made for
    pub zip_code: String,
    /// Generated product overview (template-filled, not inference)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// On-page description, truncated to 200 characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_and_skips_absent_optionals() {
        let record = ProductRecord {
            name: "Widget".to_string(),
            price: "19.99".to_string(),
            currency: "$".to_string(),
            timestamp: Utc::now(),
            image_url: None,
            url: "https://www.amazon.com/dp/B000000000".to_string(),
            zip_code: "90210".to_string(),
            overview: None,
            description: Some("A widget".to_string()),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["zipCode"], "90210");
        assert_eq!(json["description"], "A widget");
        assert!(json.get("imageUrl").is_none());
        assert!(json.get("overview").is_none());
    }
}
