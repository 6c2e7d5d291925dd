//! Product field extraction
//!
//! Pulls structured fields out of marketplace HTML using ordered fallback
//! selector lists. Page markup varies by template version, so each field
//! carries several candidates tried in sequence, most specific and legacy
//! layouts first; the first non-empty match wins. Name and price are
//! mandatory, everything else is best effort.

use chrono::Utc;
use scraper::{Html, Selector};

use crate::error::{TrackError, TrackResult};
use crate::marketplace;
use crate::types::ProductRecord;

/// Name candidates: current layout first, then the book layout
const NAME_SELECTORS: &[&str] = &["span#productTitle", "h1.product-title-word-break"];

/// Price candidates, ordered by observed reliability across layouts
const PRICE_SELECTORS: &[&str] = &[
    "span.a-price-whole",
    "span#priceblock_ourprice",
    "span#priceblock_dealprice",
    "span.a-price .a-offscreen",
    "span.a-price",
    ".a-price .a-offscreen",
    "#corePrice_feature_div .a-price .a-offscreen",
];

/// Image candidates, all read from the `src` attribute
const IMAGE_SELECTORS: &[&str] = &[
    "#landingImage",
    "#imgBlkFront",
    "img#main-image",
    ".a-dynamic-image",
];

/// Description candidates: prose description, then the feature bullets
const DESCRIPTION_SELECTORS: &[&str] = &["#productDescription p", "#feature-bullets .a-list-item"];

/// Longest description carried in a record, in characters
const MAX_DESCRIPTION_CHARS: usize = 200;

/// Extract a [`ProductRecord`] from product page HTML.
///
/// `url` must already be canonical; it is stored on the record verbatim and
/// decides the currency symbol by hostname. Fails with
/// [`TrackError::ExtractionFailed`] when no name or no price candidate
/// yields non-empty text.
pub fn extract_product(html: &str, url: &str, zip_code: &str) -> TrackResult<ProductRecord> {
    let document = Html::parse_document(html);

    let name = first_text(&document, NAME_SELECTORS)
        .ok_or(TrackError::ExtractionFailed { field: "name" })?;

    let price = first_text(&document, PRICE_SELECTORS)
        .map(|text| clean_price(&text))
        .filter(|p| !p.is_empty())
        .ok_or(TrackError::ExtractionFailed { field: "price" })?;

    let image_url = first_attr(&document, IMAGE_SELECTORS, "src");

    let description = joined_text(&document, DESCRIPTION_SELECTORS).map(|d| truncate(&d));

    tracing::debug!(%url, name = %name, "extracted product fields");

    Ok(ProductRecord {
        name,
        price,
        currency: marketplace::currency_for_url(url).to_string(),
        timestamp: Utc::now(),
        image_url,
        url: url.to_string(),
        zip_code: zip_code.to_string(),
        overview: None,
        description,
    })
}

/// Evaluate selector candidates in order; first non-empty trimmed text wins
fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    for candidate in selectors {
        let selector = match Selector::parse(candidate) {
            Ok(s) => s,
            Err(_) => continue,
        };
        if let Some(element) = document.select(&selector).next() {
            let text: String = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Evaluate selector candidates in order; the first candidate with any
/// non-empty match wins, gathering the text of every element it matches.
/// Feature-bullet lists match one element per bullet, so a single-element
/// read would keep only the first bullet.
fn joined_text(document: &Html, selectors: &[&str]) -> Option<String> {
    for candidate in selectors {
        let selector = match Selector::parse(candidate) {
            Ok(s) => s,
            Err(_) => continue,
        };
        let parts: Vec<String> = document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !parts.is_empty() {
            return Some(parts.join(" "));
        }
    }
    None
}

/// Evaluate selector candidates in order; first present attribute wins
fn first_attr(document: &Html, selectors: &[&str], attr: &str) -> Option<String> {
    for candidate in selectors {
        let selector = match Selector::parse(candidate) {
            Ok(s) => s,
            Err(_) => continue,
        };
        if let Some(value) = document
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(attr))
        {
            return Some(value.to_string());
        }
    }
    None
}

/// Strip everything that is not a digit, comma, or period
fn clean_price(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect()
}

/// Cap a description at [`MAX_DESCRIPTION_CHARS`], marking truncation
fn truncate(text: &str) -> String {
    let mut out: String = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        out.push_str("...");
    }
    out
}
