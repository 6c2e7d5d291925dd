//! Product page fetching and field extraction

pub mod extractor;
pub mod fetcher;

pub use extractor::extract_product;
pub use fetcher::{FetchConfig, PageFetch, PageFetcher};
