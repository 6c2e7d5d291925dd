//! HTTP API server module
//!
//! Exposes the tracking pipeline as a small REST API: `POST /track-price`
//! does the work, `GET /track-price` is informational, `GET /health` is a
//! liveness probe.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use server::HttpServer;
