//! HTTP server for the Fairway round tracker.
//!
//! Exposes round submission and handicap lookup over a small JSON API,
//! plus health and status endpoints for operators.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod server;

pub use server::{router, AppState, Server, ServerConfig, ServerConfigBuilder, DEFAULT_CORS_ORIGIN};
