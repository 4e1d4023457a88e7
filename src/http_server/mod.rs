//! # Gallery HTTP Server Module
//!
//! Combines the entity resources and management endpoints into one Axum
//! server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/{albums,photos,tags}` - Entity resources and criteria queries
//! - `/management/metrics` - Counter snapshot

pub mod observability_routes;
pub mod server;

pub use server::{AppState, HttpServer};
