//! HTTP surface: router, server lifecycle, error mapping.
//!
//! The router is composable — `api_router()` returns a `Router` that can be
//! mounted on any axum server instance; `start_api_server()` runs it with a
//! graceful-shutdown handle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession};
pub use types::ApiContext;
