//! Network Module
//!
//! HTTP server and request routing.
//!
//! ## Architecture
//! - axum router on a multi-threaded tokio runtime
//! - Each request is decoded into a protocol `Command`
//! - Commands routed through the Engine
//! - Graceful shutdown drains in-flight requests before the final save

mod routes;
mod server;

pub use routes::router;
pub use server::{shutdown_signal, Server};
