//! basketbridge-api: HTTP surface over the BasketBridge engine.
//!
//! Exposed as a library so the integration tests can build the router with a
//! stub chat backend; the binary in `main.rs` wires the real one.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod upstream;

use basketbridge_core::Dataset;
use session::Sessions;
use std::sync::Arc;
use upstream::ChatBackend;

/// Shared application state. The dataset is immutable after startup; the
/// session set is the only mutable piece.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub sessions: Sessions,
    pub chat: Arc<dyn ChatBackend>,
    pub passcode: Option<String>,
}
