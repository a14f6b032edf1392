use std::sync::Arc;

use yacc_core::allocator::Allocator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Slot allocator wired to the store and mailer.
    pub allocator: Arc<Allocator>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
