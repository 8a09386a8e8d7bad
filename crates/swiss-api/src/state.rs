//! Shared application state for the tournament API.

use swiss_core::{SwissStore, TournamentService};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor. The service holds the store handle; the store owns its own
/// connection pool, so handlers never share mutable state.
#[derive(Debug)]
pub struct AppState<S> {
    /// Tournament operations over the configured backend.
    pub service: TournamentService<S>,
}

impl<S: SwissStore> AppState<S> {
    /// Create application state around a service.
    pub const fn new(service: TournamentService<S>) -> Self {
        Self { service }
    }
}
