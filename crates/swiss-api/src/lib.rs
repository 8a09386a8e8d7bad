//! HTTP API for the Swiss tournament service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Tournament endpoints** for get-or-create, lookup, enrollment,
//!   standings, and next-round pairings
//! - **Player endpoints** for registration, counting, and clearing
//! - **Match endpoints** for recording results by tournament id or by
//!   tournament name and year
//! - **`/health`** for liveness probes
//!
//! # Architecture
//!
//! Handlers are generic over the [`SwissStore`](swiss_core::SwissStore)
//! backend and call into a shared
//! [`TournamentService`](swiss_core::TournamentService). The HTTP layer
//! holds no tournament state of its own; every request reads or writes
//! the store.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
