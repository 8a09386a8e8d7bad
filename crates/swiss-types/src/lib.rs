//! Shared type definitions for the Swiss tournament service.
//!
//! This crate is the single source of truth for the types that flow
//! between the store, the core ranking logic, and the HTTP API. Types
//! defined here are exported to `TypeScript` via `ts-rs` for API clients.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for players, tournaments, and matches
//! - [`round`] -- The [`Round`] number attached to each recorded match
//! - [`structs`] -- Entity rows and the derived standings/pairing views

pub mod ids;
pub mod round;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::{MatchId, PlayerId, TournamentId};
pub use round::Round;
pub use structs::{MatchReport, NewMatch, NewTournament, Pairing, Player, StandingsRow, Tournament};
