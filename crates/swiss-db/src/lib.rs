//! `PostgreSQL` data layer for the Swiss tournament service.
//!
//! Holds the durable rows the tournament core reads and writes: players,
//! tournaments, entrants, and the append-only match ledger. Standings are
//! derived by the `player_standings` view on every read and never stored.
//!
//! # Architecture
//!
//! ```text
//! swiss-core components
//!     |
//!     +-- SwissStore trait --> PgSwissStore
//!                                 |-- PlayerStore      (players)
//!                                 |-- TournamentStore  (tournaments + entrants)
//!                                 +-- MatchStore       (matches + standings view)
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool, configuration, and migrations
//! - [`player_store`] -- Player registration and lookup
//! - [`tournament_store`] -- Tournament get-or-insert and enrollment
//! - [`match_store`] -- Match ledger inserts and standings queries
//! - [`store`] -- [`PgSwissStore`], the `SwissStore` implementation
//! - [`error`] -- Shared error types

pub mod error;
pub mod match_store;
pub mod player_store;
pub mod postgres;
pub mod store;
pub mod tournament_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use match_store::{MatchStore, RecordRow};
pub use player_store::{PlayerRow, PlayerStore};
pub use postgres::{PostgresConfig, PostgresPool};
pub use store::PgSwissStore;
pub use tournament_store::{TournamentRow, TournamentStore};
