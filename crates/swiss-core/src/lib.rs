//! Standings aggregation and Swiss pairing for the tournament service.
//!
//! After every round this crate turns the match ledger into a ranked
//! standings table, then pairs adjacent players for the next round. It
//! holds no state of its own: every call re-reads the store through the
//! [`SwissStore`] seam, so results always reflect the latest recorded match.
//!
//! # Flow
//!
//! ```text
//! resolver (get-or-create tournament)
//!     |
//!     +-- recorder (validate + append match) --> SwissStore
//!                                                   |
//!     standings (rank by wins) <--------------------+
//!         |
//!         +-- pairing (rank[2i] vs rank[2i+1])
//! ```
//!
//! # Modules
//!
//! - [`store`] -- [`SwissStore`] trait implemented by each backend.
//! - [`memory`] -- In-process [`MemoryStore`] backend.
//! - [`standings`] -- Standings aggregator.
//! - [`pairing`] -- Adjacent-rank pairing generator.
//! - [`recorder`] -- Match validation and recording.
//! - [`resolver`] -- Idempotent tournament get-or-create.
//! - [`sanitize`] -- Free-text cleanup applied before storage.
//! - [`service`] -- [`TournamentService`] facade over an injected store.
//! - [`config`] -- Configuration loading from `swiss-config.yaml`.
//! - [`error`] -- [`SwissError`] and [`StoreError`].
//!
//! [`SwissStore`]: store::SwissStore
//! [`MemoryStore`]: memory::MemoryStore
//! [`TournamentService`]: service::TournamentService
//! [`SwissError`]: error::SwissError
//! [`StoreError`]: error::StoreError

pub mod config;
pub mod error;
pub mod memory;
pub mod pairing;
pub mod recorder;
pub mod resolver;
pub mod sanitize;
pub mod service;
pub mod standings;
pub mod store;

pub use error::{StoreError, SwissError};
pub use memory::MemoryStore;
pub use service::TournamentService;
pub use store::SwissStore;
