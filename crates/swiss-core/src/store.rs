//! The persistence seam between the core and its backends.
//!
//! The core never talks to a database directly. Each component takes a
//! `&S where S: SwissStore` and issues one call per store operation, so
//! connection acquisition and release stay inside the backend. Methods
//! return `Send` futures so the components can run inside `axum` handlers.
//!
//! Two backends exist: `swiss_db::PgSwissStore` (`PostgreSQL`) and
//! [`MemoryStore`](crate::memory::MemoryStore).

use std::future::Future;

use swiss_types::{
    MatchId, NewMatch, NewTournament, Player, PlayerId, Round, StandingsRow, Tournament,
    TournamentId,
};

use crate::error::StoreError;

/// Durable storage for players, tournaments, entrants, and the match ledger.
pub trait SwissStore: Send + Sync {
    /// Every entrant of a tournament with cumulative wins and matches played.
    ///
    /// Rows for players tied on wins must come back in registration order.
    /// An unknown tournament yields an empty list.
    fn list_players_with_records(
        &self,
        tournament_id: TournamentId,
    ) -> impl Future<Output = Result<Vec<StandingsRow>, StoreError>> + Send;

    /// Append one match and enroll both players in its tournament.
    ///
    /// Both effects are a single atomic write. A second match between the
    /// same two players in the same specified round fails with
    /// [`StoreError::DuplicateMatch`], checked atomically with the write so
    /// concurrent reports cannot both land.
    fn record_match(
        &self,
        new_match: &NewMatch,
    ) -> impl Future<Output = Result<MatchId, StoreError>> + Send;

    /// Insert a tournament, or return the existing id for its `(name, year)`.
    ///
    /// Must be atomic: concurrent calls for the same `(name, year)` return
    /// the same id.
    fn create_tournament(
        &self,
        tournament: &NewTournament,
    ) -> impl Future<Output = Result<TournamentId, StoreError>> + Send;

    /// Look up a tournament by `(name, year)`.
    fn find_tournament(
        &self,
        name: &str,
        year: &str,
    ) -> impl Future<Output = Result<Option<TournamentId>, StoreError>> + Send;

    /// Fetch a tournament by id.
    fn get_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> impl Future<Output = Result<Option<Tournament>, StoreError>> + Send;

    /// Register a new player under an already-sanitized name, entering them
    /// into `tournament_id` when given.
    ///
    /// The insert and the entry are one atomic write: if the tournament is
    /// gone, no player row is left behind.
    fn register_player(
        &self,
        name: &str,
        tournament_id: Option<TournamentId>,
    ) -> impl Future<Output = Result<Player, StoreError>> + Send;

    /// Fetch a player by id.
    fn get_player(
        &self,
        player_id: PlayerId,
    ) -> impl Future<Output = Result<Option<Player>, StoreError>> + Send;

    /// Enroll a player in a tournament. Enrolling twice is a no-op.
    fn enroll_player(
        &self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Whether the two players already have a match, in either direction,
    /// in the given round of the tournament.
    fn match_exists(
        &self,
        tournament_id: TournamentId,
        player_a: PlayerId,
        player_b: PlayerId,
        round: Round,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Number of registered players across all tournaments.
    fn count_players(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Remove every match. Returns the number of matches removed.
    fn delete_matches(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Remove every player together with their entries and matches.
    /// Returns the number of players removed.
    fn delete_players(&self) -> impl Future<Output = Result<u64, StoreError>> + Send;
}
