//! Error types for the tournament core.
//!
//! [`StoreError`] is what a [`SwissStore`](crate::store::SwissStore)
//! backend reports. [`SwissError`] is what the components return: store
//! failures plus the validation and pairing errors raised by the core.

use swiss_types::{PlayerId, Round, TournamentId};

/// Failures reported by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or did not answer in time.
    #[error("store unavailable: {reason}")]
    Unavailable {
        /// Description of the transport or timeout failure.
        reason: String,
    },

    /// The store refused a write (constraint or reference violation).
    #[error("store rejected write: {reason}")]
    Rejected {
        /// Description of the violated constraint.
        reason: String,
    },

    /// The pair already has a match in this round of the tournament.
    #[error("duplicate match: {reason}")]
    DuplicateMatch {
        /// Description of the conflicting match.
        reason: String,
    },

    /// The store returned data that breaks a ledger invariant.
    #[error("store returned inconsistent data: {reason}")]
    Inconsistent {
        /// Description of the broken invariant.
        reason: String,
    },
}

/// Errors returned by the standings, pairing, recorder, and resolver components.
#[derive(Debug, thiserror::Error)]
pub enum SwissError {
    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A write referenced a tournament the store has no record of.
    #[error("unknown tournament {tournament_id}")]
    UnknownTournament {
        /// The missing tournament.
        tournament_id: TournamentId,
    },

    /// A write referenced a player who never registered.
    #[error("unknown player {player_id}")]
    UnknownPlayer {
        /// The missing player.
        player_id: PlayerId,
    },

    /// Pairing was requested for an odd number of players.
    #[error("cannot pair an odd number of players ({count})")]
    OddPlayerCount {
        /// Number of players in the standings.
        count: usize,
    },

    /// A match named the same player as winner and loser.
    #[error("player {player_id} cannot play against themselves")]
    SamePlayer {
        /// The player named on both sides.
        player_id: PlayerId,
    },

    /// A match carried a round number that is neither `-1` nor `>= 1`.
    #[error("invalid round number {}", round.get())]
    InvalidRound {
        /// The rejected round.
        round: Round,
    },

    /// The two players already have a match recorded in this round.
    #[error("{player_a} and {player_b} already played in {round} of tournament {tournament_id}")]
    DuplicateMatch {
        /// Tournament of the existing match.
        tournament_id: TournamentId,
        /// Round of the existing match.
        round: Round,
        /// One of the two players.
        player_a: PlayerId,
        /// The other player.
        player_b: PlayerId,
    },

    /// A free-text field failed sanitization.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl SwissError {
    /// Whether the error was caused by the caller's input rather than the store.
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
