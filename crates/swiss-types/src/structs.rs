//! Entity rows and derived views.
//!
//! [`Player`] and [`Tournament`] mirror the durable rows owned by the store.
//! [`NewMatch`] and [`MatchReport`] are the two ways a match outcome enters
//! the ledger. [`StandingsRow`] and [`Pairing`] are derived on every request
//! and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{PlayerId, TournamentId};
use crate::round::Round;

// ---------------------------------------------------------------------------
// Durable rows
// ---------------------------------------------------------------------------

/// A registered player. Never mutated after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Player {
    /// Player identifier.
    pub id: PlayerId,
    /// Sanitized display name (need not be unique).
    pub name: String,
    /// When the player registered. Breaks ties in the standings.
    pub registered_at: DateTime<Utc>,
}

/// A tournament, unique per `(name, year)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Tournament {
    /// Tournament identifier.
    pub id: TournamentId,
    /// Sanitized tournament name.
    pub name: String,
    /// Edition year, kept as free text (e.g. `"2017"`).
    pub year: String,
    /// Sport recorded at creation. Not part of the identity key.
    pub sport: String,
}

/// Input for creating a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NewTournament {
    /// Tournament name.
    pub name: String,
    /// Edition year.
    pub year: String,
    /// Sport played.
    pub sport: String,
}

// ---------------------------------------------------------------------------
// Match input
// ---------------------------------------------------------------------------

/// A match outcome against an already-resolved tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NewMatch {
    /// Tournament the match belongs to.
    pub tournament_id: TournamentId,
    /// The player who won.
    pub winner: PlayerId,
    /// The player who lost.
    pub loser: PlayerId,
    /// Round the match was played in.
    #[serde(default)]
    pub round: Round,
}

/// A match outcome addressed by tournament name and year.
///
/// The tournament is created on first use, so callers can report results
/// without registering the tournament first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MatchReport {
    /// The player who won.
    pub winner: PlayerId,
    /// The player who lost.
    pub loser: PlayerId,
    /// Tournament name.
    pub tournament_name: String,
    /// Tournament edition year.
    pub year: String,
    /// Round the match was played in.
    #[serde(default)]
    pub round: Round,
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// One player's cumulative record within a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StandingsRow {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Player display name.
    pub name: String,
    /// Matches won across all rounds.
    pub wins: u32,
    /// Matches played across all rounds. Always `>= wins`.
    pub matches_played: u32,
}

impl StandingsRow {
    /// Matches lost, derived from the two counters.
    pub const fn losses(&self) -> u32 {
        self.matches_played.saturating_sub(self.wins)
    }
}

/// Two adjacent-ranked players scheduled to meet in the next round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Pairing {
    /// Higher-ranked player.
    pub player1_id: PlayerId,
    /// Higher-ranked player's name.
    pub player1_name: String,
    /// Lower-ranked player.
    pub player2_id: PlayerId,
    /// Lower-ranked player's name.
    pub player2_name: String,
}

impl Pairing {
    /// Pair two standings rows, keeping rank order.
    pub fn between(higher: &StandingsRow, lower: &StandingsRow) -> Self {
        Self {
            player1_id: higher.player_id,
            player1_name: higher.name.clone(),
            player2_id: lower.player_id,
            player2_name: lower.name.clone(),
        }
    }
}
