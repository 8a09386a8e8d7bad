//! Facade binding the components to an injected store.
//!
//! [`TournamentService`] owns the store handle and the configured default
//! sport, and exposes every operation the HTTP layer needs. It carries no
//! other state: each method is a single pass through the components.

use swiss_types::{
    MatchId, MatchReport, NewMatch, Pairing, Player, PlayerId, StandingsRow, TournamentId,
};

use crate::config::TournamentDefaults;
use crate::error::SwissError;
use crate::sanitize::clean_text;
use crate::store::SwissStore;
use crate::{pairing, recorder, resolver, standings};

/// Tournament operations over a store backend.
#[derive(Debug, Clone)]
pub struct TournamentService<S> {
    store: S,
    default_sport: String,
}

impl<S: SwissStore> TournamentService<S> {
    /// Wrap a store with the given tournament defaults.
    pub fn new(store: S, defaults: &TournamentDefaults) -> Self {
        Self {
            store,
            default_sport: defaults.default_sport.clone(),
        }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Sport used for tournaments created without one.
    pub fn default_sport(&self) -> &str {
        &self.default_sport
    }

    /// Get-or-create a tournament by `(name, year)`.
    pub async fn resolve_tournament(
        &self,
        name: &str,
        year: &str,
        sport: &str,
    ) -> Result<TournamentId, SwissError> {
        resolver::resolve_tournament(&self.store, name, year, sport).await
    }

    /// Look up a tournament by `(name, year)`.
    pub async fn find_tournament(
        &self,
        name: &str,
        year: &str,
    ) -> Result<Option<TournamentId>, SwissError> {
        resolver::find_tournament(&self.store, name, year).await
    }

    /// Register a player, optionally entering them into a tournament.
    pub async fn register_player(
        &self,
        name: &str,
        tournament_id: Option<TournamentId>,
    ) -> Result<Player, SwissError> {
        let name = clean_text("name", name)?;
        if let Some(tournament_id) = tournament_id {
            self.require_tournament(tournament_id).await?;
        }

        let player = self.store.register_player(&name, tournament_id).await?;
        tracing::info!(
            player_id = %player.id,
            name = player.name,
            tournament_id = tournament_id.map(tracing::field::display),
            "Registered player"
        );
        Ok(player)
    }

    /// Enter an existing player into a tournament. Repeat entries are no-ops.
    pub async fn enroll_player(
        &self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> Result<(), SwissError> {
        self.require_tournament(tournament_id).await?;
        if self.store.get_player(player_id).await?.is_none() {
            return Err(SwissError::UnknownPlayer { player_id });
        }
        self.store.enroll_player(tournament_id, player_id).await?;
        tracing::info!(%player_id, %tournament_id, "Entered player");
        Ok(())
    }

    /// Record a match against an existing tournament.
    pub async fn record_match(&self, new_match: NewMatch) -> Result<MatchId, SwissError> {
        recorder::record_match(&self.store, new_match).await
    }

    /// Record a match by tournament name and year, creating the tournament
    /// with the configured default sport on first use.
    pub async fn report_match(&self, report: &MatchReport) -> Result<TournamentId, SwissError> {
        recorder::report_match(&self.store, report, &self.default_sport).await
    }

    /// Ranked standings of a tournament.
    pub async fn standings(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<StandingsRow>, SwissError> {
        standings::compute_standings(&self.store, tournament_id).await
    }

    /// Pairings for the next round of a tournament.
    pub async fn pairings(&self, tournament_id: TournamentId) -> Result<Vec<Pairing>, SwissError> {
        pairing::next_round_pairings(&self.store, tournament_id).await
    }

    /// Number of registered players.
    pub async fn count_players(&self) -> Result<u64, SwissError> {
        Ok(self.store.count_players().await?)
    }

    /// Delete every match.
    pub async fn clear_matches(&self) -> Result<u64, SwissError> {
        let deleted = self.store.delete_matches().await?;
        tracing::info!(deleted, "Cleared matches");
        Ok(deleted)
    }

    /// Delete every player, with their entries and matches.
    pub async fn clear_players(&self) -> Result<u64, SwissError> {
        let deleted = self.store.delete_players().await?;
        tracing::info!(deleted, "Cleared players");
        Ok(deleted)
    }

    async fn require_tournament(&self, tournament_id: TournamentId) -> Result<(), SwissError> {
        if self.store.get_tournament(tournament_id).await?.is_none() {
            return Err(SwissError::UnknownTournament { tournament_id });
        }
        Ok(())
    }
}
