//! [`SwissStore`] over `PostgreSQL`.
//!
//! Each trait method opens the matching table store on the shared pool,
//! runs one statement (or one transaction), and folds [`DbError`] into
//! [`StoreError`].

use swiss_core::{StoreError, SwissStore};
use swiss_types::{
    MatchId, NewMatch, NewTournament, Player, PlayerId, Round, StandingsRow, Tournament,
    TournamentId,
};

use crate::error::DbError;
use crate::match_store::MatchStore;
use crate::player_store::PlayerStore;
use crate::postgres::PostgresPool;
use crate::tournament_store::TournamentStore;

/// `PostgreSQL`-backed tournament store. Cloning shares the pool.
#[derive(Clone)]
pub struct PgSwissStore {
    pool: PostgresPool,
}

impl PgSwissStore {
    /// Wrap a connected pool.
    pub const fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }

    /// The underlying pool handle.
    pub const fn pool(&self) -> &PostgresPool {
        &self.pool
    }
}

impl SwissStore for PgSwissStore {
    async fn list_players_with_records(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<StandingsRow>, StoreError> {
        let rows = MatchStore::new(self.pool.pool())
            .records(tournament_id)
            .await?;
        let standings = rows
            .into_iter()
            .map(StandingsRow::try_from)
            .collect::<Result<Vec<_>, DbError>>()?;
        Ok(standings)
    }

    async fn record_match(&self, new_match: &NewMatch) -> Result<MatchId, StoreError> {
        Ok(MatchStore::new(self.pool.pool()).insert(new_match).await?)
    }

    async fn create_tournament(
        &self,
        tournament: &NewTournament,
    ) -> Result<TournamentId, StoreError> {
        Ok(TournamentStore::new(self.pool.pool())
            .upsert(tournament)
            .await?)
    }

    async fn find_tournament(
        &self,
        name: &str,
        year: &str,
    ) -> Result<Option<TournamentId>, StoreError> {
        Ok(TournamentStore::new(self.pool.pool())
            .find(name, year)
            .await?)
    }

    async fn get_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Option<Tournament>, StoreError> {
        let row = TournamentStore::new(self.pool.pool())
            .get(tournament_id)
            .await?;
        Ok(row.map(Tournament::from))
    }

    async fn register_player(
        &self,
        name: &str,
        tournament_id: Option<TournamentId>,
    ) -> Result<Player, StoreError> {
        let row = PlayerStore::new(self.pool.pool())
            .insert(name, tournament_id)
            .await?;
        Ok(Player::from(row))
    }

    async fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>, StoreError> {
        let row = PlayerStore::new(self.pool.pool()).get(player_id).await?;
        Ok(row.map(Player::from))
    }

    async fn enroll_player(
        &self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> Result<(), StoreError> {
        Ok(TournamentStore::new(self.pool.pool())
            .add_entrant(tournament_id, player_id)
            .await?)
    }

    async fn match_exists(
        &self,
        tournament_id: TournamentId,
        player_a: PlayerId,
        player_b: PlayerId,
        round: Round,
    ) -> Result<bool, StoreError> {
        Ok(MatchStore::new(self.pool.pool())
            .exists(tournament_id, player_a, player_b, round)
            .await?)
    }

    async fn count_players(&self) -> Result<u64, StoreError> {
        Ok(PlayerStore::new(self.pool.pool()).count().await?)
    }

    async fn delete_matches(&self) -> Result<u64, StoreError> {
        Ok(MatchStore::new(self.pool.pool()).delete_all().await?)
    }

    async fn delete_players(&self) -> Result<u64, StoreError> {
        Ok(PlayerStore::new(self.pool.pool()).delete_all().await?)
    }
}
