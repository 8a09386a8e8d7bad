//! Tournament get-or-insert and enrollment.
//!
//! [`TournamentStore::upsert`] closes the lookup-then-create race: the
//! `UNIQUE (name, year)` constraint plus `ON CONFLICT ... DO UPDATE`
//! makes the insert return the existing row's id when another writer got
//! there first. The no-op update is what makes `RETURNING` yield a row on
//! conflict.

use sqlx::PgPool;
use swiss_types::{NewTournament, PlayerId, Tournament, TournamentId};
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `tournaments` and `entrants` tables.
pub struct TournamentStore<'a> {
    pool: &'a PgPool,
}

impl<'a> TournamentStore<'a> {
    /// Create a new tournament store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a tournament, or return the id already stored for `(name, year)`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the statement fails.
    pub async fn upsert(&self, tournament: &NewTournament) -> Result<TournamentId, DbError> {
        let id: Uuid = sqlx::query_scalar(
            r"INSERT INTO tournaments (id, name, year, sport)
              VALUES ($1, $2, $3, $4)
              ON CONFLICT (name, year) DO UPDATE SET name = EXCLUDED.name
              RETURNING id",
        )
        .bind(TournamentId::new().into_inner())
        .bind(&tournament.name)
        .bind(&tournament.year)
        .bind(&tournament.sport)
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(tournament_id = %id, "Upserted tournament");
        Ok(TournamentId(id))
    }

    /// Look up a tournament id by `(name, year)`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn find(&self, name: &str, year: &str) -> Result<Option<TournamentId>, DbError> {
        let id: Option<Uuid> =
            sqlx::query_scalar(r"SELECT id FROM tournaments WHERE name = $1 AND year = $2")
                .bind(name)
                .bind(year)
                .fetch_optional(self.pool)
                .await?;

        Ok(id.map(TournamentId))
    }

    /// Fetch a tournament by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get(&self, tournament_id: TournamentId) -> Result<Option<TournamentRow>, DbError> {
        let row = sqlx::query_as::<_, TournamentRow>(
            r"SELECT id, name, year, sport FROM tournaments WHERE id = $1",
        )
        .bind(tournament_id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Enroll a player. Repeat enrollments are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails, including when
    /// either id does not exist.
    pub async fn add_entrant(
        &self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO entrants (tournament_id, player_id)
              VALUES ($1, $2)
              ON CONFLICT DO NOTHING",
        )
        .bind(tournament_id.into_inner())
        .bind(player_id.into_inner())
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

/// A row from the `tournaments` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TournamentRow {
    /// Tournament UUID.
    pub id: Uuid,
    /// Tournament name.
    pub name: String,
    /// Edition year.
    pub year: String,
    /// Sport recorded at creation.
    pub sport: String,
}

impl From<TournamentRow> for Tournament {
    fn from(row: TournamentRow) -> Self {
        Self {
            id: TournamentId(row.id),
            name: row.name,
            year: row.year,
            sport: row.sport,
        }
    }
}
