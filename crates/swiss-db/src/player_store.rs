//! Player registration and lookup on the `players` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use swiss_types::{Player, PlayerId, TournamentId};
use uuid::Uuid;

use crate::error::DbError;

/// Operations on the `players` table.
pub struct PlayerStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PlayerStore<'a> {
    /// Create a new player store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a player under an already-sanitized name and, when given,
    /// enter them into a tournament. Both rows commit together.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if either insert fails. A missing
    /// tournament is a foreign key violation and leaves no player behind.
    pub async fn insert(
        &self,
        name: &str,
        tournament_id: Option<TournamentId>,
    ) -> Result<PlayerRow, DbError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, PlayerRow>(
            r"INSERT INTO players (id, name)
              VALUES ($1, $2)
              RETURNING id, name, registered_at",
        )
        .bind(PlayerId::new().into_inner())
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(tournament_id) = tournament_id {
            sqlx::query(
                r"INSERT INTO entrants (tournament_id, player_id)
                  VALUES ($1, $2)",
            )
            .bind(tournament_id.into_inner())
            .bind(row.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(player_id = %row.id, entered = tournament_id.is_some(), "Inserted player");
        Ok(row)
    }

    /// Fetch a player by id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get(&self, player_id: PlayerId) -> Result<Option<PlayerRow>, DbError> {
        let row = sqlx::query_as::<_, PlayerRow>(
            r"SELECT id, name, registered_at FROM players WHERE id = $1",
        )
        .bind(player_id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row)
    }

    /// Count registered players.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, or
    /// [`DbError::OutOfRange`] if the count is negative.
    pub async fn count(&self) -> Result<u64, DbError> {
        let count: i64 = sqlx::query_scalar(r"SELECT COUNT(*) FROM players")
            .fetch_one(self.pool)
            .await?;

        u64::try_from(count).map_err(|e| DbError::OutOfRange(format!("player count {count}: {e}")))
    }

    /// Delete every player. Entrants and matches go with them via cascade.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn delete_all(&self) -> Result<u64, DbError> {
        let result = sqlx::query(r"DELETE FROM players")
            .execute(self.pool)
            .await?;

        tracing::debug!(deleted = result.rows_affected(), "Deleted players");
        Ok(result.rows_affected())
    }
}

/// A row from the `players` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlayerRow {
    /// Player UUID.
    pub id: Uuid,
    /// Sanitized display name.
    pub name: String,
    /// Registration timestamp.
    pub registered_at: DateTime<Utc>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: PlayerId(row.id),
            name: row.name,
            registered_at: row.registered_at,
        }
    }
}
