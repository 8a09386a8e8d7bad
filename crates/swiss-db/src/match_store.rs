//! Match ledger persistence and standings queries.
//!
//! Matches are append-only. Inserting a match also enrolls both players in
//! its tournament, inside the same transaction, so a match can never
//! reference a player missing from that tournament's standings.
//!
//! A pair meets at most once per numbered round. The
//! `matches_pair_round_key` unique index enforces this at commit time, and
//! its violation is reported as [`DbError::DuplicateMatch`].

use sqlx::PgPool;
use swiss_types::{MatchId, NewMatch, PlayerId, Round, StandingsRow, TournamentId};
use uuid::Uuid;

use crate::error::DbError;

/// Partial unique index on `(tournament_id, round, pair)` for numbered rounds.
const PAIR_ROUND_KEY: &str = "matches_pair_round_key";

/// Operations on the `matches` table and the `player_standings` view.
pub struct MatchStore<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchStore<'a> {
    /// Create a new match store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append a match and enroll both players, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::DuplicateMatch`] if the pair already met in this
    /// numbered round, or [`DbError::Postgres`] if any other statement
    /// fails. Foreign key and check violations surface as database errors.
    pub async fn insert(&self, new_match: &NewMatch) -> Result<MatchId, DbError> {
        let id = MatchId::new();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"INSERT INTO entrants (tournament_id, player_id)
              SELECT $1, p FROM UNNEST($2::UUID[]) AS p
              ON CONFLICT DO NOTHING",
        )
        .bind(new_match.tournament_id.into_inner())
        .bind(vec![
            new_match.winner.into_inner(),
            new_match.loser.into_inner(),
        ])
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"INSERT INTO matches (id, tournament_id, winner, loser, round)
              VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id.into_inner())
        .bind(new_match.tournament_id.into_inner())
        .bind(new_match.winner.into_inner())
        .bind(new_match.loser.into_inner())
        .bind(new_match.round.get())
        .execute(&mut *tx)
        .await
        .map_err(|e| duplicate_match(e, new_match))?;

        tx.commit().await?;

        tracing::debug!(match_id = %id, "Inserted match");
        Ok(id)
    }

    /// Whether two players already met, in either direction, in a round.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn exists(
        &self,
        tournament_id: TournamentId,
        player_a: PlayerId,
        player_b: PlayerId,
        round: Round,
    ) -> Result<bool, DbError> {
        let exists: bool = sqlx::query_scalar(
            r"SELECT EXISTS (
                  SELECT 1 FROM matches
                  WHERE tournament_id = $1
                    AND round = $4
                    AND ((winner = $2 AND loser = $3) OR (winner = $3 AND loser = $2))
              )",
        )
        .bind(tournament_id.into_inner())
        .bind(player_a.into_inner())
        .bind(player_b.into_inner())
        .bind(round.get())
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Cumulative records of every entrant, ranked by wins then registration.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn records(&self, tournament_id: TournamentId) -> Result<Vec<RecordRow>, DbError> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r"SELECT player_id, name, wins, matches_played
              FROM player_standings
              WHERE tournament_id = $1
              ORDER BY wins DESC, registered_at, player_id",
        )
        .bind(tournament_id.into_inner())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete every match.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the delete fails.
    pub async fn delete_all(&self) -> Result<u64, DbError> {
        let result = sqlx::query(r"DELETE FROM matches")
            .execute(self.pool)
            .await?;

        tracing::debug!(deleted = result.rows_affected(), "Deleted matches");
        Ok(result.rows_affected())
    }
}

/// Translate a violation of [`PAIR_ROUND_KEY`] into [`DbError::DuplicateMatch`].
fn duplicate_match(err: sqlx::Error, new_match: &NewMatch) -> DbError {
    match err {
        sqlx::Error::Database(ref db)
            if db.is_unique_violation() && db.constraint() == Some(PAIR_ROUND_KEY) =>
        {
            DbError::DuplicateMatch(format!(
                "{} and {} already played in {}",
                new_match.winner, new_match.loser, new_match.round
            ))
        }
        other => DbError::Postgres(other),
    }
}

/// A row from the `player_standings` view.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecordRow {
    /// Player UUID.
    pub player_id: Uuid,
    /// Player display name.
    pub name: String,
    /// Matches won (`COUNT` yields `BIGINT`).
    pub wins: i64,
    /// Matches played.
    pub matches_played: i64,
}

impl TryFrom<RecordRow> for StandingsRow {
    type Error = DbError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let wins = u32::try_from(row.wins).map_err(|e| {
            DbError::OutOfRange(format!("wins {} for {}: {e}", row.wins, row.player_id))
        })?;
        let matches_played = u32::try_from(row.matches_played).map_err(|e| {
            DbError::OutOfRange(format!(
                "matches_played {} for {}: {e}",
                row.matches_played, row.player_id
            ))
        })?;
        Ok(Self {
            player_id: PlayerId(row.player_id),
            name: row.name,
            wins,
            matches_played,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(wins: i64, matches_played: i64) -> RecordRow {
        RecordRow {
            player_id: Uuid::now_v7(),
            name: String::from("Ann"),
            wins,
            matches_played,
        }
    }

    #[test]
    fn record_converts_to_standings_row() {
        let row = StandingsRow::try_from(record(2, 3)).unwrap();
        assert_eq!(row.wins, 2);
        assert_eq!(row.matches_played, 3);
        assert_eq!(row.losses(), 1);
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert!(matches!(
            StandingsRow::try_from(record(-1, 0)),
            Err(DbError::OutOfRange(_))
        ));
    }

    #[test]
    fn other_insert_failures_stay_postgres_errors() {
        let new_match = NewMatch {
            tournament_id: TournamentId::new(),
            winner: PlayerId::new(),
            loser: PlayerId::new(),
            round: Round::FIRST,
        };
        let err = duplicate_match(sqlx::Error::PoolTimedOut, &new_match);
        assert!(matches!(err, DbError::Postgres(sqlx::Error::PoolTimedOut)));
    }
}
