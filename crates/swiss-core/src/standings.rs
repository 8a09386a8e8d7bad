//! Standings aggregator.
//!
//! Reads every entrant's cumulative record from the store and ranks the
//! rows by wins, most first. Players tied on wins keep the order the store
//! returned them in, which is registration order, because the sort is
//! stable. Nothing is cached: each call re-derives the table from the
//! ledger as it stands.

use swiss_types::{StandingsRow, TournamentId};

use crate::error::{StoreError, SwissError};
use crate::store::SwissStore;

/// Compute the ranked standings of a tournament.
///
/// An unknown tournament yields an empty table.
///
/// # Errors
///
/// Returns [`SwissError::Store`] if the store is unreachable or returns a
/// row with more wins than matches played.
pub async fn compute_standings<S: SwissStore>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<Vec<StandingsRow>, SwissError> {
    let mut rows = store.list_players_with_records(tournament_id).await?;

    if let Some(bad) = rows.iter().find(|r| r.wins > r.matches_played) {
        return Err(StoreError::Inconsistent {
            reason: format!(
                "player {} has {} wins in {} matches",
                bad.player_id, bad.wins, bad.matches_played
            ),
        }
        .into());
    }

    rank(&mut rows);
    tracing::debug!(%tournament_id, players = rows.len(), "Computed standings");
    Ok(rows)
}

/// Order rows by wins, descending, keeping the incoming order among ties.
pub fn rank(rows: &mut [StandingsRow]) {
    rows.sort_by(|a, b| b.wins.cmp(&a.wins));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use swiss_types::{NewMatch, NewTournament, PlayerId, Round};

    use super::*;
    use crate::memory::MemoryStore;

    async fn tournament(store: &MemoryStore) -> TournamentId {
        store
            .create_tournament(&NewTournament {
                name: String::from("Wimbledon"),
                year: String::from("2017"),
                sport: String::from("TENNIS"),
            })
            .await
            .unwrap()
    }

    async fn entrant(store: &MemoryStore, tournament_id: TournamentId, name: &str) -> PlayerId {
        store
            .register_player(name, Some(tournament_id))
            .await
            .unwrap()
            .id
    }

    async fn beat(
        store: &MemoryStore,
        tournament_id: TournamentId,
        winner: PlayerId,
        loser: PlayerId,
    ) {
        store
            .record_match(&NewMatch {
                tournament_id,
                winner,
                loser,
                round: Round::UNSPECIFIED,
            })
            .await
            .unwrap();
    }

    fn row(wins: u32) -> StandingsRow {
        StandingsRow {
            player_id: PlayerId::new(),
            name: format!("p{wins}"),
            wins,
            matches_played: wins,
        }
    }

    #[test]
    fn rank_is_stable_among_ties() {
        let (a, b, c, d) = (row(0), row(2), row(0), row(2));
        let expected = [b.player_id, d.player_id, a.player_id, c.player_id];
        let mut rows = vec![a, b, c, d];
        rank(&mut rows);
        let got: Vec<PlayerId> = rows.iter().map(|r| r.player_id).collect();
        assert_eq!(got, expected);
    }

    #[tokio::test]
    async fn fresh_entrants_have_empty_records_in_registration_order() {
        let store = MemoryStore::new();
        let t = tournament(&store).await;
        let mut ids = Vec::new();
        for name in ["P1", "P2", "P3", "P4"] {
            ids.push(entrant(&store, t, name).await);
        }

        let rows = compute_standings(&store, t).await.unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.wins == 0 && r.matches_played == 0));
        let order: Vec<PlayerId> = rows.iter().map(|r| r.player_id).collect();
        assert_eq!(order, ids);
    }

    #[tokio::test]
    async fn winners_rank_above_losers() {
        let store = MemoryStore::new();
        let t = tournament(&store).await;
        let p1 = entrant(&store, t, "P1").await;
        let p2 = entrant(&store, t, "P2").await;
        let p3 = entrant(&store, t, "P3").await;
        let p4 = entrant(&store, t, "P4").await;
        beat(&store, t, p1, p2).await;
        beat(&store, t, p3, p4).await;

        let rows = compute_standings(&store, t).await.unwrap();
        let order: Vec<PlayerId> = rows.iter().map(|r| r.player_id).collect();
        assert_eq!(order, vec![p1, p3, p2, p4]);
        assert!(rows.windows(2).all(|w| matches!(w, [a, b] if a.wins >= b.wins)));
        assert!(rows.iter().all(|r| r.matches_played == 1));
    }

    #[tokio::test]
    async fn records_accumulate_across_rounds() {
        let store = MemoryStore::new();
        let t = tournament(&store).await;
        let p1 = entrant(&store, t, "P1").await;
        let p2 = entrant(&store, t, "P2").await;

        beat(&store, t, p1, p2).await;
        let before = compute_standings(&store, t).await.unwrap();
        beat(&store, t, p1, p2).await;
        let after = compute_standings(&store, t).await.unwrap();

        let find = |rows: &[StandingsRow], id: PlayerId| {
            rows.iter()
                .find(|r| r.player_id == id)
                .map(|r| (r.wins, r.matches_played))
        };
        assert_eq!(find(&before, p1), Some((1, 1)));
        assert_eq!(find(&after, p1), Some((2, 2)));
        assert_eq!(find(&before, p2), Some((0, 1)));
        assert_eq!(find(&after, p2), Some((0, 2)));
    }

    #[tokio::test]
    async fn unknown_tournament_is_empty() {
        let store = MemoryStore::new();
        let rows = compute_standings(&store, TournamentId::new()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn matches_in_other_tournaments_do_not_count() {
        let store = MemoryStore::new();
        let t = tournament(&store).await;
        let other = store
            .create_tournament(&NewTournament {
                name: String::from("Roland Garros"),
                year: String::from("2017"),
                sport: String::from("TENNIS"),
            })
            .await
            .unwrap();
        let p1 = entrant(&store, t, "P1").await;
        let p2 = entrant(&store, t, "P2").await;
        beat(&store, other, p1, p2).await;

        let rows = compute_standings(&store, t).await.unwrap();
        assert!(rows.iter().all(|r| r.matches_played == 0));
    }
}
