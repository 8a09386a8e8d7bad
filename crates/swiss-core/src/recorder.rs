//! Match recorder.
//!
//! Validates a single match outcome and appends it to the ledger. A match
//! is accepted only when:
//!
//! - winner and loser are different players,
//! - both players are registered,
//! - the round is unspecified (`-1`) or `>= 1`,
//! - the pair has no match yet in that round (unspecified rounds are exempt).
//!
//! The same pair meeting again in a later round is allowed.

use swiss_types::{MatchId, MatchReport, NewMatch, PlayerId, Round, TournamentId};

use crate::error::{StoreError, SwissError};
use crate::resolver::resolve_tournament;
use crate::store::SwissStore;

/// Record a match against an existing tournament.
///
/// # Errors
///
/// Returns [`SwissError::SamePlayer`], [`SwissError::InvalidRound`],
/// [`SwissError::UnknownPlayer`], [`SwissError::UnknownTournament`], or
/// [`SwissError::DuplicateMatch`] when validation fails, and
/// [`SwissError::Store`] if the store fails.
pub async fn record_match<S: SwissStore>(
    store: &S,
    new_match: NewMatch,
) -> Result<MatchId, SwissError> {
    check_players(store, new_match.winner, new_match.loser, new_match.round).await?;

    if store.get_tournament(new_match.tournament_id).await?.is_none() {
        tracing::warn!(tournament_id = %new_match.tournament_id, "Match for unknown tournament");
        return Err(SwissError::UnknownTournament {
            tournament_id: new_match.tournament_id,
        });
    }

    append(store, new_match).await
}

/// Record a match addressed by tournament name and year.
///
/// The tournament is created with `default_sport` if it does not exist yet.
/// Players are validated before the tournament is resolved, so a rejected
/// report never creates a tournament.
///
/// # Errors
///
/// Same as [`record_match`], plus [`SwissError::InvalidInput`] for a bad
/// tournament name or year.
pub async fn report_match<S: SwissStore>(
    store: &S,
    report: &MatchReport,
    default_sport: &str,
) -> Result<TournamentId, SwissError> {
    check_players(store, report.winner, report.loser, report.round).await?;

    let tournament_id =
        resolve_tournament(store, &report.tournament_name, &report.year, default_sport).await?;

    append(
        store,
        NewMatch {
            tournament_id,
            winner: report.winner,
            loser: report.loser,
            round: report.round,
        },
    )
    .await?;
    Ok(tournament_id)
}

/// Checks that need no tournament: distinct, registered players and a valid round.
async fn check_players<S: SwissStore>(
    store: &S,
    winner: PlayerId,
    loser: PlayerId,
    round: Round,
) -> Result<(), SwissError> {
    if winner == loser {
        tracing::warn!(player_id = %winner, "Rejected self-match");
        return Err(SwissError::SamePlayer { player_id: winner });
    }
    if !round.is_valid() {
        tracing::warn!(round = round.get(), "Rejected invalid round");
        return Err(SwissError::InvalidRound { round });
    }
    for player_id in [winner, loser] {
        if store.get_player(player_id).await?.is_none() {
            tracing::warn!(%player_id, "Match names unregistered player");
            return Err(SwissError::UnknownPlayer { player_id });
        }
    }
    Ok(())
}

/// Reject same-round duplicates, then write.
///
/// The pre-check gives a clean error in the common case. The store repeats
/// it atomically with the insert, which settles concurrent reports.
async fn append<S: SwissStore>(store: &S, new_match: NewMatch) -> Result<MatchId, SwissError> {
    let NewMatch {
        tournament_id,
        winner,
        loser,
        round,
    } = new_match;
    let duplicate = SwissError::DuplicateMatch {
        tournament_id,
        round,
        player_a: winner,
        player_b: loser,
    };

    if round.is_specified() && store.match_exists(tournament_id, winner, loser, round).await? {
        tracing::warn!(
            %tournament_id, %winner, %loser, round = round.get(),
            "Rejected duplicate match"
        );
        return Err(duplicate);
    }

    let id = match store.record_match(&new_match).await {
        Ok(id) => id,
        Err(StoreError::DuplicateMatch { reason }) => {
            tracing::warn!(%tournament_id, %winner, %loser, reason, "Lost duplicate match race");
            return Err(duplicate);
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(%id, %tournament_id, %winner, %loser, round = round.get(), "Recorded match");
    Ok(id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use swiss_types::{NewTournament, Player, StandingsRow, Tournament};

    use super::*;
    use crate::memory::MemoryStore;
    use crate::standings::compute_standings;

    struct Fixture {
        store: MemoryStore,
        tournament_id: TournamentId,
        ann: PlayerId,
        bea: PlayerId,
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let tournament_id = store
            .create_tournament(&NewTournament {
                name: String::from("Wimbledon"),
                year: String::from("2017"),
                sport: String::from("TENNIS"),
            })
            .await
            .unwrap();
        let ann = store
            .register_player("Ann", Some(tournament_id))
            .await
            .unwrap()
            .id;
        let bea = store
            .register_player("Bea", Some(tournament_id))
            .await
            .unwrap()
            .id;
        Fixture {
            store,
            tournament_id,
            ann,
            bea,
        }
    }

    fn record_of(rows: &[StandingsRow], id: PlayerId) -> Option<(u32, u32)> {
        rows.iter()
            .find(|r| r.player_id == id)
            .map(|r| (r.wins, r.matches_played))
    }

    /// Store whose duplicate pre-check always answers "no" after yielding,
    /// so two writers both reach `record_match`.
    struct StaleCheckStore(MemoryStore);

    impl SwissStore for StaleCheckStore {
        async fn list_players_with_records(
            &self,
            tournament_id: TournamentId,
        ) -> Result<Vec<StandingsRow>, StoreError> {
            self.0.list_players_with_records(tournament_id).await
        }

        async fn record_match(&self, new_match: &NewMatch) -> Result<MatchId, StoreError> {
            self.0.record_match(new_match).await
        }

        async fn create_tournament(
            &self,
            tournament: &NewTournament,
        ) -> Result<TournamentId, StoreError> {
            self.0.create_tournament(tournament).await
        }

        async fn find_tournament(
            &self,
            name: &str,
            year: &str,
        ) -> Result<Option<TournamentId>, StoreError> {
            self.0.find_tournament(name, year).await
        }

        async fn get_tournament(
            &self,
            tournament_id: TournamentId,
        ) -> Result<Option<Tournament>, StoreError> {
            self.0.get_tournament(tournament_id).await
        }

        async fn register_player(
            &self,
            name: &str,
            tournament_id: Option<TournamentId>,
        ) -> Result<Player, StoreError> {
            self.0.register_player(name, tournament_id).await
        }

        async fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>, StoreError> {
            self.0.get_player(player_id).await
        }

        async fn enroll_player(
            &self,
            tournament_id: TournamentId,
            player_id: PlayerId,
        ) -> Result<(), StoreError> {
            self.0.enroll_player(tournament_id, player_id).await
        }

        async fn match_exists(
            &self,
            _tournament_id: TournamentId,
            _player_a: PlayerId,
            _player_b: PlayerId,
            _round: Round,
        ) -> Result<bool, StoreError> {
            tokio::task::yield_now().await;
            Ok(false)
        }

        async fn count_players(&self) -> Result<u64, StoreError> {
            self.0.count_players().await
        }

        async fn delete_matches(&self) -> Result<u64, StoreError> {
            self.0.delete_matches().await
        }

        async fn delete_players(&self) -> Result<u64, StoreError> {
            self.0.delete_players().await
        }
    }

    #[tokio::test]
    async fn recorded_match_is_visible_immediately() {
        let f = fixture().await;
        let before = compute_standings(&f.store, f.tournament_id).await.unwrap();

        record_match(
            &f.store,
            NewMatch {
                tournament_id: f.tournament_id,
                winner: f.ann,
                loser: f.bea,
                round: Round::FIRST,
            },
        )
        .await
        .unwrap();

        let after = compute_standings(&f.store, f.tournament_id).await.unwrap();
        assert_eq!(record_of(&before, f.ann), Some((0, 0)));
        assert_eq!(record_of(&after, f.ann), Some((1, 1)));
        assert_eq!(record_of(&before, f.bea), Some((0, 0)));
        assert_eq!(record_of(&after, f.bea), Some((0, 1)));
    }

    #[tokio::test]
    async fn self_match_is_rejected() {
        let f = fixture().await;
        let result = record_match(
            &f.store,
            NewMatch {
                tournament_id: f.tournament_id,
                winner: f.ann,
                loser: f.ann,
                round: Round::FIRST,
            },
        )
        .await;
        assert!(matches!(result, Err(SwissError::SamePlayer { player_id }) if player_id == f.ann));
    }

    #[tokio::test]
    async fn round_zero_is_rejected() {
        let f = fixture().await;
        let result = record_match(
            &f.store,
            NewMatch {
                tournament_id: f.tournament_id,
                winner: f.ann,
                loser: f.bea,
                round: Round(0),
            },
        )
        .await;
        assert!(matches!(result, Err(SwissError::InvalidRound { .. })));
    }

    #[tokio::test]
    async fn unregistered_player_is_rejected() {
        let f = fixture().await;
        let ghost = PlayerId::new();
        let result = record_match(
            &f.store,
            NewMatch {
                tournament_id: f.tournament_id,
                winner: f.ann,
                loser: ghost,
                round: Round::UNSPECIFIED,
            },
        )
        .await;
        assert!(matches!(
            result,
            Err(SwissError::UnknownPlayer { player_id }) if player_id == ghost
        ));
    }

    #[tokio::test]
    async fn unknown_tournament_is_rejected() {
        let f = fixture().await;
        let result = record_match(
            &f.store,
            NewMatch {
                tournament_id: TournamentId::new(),
                winner: f.ann,
                loser: f.bea,
                round: Round::FIRST,
            },
        )
        .await;
        assert!(matches!(result, Err(SwissError::UnknownTournament { .. })));
    }

    #[tokio::test]
    async fn same_pair_twice_in_one_round_is_rejected() {
        let f = fixture().await;
        let first = NewMatch {
            tournament_id: f.tournament_id,
            winner: f.ann,
            loser: f.bea,
            round: Round(2),
        };
        record_match(&f.store, first).await.unwrap();

        let reversed = NewMatch {
            winner: f.bea,
            loser: f.ann,
            ..first
        };
        let result = record_match(&f.store, reversed).await;
        assert!(matches!(result, Err(SwissError::DuplicateMatch { .. })));

        let next_round = NewMatch {
            round: Round(3),
            ..first
        };
        record_match(&f.store, next_round).await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_same_round_reports_admit_one() {
        let f = fixture().await;
        let store = StaleCheckStore(f.store.clone());
        let ann_wins = NewMatch {
            tournament_id: f.tournament_id,
            winner: f.ann,
            loser: f.bea,
            round: Round::FIRST,
        };
        let bea_wins = NewMatch {
            winner: f.bea,
            loser: f.ann,
            ..ann_wins
        };

        let (first, second) = tokio::join!(
            record_match(&store, ann_wins),
            record_match(&store, bea_wins)
        );
        assert_eq!([first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(), 1);
        assert!(
            matches!(first, Err(SwissError::DuplicateMatch { .. }))
                || matches!(second, Err(SwissError::DuplicateMatch { .. }))
        );

        let rows = compute_standings(&f.store, f.tournament_id).await.unwrap();
        assert!(rows.iter().all(|r| r.matches_played == 1));
    }

    #[tokio::test]
    async fn unspecified_rounds_may_repeat() {
        let f = fixture().await;
        let unspecified = NewMatch {
            tournament_id: f.tournament_id,
            winner: f.ann,
            loser: f.bea,
            round: Round::UNSPECIFIED,
        };
        record_match(&f.store, unspecified).await.unwrap();
        record_match(&f.store, unspecified).await.unwrap();
    }

    #[tokio::test]
    async fn report_creates_tournament_on_first_use() {
        let f = fixture().await;
        let report = MatchReport {
            winner: f.ann,
            loser: f.bea,
            tournament_name: String::from("Australian Open"),
            year: String::from("2018"),
            round: Round::FIRST,
        };

        let created = report_match(&f.store, &report, "TENNIS").await.unwrap();
        assert_ne!(created, f.tournament_id);

        let resolved = resolve_tournament(&f.store, "Australian Open", "2018", "TENNIS")
            .await
            .unwrap();
        assert_eq!(created, resolved);

        let rows = compute_standings(&f.store, created).await.unwrap();
        assert_eq!(record_of(&rows, f.ann), Some((1, 1)));
        assert_eq!(record_of(&rows, f.bea), Some((0, 1)));
    }

    #[tokio::test]
    async fn rejected_report_does_not_create_tournament() {
        let f = fixture().await;
        let report = MatchReport {
            winner: f.ann,
            loser: f.ann,
            tournament_name: String::from("Ghost Cup"),
            year: String::from("2019"),
            round: Round::UNSPECIFIED,
        };
        assert!(report_match(&f.store, &report, "TENNIS").await.is_err());
        let found = f.store.find_tournament("Ghost Cup", "2019").await.unwrap();
        assert!(found.is_none());
    }
}
