//! In-memory [`SwissStore`] for tests and local runs.
//!
//! Everything lives behind one [`Mutex`], which makes each operation,
//! including the tournament get-or-insert, atomic. The lock is only held
//! inside synchronous sections and never across an `.await`.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use swiss_types::{
    MatchId, NewMatch, NewTournament, Player, PlayerId, Round, StandingsRow, Tournament,
    TournamentId,
};

use crate::error::StoreError;
use crate::store::SwissStore;

/// A recorded match.
#[derive(Debug, Clone)]
struct MatchRow {
    tournament_id: TournamentId,
    winner: PlayerId,
    loser: PlayerId,
    round: Round,
}

impl MatchRow {
    fn involves(&self, player_id: PlayerId) -> bool {
        self.winner == player_id || self.loser == player_id
    }
}

#[derive(Debug, Default)]
struct Ledger {
    /// Registration order.
    players: Vec<Player>,
    tournaments: Vec<Tournament>,
    entrants: BTreeSet<(TournamentId, PlayerId)>,
    matches: Vec<MatchRow>,
}

impl Ledger {
    fn has_player(&self, player_id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    fn has_tournament(&self, tournament_id: TournamentId) -> bool {
        self.tournaments.iter().any(|t| t.id == tournament_id)
    }
}

/// In-memory implementation of [`SwissStore`].
///
/// Cloning is cheap and clones share the same ledger.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    ledger: Arc<Mutex<Ledger>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Ledger>, StoreError> {
        self.ledger.lock().map_err(|e| StoreError::Unavailable {
            reason: format!("memory store lock poisoned: {e}"),
        })
    }
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn count_u64(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

impl SwissStore for MemoryStore {
    async fn list_players_with_records(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<StandingsRow>, StoreError> {
        let ledger = self.lock()?;
        let matches: Vec<&MatchRow> = ledger
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .collect();

        let rows = ledger
            .players
            .iter()
            .filter(|p| ledger.entrants.contains(&(tournament_id, p.id)))
            .map(|p| StandingsRow {
                player_id: p.id,
                name: p.name.clone(),
                wins: count_u32(matches.iter().filter(|m| m.winner == p.id).count()),
                matches_played: count_u32(matches.iter().filter(|m| m.involves(p.id)).count()),
            })
            .collect();
        Ok(rows)
    }

    async fn record_match(&self, new_match: &NewMatch) -> Result<MatchId, StoreError> {
        let mut ledger = self.lock()?;
        if !ledger.has_tournament(new_match.tournament_id) {
            return Err(StoreError::Rejected {
                reason: format!("tournament {} does not exist", new_match.tournament_id),
            });
        }
        for player_id in [new_match.winner, new_match.loser] {
            if !ledger.has_player(player_id) {
                return Err(StoreError::Rejected {
                    reason: format!("player {player_id} does not exist"),
                });
            }
        }
        if new_match.winner == new_match.loser {
            return Err(StoreError::Rejected {
                reason: String::from("winner and loser must differ"),
            });
        }
        if new_match.round.is_specified()
            && ledger.matches.iter().any(|m| {
                m.tournament_id == new_match.tournament_id
                    && m.round == new_match.round
                    && m.involves(new_match.winner)
                    && m.involves(new_match.loser)
            })
        {
            return Err(StoreError::DuplicateMatch {
                reason: format!(
                    "{} and {} already played in {}",
                    new_match.winner, new_match.loser, new_match.round
                ),
            });
        }

        ledger
            .entrants
            .insert((new_match.tournament_id, new_match.winner));
        ledger
            .entrants
            .insert((new_match.tournament_id, new_match.loser));
        ledger.matches.push(MatchRow {
            tournament_id: new_match.tournament_id,
            winner: new_match.winner,
            loser: new_match.loser,
            round: new_match.round,
        });
        Ok(MatchId::new())
    }

    async fn create_tournament(
        &self,
        tournament: &NewTournament,
    ) -> Result<TournamentId, StoreError> {
        let mut ledger = self.lock()?;
        if let Some(existing) = ledger
            .tournaments
            .iter()
            .find(|t| t.name == tournament.name && t.year == tournament.year)
        {
            return Ok(existing.id);
        }
        let id = TournamentId::new();
        ledger.tournaments.push(Tournament {
            id,
            name: tournament.name.clone(),
            year: tournament.year.clone(),
            sport: tournament.sport.clone(),
        });
        Ok(id)
    }

    async fn find_tournament(
        &self,
        name: &str,
        year: &str,
    ) -> Result<Option<TournamentId>, StoreError> {
        let ledger = self.lock()?;
        Ok(ledger
            .tournaments
            .iter()
            .find(|t| t.name == name && t.year == year)
            .map(|t| t.id))
    }

    async fn get_tournament(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Option<Tournament>, StoreError> {
        let ledger = self.lock()?;
        Ok(ledger
            .tournaments
            .iter()
            .find(|t| t.id == tournament_id)
            .cloned())
    }

    async fn register_player(
        &self,
        name: &str,
        tournament_id: Option<TournamentId>,
    ) -> Result<Player, StoreError> {
        let mut ledger = self.lock()?;
        if let Some(missing) = tournament_id.filter(|t| !ledger.has_tournament(*t)) {
            return Err(StoreError::Rejected {
                reason: format!("tournament {missing} does not exist"),
            });
        }
        let player = Player {
            id: PlayerId::new(),
            name: name.to_owned(),
            registered_at: Utc::now(),
        };
        ledger.players.push(player.clone());
        if let Some(tournament_id) = tournament_id {
            ledger.entrants.insert((tournament_id, player.id));
        }
        Ok(player)
    }

    async fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>, StoreError> {
        let ledger = self.lock()?;
        Ok(ledger.players.iter().find(|p| p.id == player_id).cloned())
    }

    async fn enroll_player(
        &self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> Result<(), StoreError> {
        let mut ledger = self.lock()?;
        if !ledger.has_tournament(tournament_id) || !ledger.has_player(player_id) {
            return Err(StoreError::Rejected {
                reason: format!("cannot enroll {player_id} in {tournament_id}"),
            });
        }
        ledger.entrants.insert((tournament_id, player_id));
        Ok(())
    }

    async fn match_exists(
        &self,
        tournament_id: TournamentId,
        player_a: PlayerId,
        player_b: PlayerId,
        round: Round,
    ) -> Result<bool, StoreError> {
        let ledger = self.lock()?;
        Ok(ledger.matches.iter().any(|m| {
            m.tournament_id == tournament_id
                && m.round == round
                && m.involves(player_a)
                && m.involves(player_b)
        }))
    }

    async fn count_players(&self) -> Result<u64, StoreError> {
        Ok(count_u64(self.lock()?.players.len()))
    }

    async fn delete_matches(&self) -> Result<u64, StoreError> {
        let mut ledger = self.lock()?;
        let removed = count_u64(ledger.matches.len());
        ledger.matches.clear();
        Ok(removed)
    }

    async fn delete_players(&self) -> Result<u64, StoreError> {
        let mut ledger = self.lock()?;
        let removed = count_u64(ledger.players.len());
        ledger.players.clear();
        ledger.entrants.clear();
        ledger.matches.clear();
        Ok(removed)
    }
}
