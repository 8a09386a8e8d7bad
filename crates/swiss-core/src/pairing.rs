//! Swiss pairing generator.
//!
//! Pairs each player with the nearest-ranked player not yet paired this
//! round: rank 1 meets rank 2, rank 3 meets rank 4, and so on. Byes are
//! not supported, so an odd field is rejected with
//! [`SwissError::OddPlayerCount`]. Rematches are not avoided.

use swiss_types::{Pairing, StandingsRow, TournamentId};

use crate::error::SwissError;
use crate::standings::compute_standings;
use crate::store::SwissStore;

/// Compute the current standings and pair adjacent ranks for the next round.
///
/// # Errors
///
/// Returns [`SwissError::OddPlayerCount`] for an odd number of entrants, or
/// [`SwissError::Store`] if the standings cannot be read.
pub async fn next_round_pairings<S: SwissStore>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<Vec<Pairing>, SwissError> {
    let standings = compute_standings(store, tournament_id).await?;
    let pairings = pair_adjacent(&standings).inspect_err(|e| {
        tracing::warn!(%tournament_id, error = %e, "Cannot pair next round");
    })?;
    tracing::debug!(%tournament_id, pairs = pairings.len(), "Generated pairings");
    Ok(pairings)
}

/// Partition ranked standings into `(rank[2i], rank[2i + 1])` pairs.
///
/// # Errors
///
/// Returns [`SwissError::OddPlayerCount`] if `standings` has odd length.
pub fn pair_adjacent(standings: &[StandingsRow]) -> Result<Vec<Pairing>, SwissError> {
    let pairs = standings.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        return Err(SwissError::OddPlayerCount {
            count: standings.len(),
        });
    }

    Ok(pairs
        .filter_map(|pair| match pair {
            [higher, lower] => Some(Pairing::between(higher, lower)),
            _ => None,
        })
        .collect())
}
