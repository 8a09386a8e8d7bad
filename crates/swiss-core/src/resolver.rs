//! Tournament resolver: idempotent get-or-create by `(name, year)`.
//!
//! The sport is stored on creation but is not part of the identity key, so
//! resolving the same `(name, year)` with a different sport returns the
//! original tournament. Atomicity under concurrent callers comes from the
//! store: [`SwissStore::create_tournament`] returns the existing id when it
//! loses an insert race.

use swiss_types::{NewTournament, TournamentId};

use crate::error::SwissError;
use crate::sanitize::clean_text;
use crate::store::SwissStore;

/// Return the id of the `(name, year)` tournament, creating it if absent.
///
/// # Errors
///
/// Returns [`SwissError::InvalidInput`] if a field fails sanitization, or
/// [`SwissError::Store`] if the store fails.
pub async fn resolve_tournament<S: SwissStore>(
    store: &S,
    name: &str,
    year: &str,
    sport: &str,
) -> Result<TournamentId, SwissError> {
    let name = clean_text("name", name)?;
    let year = clean_text("year", year)?;

    if let Some(id) = store.find_tournament(&name, &year).await? {
        tracing::debug!(%id, name, year, "Resolved existing tournament");
        return Ok(id);
    }

    let sport = clean_text("sport", sport)?;
    let tournament = NewTournament { name, year, sport };
    let id = store.create_tournament(&tournament).await?;
    tracing::info!(
        %id,
        name = tournament.name,
        year = tournament.year,
        sport = tournament.sport,
        "Resolved tournament"
    );
    Ok(id)
}

/// Look up a tournament by `(name, year)` without creating it.
///
/// The inputs are sanitized the same way as on creation so that lookups
/// match the stored form.
///
/// # Errors
///
/// Returns [`SwissError::InvalidInput`] if a field fails sanitization, or
/// [`SwissError::Store`] if the store fails.
pub async fn find_tournament<S: SwissStore>(
    store: &S,
    name: &str,
    year: &str,
) -> Result<Option<TournamentId>, SwissError> {
    let name = clean_text("name", name)?;
    let year = clean_text("year", year)?;
    Ok(store.find_tournament(&name, &year).await?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    async fn resolve(store: &MemoryStore, name: &str, year: &str, sport: &str) -> TournamentId {
        resolve_tournament(store, name, year, sport).await.unwrap()
    }

    #[tokio::test]
    async fn resolving_twice_returns_the_same_id() {
        let store = MemoryStore::new();
        let first = resolve(&store, "Wimbledon", "2017", "TENNIS").await;
        let second = resolve(&store, "Wimbledon", "2017", "TENNIS").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn sport_is_not_part_of_the_key() {
        let store = MemoryStore::new();
        let tennis = resolve(&store, "Wimbledon", "2017", "TENNIS").await;
        let squash = resolve(&store, "Wimbledon", "2017", "SQUASH").await;
        assert_eq!(tennis, squash);

        let stored = store.get_tournament(tennis).await.unwrap().unwrap();
        assert_eq!(stored.sport, "TENNIS");
    }

    #[tokio::test]
    async fn different_year_is_a_different_tournament() {
        let store = MemoryStore::new();
        let y2017 = resolve(&store, "Wimbledon", "2017", "TENNIS").await;
        let y2018 = resolve(&store, "Wimbledon", "2018", "TENNIS").await;
        assert_ne!(y2017, y2018);
    }

    #[tokio::test]
    async fn concurrent_resolutions_converge() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                resolve_tournament(&store, "US Open", "2017", "TENNIS").await
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }
        assert_eq!(ids.len(), 16);
        ids.dedup();
        assert_eq!(ids.len(), 1);
    }

    #[tokio::test]
    async fn lookup_matches_sanitized_names() {
        let store = MemoryStore::new();
        let created = resolve(&store, " Rock & Roll Open ", "2017", "DARTS").await;
        let found = find_tournament(&store, "Rock & Roll Open", "2017").await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let store = MemoryStore::new();
        let result = resolve_tournament(&store, "  ", "2017", "TENNIS").await;
        assert!(matches!(result, Err(SwissError::InvalidInput { field: "name", .. })));
    }
}
