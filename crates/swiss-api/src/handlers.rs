//! REST API endpoint handlers.
//!
//! Every handler is generic over the store backend and delegates to the
//! [`TournamentService`](swiss_core::TournamentService) in [`AppState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness probe |
//! | `POST` | `/api/tournaments` | Get-or-create a tournament |
//! | `GET` | `/api/tournaments` | Find a tournament by name and year |
//! | `POST` | `/api/tournaments/:id/entrants` | Enter a player |
//! | `GET` | `/api/tournaments/:id/standings` | Ranked standings |
//! | `GET` | `/api/tournaments/:id/pairings` | Next-round pairings |
//! | `POST` | `/api/players` | Register a player |
//! | `GET` | `/api/players/count` | Count players |
//! | `DELETE` | `/api/players` | Remove every player |
//! | `POST` | `/api/matches` | Record a match |
//! | `POST` | `/api/matches/report` | Record a match by tournament name |
//! | `DELETE` | `/api/matches` | Remove every match |

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use swiss_core::SwissStore;
use swiss_types::{MatchReport, NewMatch, Pairing, PlayerId, Round, StandingsRow, TournamentId};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request and response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /api/tournaments`.
#[derive(Debug, Deserialize)]
pub struct CreateTournamentRequest {
    /// Tournament name.
    pub name: String,
    /// Edition year.
    pub year: String,
    /// Sport; the configured default when omitted.
    pub sport: Option<String>,
}

/// Query of `GET /api/tournaments`.
#[derive(Debug, Deserialize)]
pub struct TournamentQuery {
    /// Tournament name.
    pub name: String,
    /// Edition year.
    pub year: String,
}

/// Body of `POST /api/tournaments/{id}/entrants`.
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    /// The player to enter.
    pub player_id: PlayerId,
}

/// Body of `POST /api/players`.
#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    /// Display name.
    pub name: String,
    /// Tournament to enter the new player into.
    pub tournament_id: Option<TournamentId>,
}

/// Body of `POST /api/matches`.
#[derive(Debug, Deserialize)]
pub struct RecordMatchRequest {
    /// The winning player.
    pub winner_id: PlayerId,
    /// The losing player.
    pub loser_id: PlayerId,
    /// The tournament the match belongs to.
    pub tournament_id: TournamentId,
    /// Round number; unspecified when omitted.
    #[serde(default)]
    pub round: Round,
}

/// Body of `POST /api/matches/report`.
#[derive(Debug, Deserialize)]
pub struct ReportMatchRequest {
    /// The winning player.
    pub winner_id: PlayerId,
    /// The losing player.
    pub loser_id: PlayerId,
    /// Tournament name.
    pub tournament_name: String,
    /// Edition year.
    pub year: String,
    /// Round number; unspecified when omitted.
    #[serde(default)]
    pub round: Round,
}

/// `{tournament_id}` response.
#[derive(Debug, Serialize)]
pub struct TournamentIdResponse {
    /// The resolved tournament.
    pub tournament_id: TournamentId,
}

/// `{player_id}` response.
#[derive(Debug, Serialize)]
pub struct PlayerIdResponse {
    /// The registered player.
    pub player_id: PlayerId,
}

/// `{count}` response.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    /// Number of rows.
    pub count: u64,
}

/// `{deleted}` response.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Number of rows removed.
    pub deleted: u64,
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe. Does not touch the store.
pub async fn health() -> &'static str {
    "ok"
}

// ---------------------------------------------------------------------------
// Tournaments
// ---------------------------------------------------------------------------

/// Get-or-create a tournament. Repeat calls return the same id.
pub async fn create_tournament<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<CreateTournamentRequest>, JsonRejection>,
) -> Result<Json<TournamentIdResponse>, ApiError> {
    let Json(request) = payload?;
    let sport = request
        .sport
        .as_deref()
        .unwrap_or_else(|| state.service.default_sport());

    let tournament_id = state
        .service
        .resolve_tournament(&request.name, &request.year, sport)
        .await?;

    Ok(Json(TournamentIdResponse { tournament_id }))
}

/// Look up a tournament by name and year.
pub async fn find_tournament<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
    query: Result<Query<TournamentQuery>, QueryRejection>,
) -> Result<Json<TournamentIdResponse>, ApiError> {
    let Query(query) = query?;

    let tournament_id = state
        .service
        .find_tournament(&query.name, &query.year)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("tournament {} {}", query.name, query.year)))?;

    Ok(Json(TournamentIdResponse { tournament_id }))
}

/// Enter an existing player into a tournament.
pub async fn enroll_player<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id_str): Path<String>,
    payload: Result<Json<EnrollRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let tournament_id = parse_tournament_id(&id_str)?;
    let Json(request) = payload?;

    state
        .service
        .enroll_player(tournament_id, request.player_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Ranked standings. An unknown tournament has empty standings.
pub async fn standings<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id_str): Path<String>,
) -> Result<Json<Vec<StandingsRow>>, ApiError> {
    let tournament_id = parse_tournament_id(&id_str)?;
    let rows = state.service.standings(tournament_id).await?;
    Ok(Json(rows))
}

/// Pairings for the next round.
pub async fn pairings<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id_str): Path<String>,
) -> Result<Json<Vec<Pairing>>, ApiError> {
    let tournament_id = parse_tournament_id(&id_str)?;
    let pairs = state.service.pairings(tournament_id).await?;
    Ok(Json(pairs))
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Register a player, optionally entering them into a tournament.
pub async fn register_player<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<RegisterPlayerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;

    let player = state
        .service
        .register_player(&request.name, request.tournament_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PlayerIdResponse {
            player_id: player.id,
        }),
    ))
}

/// Number of registered players.
pub async fn count_players<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state.service.count_players().await?;
    Ok(Json(CountResponse { count }))
}

/// Remove every player, with their entries and matches.
pub async fn delete_players<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = state.service.clear_players().await?;
    Ok(Json(DeletedResponse { deleted }))
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// Record a match against an existing tournament.
pub async fn record_match<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<RecordMatchRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;

    state
        .service
        .record_match(NewMatch {
            tournament_id: request.tournament_id,
            winner: request.winner_id,
            loser: request.loser_id,
            round: request.round,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Record a match by tournament name and year, creating the tournament if needed.
pub async fn report_match<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<ReportMatchRequest>, JsonRejection>,
) -> Result<Json<TournamentIdResponse>, ApiError> {
    let Json(request) = payload?;

    let report = MatchReport {
        winner: request.winner_id,
        loser: request.loser_id,
        tournament_name: request.tournament_name,
        year: request.year,
        round: request.round,
    };
    let tournament_id = state.service.report_match(&report).await?;

    Ok(Json(TournamentIdResponse { tournament_id }))
}

/// Remove every match.
pub async fn delete_matches<S: SwissStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = state.service.clear_matches().await?;
    Ok(Json(DeletedResponse { deleted }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a tournament id from a path segment.
fn parse_tournament_id(s: &str) -> Result<TournamentId, ApiError> {
    s.parse::<TournamentId>()
        .map_err(|e: uuid::Error| ApiError::InvalidUuid(format!("{s}: {e}")))
}
