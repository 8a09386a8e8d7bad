//! Axum router construction for the tournament API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use swiss_core::SwissStore;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `POST /api/tournaments` -- get-or-create a tournament
/// - `GET /api/tournaments` -- look up a tournament by name and year
/// - `POST /api/tournaments/{id}/entrants` -- enter a player
/// - `GET /api/tournaments/{id}/standings` -- ranked standings
/// - `GET /api/tournaments/{id}/pairings` -- next-round pairings
/// - `POST /api/players` -- register a player
/// - `GET /api/players/count` -- number of registered players
/// - `DELETE /api/players` -- remove every player
/// - `POST /api/matches` -- record a match by tournament id
/// - `POST /api/matches/report` -- record a match by tournament name and year
/// - `DELETE /api/matches` -- remove every match
/// - `GET /health` -- liveness probe
///
/// CORS is configured to allow any origin.
pub fn build_router<S: SwissStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        // Tournaments
        .route(
            "/api/tournaments",
            post(handlers::create_tournament::<S>).get(handlers::find_tournament::<S>),
        )
        .route(
            "/api/tournaments/{id}/entrants",
            post(handlers::enroll_player::<S>),
        )
        .route(
            "/api/tournaments/{id}/standings",
            get(handlers::standings::<S>),
        )
        .route(
            "/api/tournaments/{id}/pairings",
            get(handlers::pairings::<S>),
        )
        // Players
        .route(
            "/api/players",
            post(handlers::register_player::<S>).delete(handlers::delete_players::<S>),
        )
        .route("/api/players/count", get(handlers::count_players::<S>))
        // Matches
        .route(
            "/api/matches",
            post(handlers::record_match::<S>).delete(handlers::delete_matches::<S>),
        )
        .route("/api/matches/report", post(handlers::report_match::<S>))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
