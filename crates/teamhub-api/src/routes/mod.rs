//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{events, health, join_requests, members, teams};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(team_routes())
        .merge(member_routes())
        .merge(join_request_routes())
        .merge(event_routes())
}

fn team_routes() -> Router<AppState> {
    Router::new()
        .route("/teams", post(teams::create_team))
        .route("/teams/@me", get(teams::list_my_teams))
        .route("/teams/:team_id", get(teams::get_team))
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/teams/:team_id/members", get(members::list_members))
        .route(
            "/teams/:team_id/members/@me",
            post(members::join_team).delete(members::leave_team),
        )
        .route(
            "/teams/:team_id/members/:user_id",
            patch(members::update_member_role).delete(members::remove_member),
        )
}

fn join_request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/teams/:team_id/join-requests",
            post(join_requests::create_join_request).get(join_requests::list_join_requests),
        )
        .route(
            "/teams/:team_id/join-requests/:request_id",
            patch(join_requests::resolve_join_request),
        )
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/teams/:team_id/events",
            post(events::create_event).get(events::list_events),
        )
        .route(
            "/teams/:team_id/events/:event_id/participants",
            get(events::list_participants),
        )
        .route(
            "/teams/:team_id/events/:event_id/join",
            post(events::join_event).delete(events::leave_event),
        )
}
