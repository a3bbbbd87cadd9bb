//! Meetup server library - exposes the main modules for the binary and the tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the application router; every API route lives under `/api`
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api", configure_api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Public and protected routes share the session restoring middleware
fn configure_api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::restore_user;

    configure_public_routes()
        .merge(configure_protected_routes())
        .layer(middleware::from_fn_with_state(state, restore_user))
}

/// Routes open to anonymous visitors
fn configure_public_routes() -> Router<Arc<AppState>> {
    use services::*;

    Router::new()
        .route("/session", get(get_session).post(login).delete(logout))
        .route("/users", post(signup))
        .route("/groups", get(list_groups))
        .route("/groups/{group_id}", get(get_group))
        .route("/groups/{group_id}/events", get(list_group_events))
        .route("/groups/{group_id}/members", get(list_members))
        .route("/events", get(list_events))
        .route("/events/{event_id}", get(get_event))
        .route("/events/{event_id}/attendees", get(list_attendees))
}

/// Routes that answer 401 without a logged in user
fn configure_protected_routes() -> Router<Arc<AppState>> {
    use crate::core::require_auth;
    use services::*;

    Router::new()
        .route("/groups", post(create_group))
        .route("/groups/current", get(list_current_groups))
        .route("/groups/{group_id}", put(update_group).delete(delete_group))
        .route("/groups/{group_id}/images", post(add_group_image))
        .route(
            "/groups/{group_id}/venues",
            get(list_venues).post(create_venue),
        )
        .route("/groups/{group_id}/events", post(create_event))
        .route(
            "/groups/{group_id}/membership",
            post(request_membership).put(change_membership),
        )
        .route(
            "/groups/{group_id}/membership/{member_id}",
            delete(delete_membership),
        )
        .route("/venues/{venue_id}", put(update_venue))
        .route("/events/{event_id}", put(update_event).delete(delete_event))
        .route("/events/{event_id}/images", post(add_event_image))
        .route(
            "/events/{event_id}/attendance",
            post(request_attendance).put(change_attendance),
        )
        .route(
            "/events/{event_id}/attendance/{user_id}",
            delete(delete_attendance),
        )
        .route("/group-images/{image_id}", delete(delete_group_image))
        .route("/event-images/{image_id}", delete(delete_event_image))
        .layer(middleware::from_fn(require_auth))
}
