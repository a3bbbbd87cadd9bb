//! Services module - HTTP handlers grouped by resource
//!
//! Handlers validate the body first, then load the resources they touch
//! (404), then check the caller's role (403).

pub mod attendance;
pub mod event;
pub mod group;
pub mod image;
pub mod membership;
pub mod session;
pub mod user;
pub mod venue;

pub use attendance::{change_attendance, delete_attendance, list_attendees, request_attendance};
pub use event::{
    add_event_image, create_event, delete_event, get_event, list_events, list_group_events,
    update_event,
};
pub use group::{
    add_group_image, create_group, delete_group, get_group, list_current_groups, list_groups,
    update_group,
};
pub use image::{delete_event_image, delete_group_image};
pub use membership::{change_membership, delete_membership, list_members, request_membership};
pub use session::{get_session, login, logout};
pub use user::signup;
pub use venue::{create_venue, list_venues, update_venue};

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
