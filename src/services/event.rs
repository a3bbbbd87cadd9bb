//! Event services - public listings plus management by organizer and co-hosts

use super::group::{find_group, require_organizer_or_cohost};
use crate::core::{AppError, AppJson, AppState, is_organizer_or_cohost};
use crate::dtos::{
    CreateEventDTO, CreateEventImageDTO, EventBodyDTO, EventDTO, EventDetailsDTO, EventListDTO,
    EventSummaryDTO, EventsQuery, ImageBodyDTO, ImageDTO, MessageDTO,
};
use crate::entities::{AttendanceStatus, Event, Group, User};
use crate::repositories::{Create, Delete, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use futures::try_join;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Loads an event or fails with the event 404
pub(crate) async fn find_event(state: &AppState, event_id: i64) -> Result<Event, AppError> {
    state.event.read(&event_id).await?.ok_or_else(|| {
        warn!("Event {} not found", event_id);
        AppError::not_found("Event couldn't be found")
    })
}

/// An event may only reference a venue of its own group
async fn check_venue(state: &AppState, group: &Group, venue_id: Option<i64>) -> Result<(), AppError> {
    let Some(venue_id) = venue_id else {
        return Ok(());
    };
    match state.venue.read(&venue_id).await? {
        Some(venue) if venue.group_id == group.id => Ok(()),
        _ => {
            warn!("Venue {} not usable by group {}", venue_id, group.id);
            Err(AppError::not_found("Venue couldn't be found"))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventListDTO>, AppError> {
    let filter = query.into_filter()?;
    debug!("Listing events with {:?}", filter);

    let events = state
        .event
        .list_summaries(&filter)
        .await?
        .into_iter()
        .map(EventSummaryDTO::from)
        .collect();

    Ok(Json(EventListDTO { events }))
}

#[instrument(skip(state))]
pub async fn list_group_events(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<i64>,
) -> Result<Json<EventListDTO>, AppError> {
    let group = find_group(&state, group_id).await?;

    let events = state
        .event
        .list_summaries_by_group(group.id)
        .await?
        .into_iter()
        .map(EventSummaryDTO::from)
        .collect();

    Ok(Json(EventListDTO { events }))
}

#[instrument(skip(state))]
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventDetailsDTO>, AppError> {
    let event = find_event(&state, event_id).await?;
    let group = find_group(&state, event.group_id).await?;

    let venue = async {
        match event.venue_id {
            Some(venue_id) => state.venue.read(&venue_id).await,
            None => Ok(None),
        }
    };
    let (num_attending, venue, images) = try_join!(
        state.event.count_attending(event.id),
        venue,
        state.event_image.list_by_event(event.id),
    )?;
    let images = images.into_iter().map(ImageDTO::from).collect();

    Ok(Json(EventDetailsDTO::new(
        event,
        num_attending,
        group,
        venue,
        images,
    )))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(group_id): Path<i64>,
    AppJson(body): AppJson<EventBodyDTO>,
) -> Result<(StatusCode, Json<EventDTO>), AppError> {
    let data = body.into_data()?;
    let group = find_group(&state, group_id).await?;
    check_venue(&state, &group, data.venue_id).await?;
    require_organizer_or_cohost(&state, &group, &current_user).await?;

    let event = state
        .event
        .create(&CreateEventDTO {
            group_id: group.id,
            data,
        })
        .await?;

    info!("Event {} created for group {}", event.id, group.id);
    Ok((StatusCode::CREATED, Json(EventDTO::from(event))))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(event_id): Path<i64>,
    AppJson(body): AppJson<EventBodyDTO>,
) -> Result<Json<EventDTO>, AppError> {
    let data = body.into_data()?;
    let event = find_event(&state, event_id).await?;
    let group = find_group(&state, event.group_id).await?;
    check_venue(&state, &group, data.venue_id).await?;
    require_organizer_or_cohost(&state, &group, &current_user).await?;

    let updated = state.event.update(&event.id, &data).await?;

    info!("Event {} updated", updated.id);
    Ok(Json(EventDTO::from(updated)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(event_id): Path<i64>,
) -> Result<Json<MessageDTO>, AppError> {
    let event = find_event(&state, event_id).await?;
    let group = find_group(&state, event.group_id).await?;
    require_organizer_or_cohost(&state, &group, &current_user).await?;

    state.event.delete(&event.id).await?;

    info!("Event {} deleted", event.id);
    Ok(Json(MessageDTO::new("Successfully deleted")))
}

/// Attendees, the organizer and co-hosts may add images to an event
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn add_event_image(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(event_id): Path<i64>,
    AppJson(body): AppJson<ImageBodyDTO>,
) -> Result<Json<ImageDTO>, AppError> {
    let (url, preview) = body.into_parts()?;
    let event = find_event(&state, event_id).await?;
    let group = find_group(&state, event.group_id).await?;

    let attending = state
        .attendance
        .find(event.id, current_user.id)
        .await?
        .is_some_and(|a| a.status == AttendanceStatus::Attending);
    if !attending && !is_organizer_or_cohost(&state, &group, &current_user).await? {
        warn!("User {} may not add images to event {}", current_user.id, event.id);
        return Err(AppError::forbidden_default());
    }

    let image = state
        .event_image
        .create(&CreateEventImageDTO {
            event_id: event.id,
            url,
            preview,
        })
        .await?;

    info!("Image {} added to event {}", image.id, event.id);
    Ok(Json(ImageDTO::from(image)))
}
