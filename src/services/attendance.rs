//! Attendance services - attendee listing, attendance requests and approval

use super::event::find_event;
use super::group::{find_group, require_organizer_or_cohost};
use super::membership::find_user;
use crate::core::{AppError, AppJson, AppState, is_organizer, is_organizer_or_cohost};
use crate::dtos::{
    AttendanceDTO, AttendanceRequestDTO, AttendeeDTO, AttendeesDTO, ChangeAttendanceDTO,
    CreateAttendanceDTO, MessageDTO,
};
use crate::entities::{AttendanceStatus, User};
use crate::repositories::{Create, Delete};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, current_user))]
pub async fn list_attendees(
    State(state): State<Arc<AppState>>,
    current_user: Option<Extension<User>>,
    Path(event_id): Path<i64>,
) -> Result<Json<AttendeesDTO>, AppError> {
    let event = find_event(&state, event_id).await?;
    let group = find_group(&state, event.group_id).await?;

    let include_pending = match current_user {
        Some(Extension(user)) => is_organizer_or_cohost(&state, &group, &user).await?,
        None => false,
    };

    let attendees: Vec<AttendeeDTO> = state
        .attendance
        .list_attendees(event.id, include_pending)
        .await?
        .into_iter()
        .map(AttendeeDTO::from)
        .collect();

    debug!("Event {} lists {} attendees", event.id, attendees.len());
    Ok(Json(AttendeesDTO { attendees }))
}

/// Only members of the event's group may ask to attend
#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn request_attendance(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(event_id): Path<i64>,
) -> Result<Json<AttendanceRequestDTO>, AppError> {
    let event = find_event(&state, event_id).await?;

    let is_member = state
        .membership
        .find(event.group_id, current_user.id)
        .await?
        .is_some_and(|m| m.status.is_member());
    if !is_member {
        warn!("User {} is not a member of group {}", current_user.id, event.group_id);
        return Err(AppError::forbidden_default());
    }

    if let Some(existing) = state.attendance.find(event.id, current_user.id).await? {
        warn!("User {} already has a {:?} attendance", current_user.id, existing.status);
        return Err(match existing.status {
            AttendanceStatus::Pending => {
                AppError::bad_request("Attendance has already been requested")
            }
            _ => AppError::bad_request("User is already an attendee of the event"),
        });
    }

    let attendance = state
        .attendance
        .create(&CreateAttendanceDTO {
            event_id: event.id,
            user_id: current_user.id,
            status: AttendanceStatus::Pending,
        })
        .await?;

    info!("User {} requested to attend event {}", current_user.id, event.id);
    Ok(Json(AttendanceRequestDTO {
        user_id: attendance.user_id,
        status: attendance.status,
    }))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn change_attendance(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(event_id): Path<i64>,
    AppJson(body): AppJson<ChangeAttendanceDTO>,
) -> Result<Json<AttendanceDTO>, AppError> {
    let (user_id, status) = body.into_change()?;
    let event = find_event(&state, event_id).await?;
    let group = find_group(&state, event.group_id).await?;
    let attendee = find_user(&state, user_id).await?;
    let attendance = state
        .attendance
        .find(event.id, attendee.id)
        .await?
        .ok_or_else(|| {
            warn!("User {} has no attendance for event {}", attendee.id, event.id);
            AppError::not_found("Attendance between the user and the event does not exist")
        })?;
    require_organizer_or_cohost(&state, &group, &current_user).await?;

    let updated = state.attendance.update_status(attendance.id, status).await?;

    info!("Attendee {} of event {} is now {:?}", attendee.id, event.id, status);
    Ok(Json(AttendanceDTO::from(updated)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn delete_attendance(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((event_id, user_id)): Path<(i64, i64)>,
) -> Result<Json<MessageDTO>, AppError> {
    let event = find_event(&state, event_id).await?;
    let group = find_group(&state, event.group_id).await?;
    let attendee = find_user(&state, user_id).await?;
    let attendance = state
        .attendance
        .find(event.id, attendee.id)
        .await?
        .ok_or_else(|| {
            warn!("User {} has no attendance for event {}", attendee.id, event.id);
            AppError::not_found("Attendance does not exist for this User")
        })?;

    if !is_organizer(&group, &current_user) && current_user.id != attendee.id {
        warn!("User {} may not remove attendee {}", current_user.id, attendee.id);
        return Err(AppError::forbidden(
            "Only the User or organizer may delete an Attendance",
        ));
    }

    state.attendance.delete(&attendance.id).await?;

    info!("Attendee {} removed from event {}", attendee.id, event.id);
    Ok(Json(MessageDTO::new(
        "Successfully deleted attendance from event",
    )))
}
