//! Group services - listing, details, CRUD and group images

use crate::core::{AppError, AppJson, AppState, is_organizer, is_organizer_or_cohost};
use crate::dtos::{
    CreateGroupDTO, CreateGroupImageDTO, GroupBodyDTO, GroupDTO, GroupDetailsDTO, GroupListDTO,
    GroupSummaryDTO, ImageBodyDTO, ImageDTO, MessageDTO, OrganizerDTO, VenueDTO,
};
use crate::entities::{Group, User};
use crate::repositories::{Create, Delete, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use futures::try_join;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Loads a group or fails with the group 404
pub(crate) async fn find_group(state: &AppState, group_id: i64) -> Result<Group, AppError> {
    state.group.read(&group_id).await?.ok_or_else(|| {
        warn!("Group {} not found", group_id);
        AppError::not_found("Group couldn't be found")
    })
}

fn require_organizer(group: &Group, user: &User) -> Result<(), AppError> {
    if is_organizer(group, user) {
        Ok(())
    } else {
        warn!("User {} is not the organizer of group {}", user.id, group.id);
        Err(AppError::forbidden_default())
    }
}

/// 403 unless the user is the organizer or a co-host of the group
pub(crate) async fn require_organizer_or_cohost(
    state: &AppState,
    group: &Group,
    user: &User,
) -> Result<(), AppError> {
    if is_organizer_or_cohost(state, group, user).await? {
        Ok(())
    } else {
        warn!("User {} cannot manage group {}", user.id, group.id);
        Err(AppError::forbidden_default())
    }
}

#[instrument(skip(state))]
pub async fn list_groups(State(state): State<Arc<AppState>>) -> Result<Json<GroupListDTO>, AppError> {
    let groups: Vec<GroupSummaryDTO> = state
        .group
        .list_summaries()
        .await?
        .into_iter()
        .map(GroupSummaryDTO::from)
        .collect();

    debug!("Listing {} groups", groups.len());
    Ok(Json(GroupListDTO { groups }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_current_groups(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<GroupListDTO>, AppError> {
    let groups: Vec<GroupSummaryDTO> = state
        .group
        .list_summaries_for_user(current_user.id)
        .await?
        .into_iter()
        .map(GroupSummaryDTO::from)
        .collect();

    debug!("User belongs to {} groups", groups.len());
    Ok(Json(GroupListDTO { groups }))
}

#[instrument(skip(state))]
pub async fn get_group(
    State(state): State<Arc<AppState>>,
    Path(group_id): Path<i64>,
) -> Result<Json<GroupDetailsDTO>, AppError> {
    let group = find_group(&state, group_id).await?;

    let (num_members, images, organizer, venues) = try_join!(
        state.group.count_members(group.id),
        state.group_image.list_by_group(group.id),
        state.user.read(&group.organizer_id),
        state.venue.list_by_group(group.id),
    )?;

    Ok(Json(GroupDetailsDTO {
        group: GroupDTO::from(group),
        num_members,
        group_images: images.into_iter().map(ImageDTO::from).collect(),
        organizer: organizer.map(OrganizerDTO::from),
        venues: venues.into_iter().map(VenueDTO::from).collect(),
    }))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    AppJson(body): AppJson<GroupBodyDTO>,
) -> Result<(StatusCode, Json<GroupDTO>), AppError> {
    let data = body.into_data()?;

    let group = state
        .group
        .create(&CreateGroupDTO {
            organizer_id: current_user.id,
            data,
        })
        .await?;

    info!("Group {} created", group.id);
    Ok((StatusCode::CREATED, Json(GroupDTO::from(group))))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn update_group(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(group_id): Path<i64>,
    AppJson(body): AppJson<GroupBodyDTO>,
) -> Result<Json<GroupDTO>, AppError> {
    let data = body.into_data()?;
    let group = find_group(&state, group_id).await?;
    require_organizer(&group, &current_user)?;

    let updated = state.group.update(&group.id, &data).await?;

    info!("Group {} updated", updated.id);
    Ok(Json(GroupDTO::from(updated)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(group_id): Path<i64>,
) -> Result<Json<MessageDTO>, AppError> {
    let group = find_group(&state, group_id).await?;
    require_organizer(&group, &current_user)?;

    state.group.delete(&group.id).await?;

    info!("Group {} deleted", group.id);
    Ok(Json(MessageDTO::new("Successfully deleted")))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn add_group_image(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(group_id): Path<i64>,
    AppJson(body): AppJson<ImageBodyDTO>,
) -> Result<Json<ImageDTO>, AppError> {
    let (url, preview) = body.into_parts()?;
    let group = find_group(&state, group_id).await?;
    require_organizer(&group, &current_user)?;

    let image = state
        .group_image
        .create(&CreateGroupImageDTO {
            group_id: group.id,
            url,
            preview,
        })
        .await?;

    info!("Image {} added to group {}", image.id, group.id);
    Ok(Json(ImageDTO::from(image)))
}
