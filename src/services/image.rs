//! Image services - deleting group and event images

use super::event::find_event;
use super::group::{find_group, require_organizer_or_cohost};
use crate::core::{AppError, AppState};
use crate::dtos::MessageDTO;
use crate::entities::User;
use crate::repositories::{Delete, Read};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn delete_group_image(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(image_id): Path<i64>,
) -> Result<Json<MessageDTO>, AppError> {
    let image = state.group_image.read(&image_id).await?.ok_or_else(|| {
        warn!("Group image {} not found", image_id);
        AppError::not_found("Group Image couldn't be found")
    })?;
    let group = find_group(&state, image.group_id).await?;
    require_organizer_or_cohost(&state, &group, &current_user).await?;

    state.group_image.delete(&image.id).await?;

    info!("Group image {} deleted", image.id);
    Ok(Json(MessageDTO::new("Successfully deleted")))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn delete_event_image(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(image_id): Path<i64>,
) -> Result<Json<MessageDTO>, AppError> {
    let image = state.event_image.read(&image_id).await?.ok_or_else(|| {
        warn!("Event image {} not found", image_id);
        AppError::not_found("Event Image couldn't be found")
    })?;
    let event = find_event(&state, image.event_id).await?;
    let group = find_group(&state, event.group_id).await?;
    require_organizer_or_cohost(&state, &group, &current_user).await?;

    state.event_image.delete(&image.id).await?;

    info!("Event image {} deleted", image.id);
    Ok(Json(MessageDTO::new("Successfully deleted")))
}
