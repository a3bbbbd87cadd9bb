//! Venue services - venues are managed by the organizer and co-hosts

use super::group::{find_group, require_organizer_or_cohost};
use crate::core::{AppError, AppJson, AppState};
use crate::dtos::{CreateVenueDTO, VenueBodyDTO, VenueDTO, VenueListDTO};
use crate::entities::User;
use crate::repositories::{Create, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(group_id): Path<i64>,
) -> Result<Json<VenueListDTO>, AppError> {
    let group = find_group(&state, group_id).await?;
    require_organizer_or_cohost(&state, &group, &current_user).await?;

    let venues: Vec<VenueDTO> = state
        .venue
        .list_by_group(group.id)
        .await?
        .into_iter()
        .map(VenueDTO::from)
        .collect();

    debug!("Group {} has {} venues", group.id, venues.len());
    Ok(Json(VenueListDTO { venues }))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(group_id): Path<i64>,
    AppJson(body): AppJson<VenueBodyDTO>,
) -> Result<(StatusCode, Json<VenueDTO>), AppError> {
    let data = body.into_data()?;
    let group = find_group(&state, group_id).await?;
    require_organizer_or_cohost(&state, &group, &current_user).await?;

    let venue = state
        .venue
        .create(&CreateVenueDTO {
            group_id: group.id,
            data,
        })
        .await?;

    info!("Venue {} created for group {}", venue.id, group.id);
    Ok((StatusCode::CREATED, Json(VenueDTO::from(venue))))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(venue_id): Path<i64>,
    AppJson(body): AppJson<VenueBodyDTO>,
) -> Result<Json<VenueDTO>, AppError> {
    let data = body.into_data()?;
    let venue = state.venue.read(&venue_id).await?.ok_or_else(|| {
        warn!("Venue {} not found", venue_id);
        AppError::not_found("Venue couldn't be found")
    })?;
    let group = find_group(&state, venue.group_id).await?;
    require_organizer_or_cohost(&state, &group, &current_user).await?;

    let updated = state.venue.update(&venue.id, &data).await?;

    info!("Venue {} updated", updated.id);
    Ok(Json(VenueDTO::from(updated)))
}
