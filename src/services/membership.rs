//! Membership services - listing members, join requests, role changes, removal

use super::group::find_group;
use crate::core::{AppError, AppJson, AppState, is_organizer, is_organizer_or_cohost};
use crate::dtos::{
    ChangeMembershipDTO, CreateMembershipDTO, MemberDTO, MembersDTO, MembershipDTO,
    MembershipRequestDTO, MessageDTO,
};
use crate::entities::{MembershipStatus, User};
use crate::repositories::{Create, Delete, Read};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub(crate) async fn find_user(state: &AppState, user_id: i64) -> Result<User, AppError> {
    state.user.read(&user_id).await?.ok_or_else(|| {
        warn!("User {} not found", user_id);
        AppError::not_found("User couldn't be found")
    })
}

/// Pending requests are only listed for the organizer and co-hosts
#[instrument(skip(state, current_user))]
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    current_user: Option<Extension<User>>,
    Path(group_id): Path<i64>,
) -> Result<Json<MembersDTO>, AppError> {
    let group = find_group(&state, group_id).await?;

    let include_pending = match current_user {
        Some(Extension(user)) => is_organizer_or_cohost(&state, &group, &user).await?,
        None => false,
    };

    let members: Vec<MemberDTO> = state
        .membership
        .list_members(group.id, include_pending)
        .await?
        .into_iter()
        .map(MemberDTO::from)
        .collect();

    debug!("Group {} lists {} members", group.id, members.len());
    Ok(Json(MembersDTO { members }))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn request_membership(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(group_id): Path<i64>,
) -> Result<Json<MembershipRequestDTO>, AppError> {
    let group = find_group(&state, group_id).await?;

    if let Some(existing) = state.membership.find(group.id, current_user.id).await? {
        warn!("User {} already has a {:?} membership", current_user.id, existing.status);
        return Err(match existing.status {
            MembershipStatus::Pending => {
                AppError::bad_request("Membership has already been requested")
            }
            _ => AppError::bad_request("User is already a member of the group"),
        });
    }

    let membership = state
        .membership
        .create(&CreateMembershipDTO {
            user_id: current_user.id,
            group_id: group.id,
            status: MembershipStatus::Pending,
        })
        .await?;

    info!("User {} requested to join group {}", current_user.id, group.id);
    Ok(Json(MembershipRequestDTO {
        member_id: membership.user_id,
        status: membership.status,
    }))
}

/// Promotion to `member` needs the organizer or a co-host, to `co-host` the organizer
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn change_membership(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(group_id): Path<i64>,
    AppJson(body): AppJson<ChangeMembershipDTO>,
) -> Result<Json<MembershipDTO>, AppError> {
    let (member_id, status) = body.into_change()?;
    let group = find_group(&state, group_id).await?;
    let member = find_user(&state, member_id).await?;
    let membership = state
        .membership
        .find(group.id, member.id)
        .await?
        .ok_or_else(|| {
            warn!("User {} has no membership in group {}", member.id, group.id);
            AppError::not_found("Membership between the user and the group does not exist")
        })?;

    let allowed = match status {
        MembershipStatus::CoHost => is_organizer(&group, &current_user),
        _ => is_organizer_or_cohost(&state, &group, &current_user).await?,
    };
    if !allowed || membership.status == MembershipStatus::Host {
        warn!("User {} may not set {:?} on member {}", current_user.id, status, member.id);
        return Err(AppError::forbidden_default());
    }

    let updated = state.membership.update_status(membership.id, status).await?;

    info!("Member {} of group {} is now {:?}", member.id, group.id, status);
    Ok(Json(MembershipDTO::from(updated)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn delete_membership(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path((group_id, member_id)): Path<(i64, i64)>,
) -> Result<Json<MessageDTO>, AppError> {
    let group = find_group(&state, group_id).await?;
    let member = find_user(&state, member_id).await?;
    let membership = state
        .membership
        .find(group.id, member.id)
        .await?
        .ok_or_else(|| {
            warn!("User {} has no membership in group {}", member.id, group.id);
            AppError::not_found("Membership does not exist for this User")
        })?;

    if membership.status == MembershipStatus::Host {
        warn!("Refusing to remove the host of group {}", group.id);
        return Err(AppError::forbidden_default());
    }
    if !is_organizer(&group, &current_user) && current_user.id != member.id {
        warn!("User {} may not remove member {}", current_user.id, member.id);
        return Err(AppError::forbidden(
            "Only the User or organizer may delete a Membership",
        ));
    }

    state.membership.delete(&membership.id).await?;

    info!("Member {} removed from group {}", member.id, group.id);
    Ok(Json(MessageDTO::new(
        "Successfully deleted membership from group",
    )))
}
