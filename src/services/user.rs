//! User services - sign-up

use super::session::start_session;
use crate::core::{AppError, AppJson, AppState};
use crate::dtos::{CreateUserDTO, SafeUserDTO, SessionDTO, SignupDTO};
use crate::entities::User;
use crate::repositories::Create;
use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, body))]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<SignupDTO>,
) -> Result<impl IntoResponse, AppError> {
    body.validate()?;
    let (Some(first_name), Some(last_name), Some(email), Some(username), Some(password)) = (
        body.first_name,
        body.last_name,
        body.email,
        body.username,
        body.password,
    ) else {
        return Err(AppError::bad_request("Bad Request"));
    };
    let email = email.trim().to_string();
    let username = username.trim().to_string();

    let mut duplicate = AppError::internal_server_error("User already exists");
    let mut exists = false;
    if state.user.find_by_email(&email).await?.is_some() {
        exists = true;
        duplicate = duplicate.with_error("email", "User with that email already exists");
    }
    if state.user.find_by_username(&username).await?.is_some() {
        exists = true;
        duplicate = duplicate.with_error("username", "User with that username already exists");
    }
    if exists {
        warn!("Sign-up rejected, user already exists");
        return Err(duplicate);
    }

    let user = state
        .user
        .create(&CreateUserDTO {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email,
            username,
            hashed_password: User::hash_password(&password)?,
        })
        .await?;

    let safe_user = SafeUserDTO::from(user);
    let headers = start_session(&state, &safe_user)?;

    info!("User {} signed up", safe_user.id);
    Ok((
        headers,
        Json(SessionDTO {
            user: Some(safe_user),
        }),
    ))
}
