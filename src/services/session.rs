//! Session services - login, logout and current session

use crate::core::{AppError, AppJson, AppState, clear_session_cookie, encode_jwt, session_cookie};
use crate::dtos::{LoginDTO, MessageDTO, SafeUserDTO, SessionDTO};
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

/// Signs a session token for `user` and returns it as a `Set-Cookie` header
pub(crate) fn start_session(state: &AppState, user: &SafeUserDTO) -> Result<HeaderMap, AppError> {
    let token = encode_jwt(user, &state.jwt_secret, state.jwt_expires_in)?;
    let cookie = session_cookie(&token, state.jwt_expires_in, state.secure_cookies);
    set_cookie_headers(cookie)
}

fn set_cookie_headers(cookie: String) -> Result<HeaderMap, AppError> {
    let value = HeaderValue::from_str(&cookie).map_err(|e| {
        error!("Invalid Set-Cookie value: {}", e);
        AppError::internal_server_error("Internal server error")
    })?;
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, value);
    Ok(headers)
}

#[instrument(skip(current_user))]
pub async fn get_session(current_user: Option<Extension<User>>) -> Json<SessionDTO> {
    let user = current_user.map(|Extension(user)| SafeUserDTO::from(user));
    debug!("Session lookup, logged in: {}", user.is_some());
    Json(SessionDTO { user })
}

#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<LoginDTO>,
) -> Result<impl IntoResponse, AppError> {
    body.validate()?;
    let (Some(credential), Some(password)) = (body.credential, body.password) else {
        return Err(AppError::bad_request("Bad Request"));
    };

    let user = state
        .user
        .find_by_credential(credential.trim())
        .await?
        .filter(|user| user.verify_password(&password))
        .ok_or_else(|| {
            warn!("Failed login attempt");
            AppError::unauthorized("Invalid credentials")
        })?;

    let safe_user = SafeUserDTO::from(user);
    let headers = start_session(&state, &safe_user)?;

    info!("User {} logged in", safe_user.id);
    Ok((
        headers,
        Json(SessionDTO {
            user: Some(safe_user),
        }),
    ))
}

#[instrument]
pub async fn logout() -> Result<impl IntoResponse, AppError> {
    let headers = set_cookie_headers(clear_session_cookie())?;
    debug!("Session cookie cleared");
    Ok((headers, Json(MessageDTO::new("success"))))
}
