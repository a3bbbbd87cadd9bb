use crate::core::{AppError, AppState};
use crate::dtos::SafeUserDTO;
use crate::entities::{Group, MembershipStatus, User};
use crate::repositories::Read;
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::HeaderMap, http::Response, middleware::Next};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const SESSION_COOKIE: &str = "token";

/// Content of the session token: the public user plus issue/expiry times
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub data: SafeUserDTO,
    pub iat: usize,
    pub exp: usize,
}

#[instrument(skip(user, secret), fields(user_id = %user.id))]
pub fn encode_jwt(user: &SafeUserDTO, secret: &str, expires_in: u64) -> Result<String, AppError> {
    debug!("Encoding JWT token for user");
    let iat = Utc::now().timestamp() as usize;
    let claims = Claims {
        data: user.clone(),
        iat,
        exp: iat + expires_in as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    info!("JWT token encoded successfully");
    Ok(token)
}

#[instrument(skip(token, secret))]
pub fn decode_jwt(token: &str, secret: &str) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
}

/// `Set-Cookie` value carrying the session token
pub fn session_cookie(token: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the session cookie
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

fn token_from_bearer(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(http::header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
            Some(token.to_string())
        }
        _ => None,
    }
}

/// Restores the logged in user, if any, into the request extensions
///
/// Runs on every API route. A missing, expired or forged token, or a token
/// for a user that no longer exists, leaves the request anonymous.
#[instrument(skip(state, req, next))]
pub async fn restore_user(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    let token = token_from_cookies(req.headers()).or_else(|| token_from_bearer(req.headers()));

    if let Some(token) = token {
        match decode_jwt(&token, &state.jwt_secret) {
            Ok(data) => match state.user.read(&data.claims.data.id).await? {
                Some(user) => {
                    debug!("Restored session for user {}", user.id);
                    req.extensions_mut().insert(user);
                }
                None => warn!("Session token refers to missing user {}", data.claims.data.id),
            },
            Err(e) => warn!("Ignoring invalid session token: {:?}", e.kind()),
        }
    }

    Ok(next.run(req).await)
}

/// Rejects requests without a restored user with 401
#[instrument(skip(req, next))]
pub async fn require_auth(req: Request, next: Next) -> Result<Response<Body>, AppError> {
    if req.extensions().get::<User>().is_none() {
        warn!("Rejected unauthenticated request to {}", req.uri().path());
        return Err(AppError::authentication_required());
    }
    Ok(next.run(req).await)
}

pub fn is_organizer(group: &Group, user: &User) -> bool {
    group.organizer_id == user.id
}

/// The organizer, or a member whose status is `co-host`
pub async fn is_organizer_or_cohost(
    state: &AppState,
    group: &Group,
    user: &User,
) -> Result<bool, AppError> {
    if is_organizer(group, user) {
        return Ok(true);
    }
    let membership = state.membership.find(group.id, user.id).await?;
    Ok(matches!(
        membership.map(|m| m.status),
        Some(MembershipStatus::Host | MembershipStatus::CoHost)
    ))
}
