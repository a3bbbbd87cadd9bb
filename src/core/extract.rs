//! Request extractors whose rejections render as [`AppError`]

use super::AppError;
use axum_macros::FromRequest;

/// JSON body; a missing, malformed or mistyped body becomes a 400 `AppError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
