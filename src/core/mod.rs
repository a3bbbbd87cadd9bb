//! Core Module - Application infrastructure
//!
//! Everything the handlers lean on but that is not domain logic:
//! - JWT session cookies and the auth middleware
//! - Configuration
//! - Error handling and body extraction
//! - Shared application state

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod state;

pub use auth::{
    Claims, clear_session_cookie, decode_jwt, encode_jwt, is_organizer, is_organizer_or_cohost,
    require_auth, restore_user, session_cookie,
};
pub use config::Config;
pub use error::AppError;
pub use extract::AppJson;
pub use state::AppState;
