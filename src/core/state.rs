//! Application State - shared by every route and middleware

use crate::core::Config;
use crate::repositories::{
    AttendanceRepository, EventImageRepository, EventRepository, GroupImageRepository,
    GroupRepository, MembershipRepository, UserRepository, VenueRepository,
};
use sqlx::SqlitePool;

/// Default session lifetime: one week
pub const DEFAULT_JWT_EXPIRES_IN: u64 = 60 * 60 * 24 * 7;

pub struct AppState {
    pub user: UserRepository,
    pub group: GroupRepository,
    pub membership: MembershipRepository,
    pub venue: VenueRepository,
    pub event: EventRepository,
    pub attendance: AttendanceRepository,
    pub group_image: GroupImageRepository,
    pub event_image: EventImageRepository,

    /// Secret key for signing session tokens
    pub jwt_secret: String,

    /// Token and cookie lifetime in seconds
    pub jwt_expires_in: u64,

    /// Whether the session cookie carries the `Secure` flag
    pub secure_cookies: bool,
}

impl AppState {
    /// Builds every repository on the shared pool, with the default session settings
    pub fn new(pool: SqlitePool, jwt_secret: String) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            group: GroupRepository::new(pool.clone()),
            membership: MembershipRepository::new(pool.clone()),
            venue: VenueRepository::new(pool.clone()),
            event: EventRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool.clone()),
            group_image: GroupImageRepository::new(pool.clone()),
            event_image: EventImageRepository::new(pool),
            jwt_secret,
            jwt_expires_in: DEFAULT_JWT_EXPIRES_IN,
            secure_cookies: false,
        }
    }

    pub fn from_config(pool: SqlitePool, config: &Config) -> Self {
        let mut state = Self::new(pool, config.jwt_secret.clone());
        state.jwt_expires_in = config.jwt_expires_in;
        state.secure_cookies = config.is_production();
        state
    }
}
