use axum_test::TestServer;
use meetup_server::core::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "meetup-test-secret-do-not-use-elsewhere";

/// AppState on the test pool, signed with the test secret
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    Arc::new(AppState::new(pool, TEST_JWT_SECRET.to_string()))
}

pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = meetup_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Session token for a fixture user, valid for one hour
///
/// Only `data.id` is used to restore the user, so the other fields are dummies.
pub fn create_test_jwt(user_id: i64, jwt_secret: &str) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    let now = Utc::now();
    let claims = json!({
        "data": {
            "id": user_id,
            "firstName": "Test",
            "lastName": "User",
            "email": format!("user{user_id}@example.com"),
            "username": format!("user{user_id}"),
        },
        "iat": now.timestamp(),
        "exp": (now + Duration::hours(1)).timestamp(),
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("Failed to create JWT token")
}

/// `Authorization` header value for a fixture user
pub fn bearer(user_id: i64) -> String {
    format!("Bearer {}", create_test_jwt(user_id, TEST_JWT_SECRET))
}
