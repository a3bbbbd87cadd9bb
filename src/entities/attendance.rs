//! Attendance entity - join record between a user and an event

use super::enums::AttendanceStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Attendance {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: AttendanceStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventAttendee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub status: AttendanceStatus,
}
