//! Image entities for groups and events

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct GroupImage {
    pub id: i64,
    pub group_id: i64,
    pub url: String,
    pub preview: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct EventImage {
    pub id: i64,
    pub event_id: i64,
    pub url: String,
    pub preview: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
