//! Event entity and its list projection

use super::enums::MeetingType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Event {
    pub id: i64,
    pub group_id: i64,
    pub venue_id: Option<i64>,
    pub name: String,
    pub description: String,
    #[sqlx(rename = "type")]
    pub kind: MeetingType,
    pub capacity: Option<i64>,
    pub price: f64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Event row joined with its group and venue, plus the listing aggregates
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventSummary {
    pub id: i64,
    pub group_id: i64,
    pub venue_id: Option<i64>,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: MeetingType,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub num_attending: i64,
    pub preview_image: Option<String>,
    pub group_name: String,
    pub group_city: String,
    pub group_state: String,
    pub venue_city: Option<String>,
    pub venue_state: Option<String>,
}
