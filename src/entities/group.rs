//! Group entity and its list projection

use super::enums::MeetingType;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Group {
    pub id: i64,
    pub organizer_id: i64,
    pub name: String,
    pub about: String,
    #[sqlx(rename = "type")]
    pub kind: MeetingType,
    pub private: bool,
    pub city: String,
    pub state: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Group row plus the aggregates shown in group listings
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GroupSummary {
    #[sqlx(flatten)]
    pub group: Group,
    pub num_members: i64,
    pub preview_image: Option<String>,
}
