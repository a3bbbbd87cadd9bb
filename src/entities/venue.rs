//! Venue entity

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Venue {
    pub id: i64,
    pub group_id: i64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
