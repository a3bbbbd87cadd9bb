//! Membership entity - join record between a user and a group

use super::enums::MembershipStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Membership {
    pub id: i64,
    pub user_id: i64,
    pub group_id: i64,
    pub status: MembershipStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A member as listed under a group: user fields plus the membership status
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GroupMember {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub status: MembershipStatus,
}
