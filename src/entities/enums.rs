//! Enums - Enumerated types stored as TEXT columns

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Whether a group or event meets online or in person
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
pub enum MeetingType {
    Online,
    #[serde(rename = "In person")]
    #[sqlx(rename = "In person")]
    InPerson,
}

impl FromStr for MeetingType {
    type Err = ();

    /// Case-insensitive, so query strings like `in Person` still match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "online" => Ok(MeetingType::Online),
            "in person" => Ok(MeetingType::InPerson),
            _ => Err(()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum MembershipStatus {
    Host,
    CoHost,
    Member,
    Pending,
}

impl MembershipStatus {
    /// Host, co-host and member count as members; pending does not
    pub fn is_member(&self) -> bool {
        !matches!(self, MembershipStatus::Pending)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Attending,
    Waitlist,
    Pending,
}
