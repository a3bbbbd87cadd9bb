//! Membership DTOs

use super::common::parse_integer;
use crate::core::AppError;
use crate::entities::{GroupMember, Membership, MembershipStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Debug)]
pub struct MembershipStatusDTO {
    pub status: MembershipStatus,
}

/// Entry of `GET /groups/{id}/members`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MemberDTO {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "Membership")]
    pub membership: MembershipStatusDTO,
}

impl From<GroupMember> for MemberDTO {
    fn from(value: GroupMember) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            membership: MembershipStatusDTO {
                status: value.status,
            },
        }
    }
}

#[derive(Serialize, Debug)]
pub struct MembersDTO {
    #[serde(rename = "Members")]
    pub members: Vec<MemberDTO>,
}

#[derive(Debug, Clone)]
pub struct CreateMembershipDTO {
    pub user_id: i64,
    pub group_id: i64,
    pub status: MembershipStatus,
}

/// Response of a membership request
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequestDTO {
    pub member_id: i64,
    pub status: MembershipStatus,
}

/// Body of `PUT /groups/{id}/membership`
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChangeMembershipDTO {
    /// Integer, or its string form
    pub member_id: Option<Value>,
    pub status: Option<String>,
}

impl ChangeMembershipDTO {
    /// Target member and new status; only `member` and `co-host` can be assigned
    pub fn into_change(self) -> Result<(i64, MembershipStatus), AppError> {
        let status = match self.status.as_deref().map(str::trim) {
            Some("member") => Ok(MembershipStatus::Member),
            Some("co-host") => Ok(MembershipStatus::CoHost),
            Some("pending") => Err("Cannot change a membership status to pending"),
            _ => Err("Status must be 'member' or 'co-host'"),
        };
        let member_id = self.member_id.as_ref().and_then(parse_integer);
        match (member_id, status) {
            (Some(member_id), Ok(status)) => Ok((member_id, status)),
            (member_id, status) => {
                let mut err = AppError::bad_request("Bad Request");
                if member_id.is_none() {
                    err = err.with_error("memberId", "Member id is required");
                }
                if let Err(message) = status {
                    err = err.with_error("status", message);
                }
                Err(err)
            }
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MembershipDTO {
    pub id: i64,
    pub group_id: i64,
    pub member_id: i64,
    pub status: MembershipStatus,
}

impl From<Membership> for MembershipDTO {
    fn from(value: Membership) -> Self {
        Self {
            id: value.id,
            group_id: value.group_id,
            member_id: value.user_id,
            status: value.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(json: &str) -> Result<(i64, MembershipStatus), AppError> {
        serde_json::from_str::<ChangeMembershipDTO>(json)
            .unwrap()
            .into_change()
    }

    #[test]
    fn test_change_to_pending_rejected() {
        let err = change(r#"{"memberId": 3, "status": "pending"}"#).unwrap_err();
        assert_eq!(
            err.errors().unwrap().get("status").unwrap(),
            "Cannot change a membership status to pending"
        );
    }

    #[test]
    fn test_change_accepts_cohost() {
        assert_eq!(
            change(r#"{"memberId": 3, "status": "co-host"}"#).unwrap(),
            (3, MembershipStatus::CoHost)
        );
        assert!(change(r#"{"status": "member"}"#).is_err());
        assert!(change(r#"{"memberId": 3, "status": "host"}"#).is_err());
    }

    #[test]
    fn test_member_id_as_string() {
        assert_eq!(
            change(r#"{"memberId": "4", "status": "member"}"#).unwrap(),
            (4, MembershipStatus::Member)
        );
        let err = change(r#"{"memberId": "bob", "status": "member"}"#).unwrap_err();
        assert_eq!(
            err.errors().unwrap().get("memberId").unwrap(),
            "Member id is required"
        );
    }
}
