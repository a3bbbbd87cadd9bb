//! Attendance DTOs

use super::common::parse_integer;
use crate::core::AppError;
use crate::entities::{Attendance, AttendanceStatus, EventAttendee};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Debug)]
pub struct AttendanceStatusDTO {
    pub status: AttendanceStatus,
}

/// Entry of `GET /events/{id}/attendees`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeDTO {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "Attendance")]
    pub attendance: AttendanceStatusDTO,
}

impl From<EventAttendee> for AttendeeDTO {
    fn from(value: EventAttendee) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            attendance: AttendanceStatusDTO {
                status: value.status,
            },
        }
    }
}

#[derive(Serialize, Debug)]
pub struct AttendeesDTO {
    #[serde(rename = "Attendees")]
    pub attendees: Vec<AttendeeDTO>,
}

#[derive(Debug, Clone)]
pub struct CreateAttendanceDTO {
    pub event_id: i64,
    pub user_id: i64,
    pub status: AttendanceStatus,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequestDTO {
    pub user_id: i64,
    pub status: AttendanceStatus,
}

/// Body of `PUT /events/{id}/attendance`
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAttendanceDTO {
    /// Integer, or its string form
    pub user_id: Option<Value>,
    pub status: Option<String>,
}

impl ChangeAttendanceDTO {
    pub fn into_change(self) -> Result<(i64, AttendanceStatus), AppError> {
        let status = match self.status.as_deref().map(str::trim) {
            Some("attending") => Ok(AttendanceStatus::Attending),
            Some("waitlist") => Ok(AttendanceStatus::Waitlist),
            Some("pending") => Err("Cannot change an attendance status to pending"),
            _ => Err("Status must be 'attending' or 'waitlist'"),
        };
        let user_id = self.user_id.as_ref().and_then(parse_integer);
        match (user_id, status) {
            (Some(user_id), Ok(status)) => Ok((user_id, status)),
            (user_id, status) => {
                let mut err = AppError::bad_request("Bad Request");
                if user_id.is_none() {
                    err = err.with_error("userId", "User id is required");
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
pub struct AttendanceDTO {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: AttendanceStatus,
}

impl From<Attendance> for AttendanceDTO {
    fn from(value: Attendance) -> Self {
        Self {
            id: value.id,
            event_id: value.event_id,
            user_id: value.user_id,
            status: value.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_to_pending_rejected() {
        let body: ChangeAttendanceDTO =
            serde_json::from_str(r#"{"userId": 2, "status": "pending"}"#).unwrap();
        let err = body.into_change().unwrap_err();
        assert_eq!(
            err.errors().unwrap().get("status").unwrap(),
            "Cannot change an attendance status to pending"
        );
    }

    #[test]
    fn test_user_id_as_string() {
        let body: ChangeAttendanceDTO =
            serde_json::from_str(r#"{"userId": "3", "status": "waitlist"}"#).unwrap();
        assert_eq!(body.into_change().unwrap(), (3, AttendanceStatus::Waitlist));

        let body: ChangeAttendanceDTO =
            serde_json::from_str(r#"{"userId": [3], "status": "waitlist"}"#).unwrap();
        let err = body.into_change().unwrap_err();
        assert_eq!(err.errors().unwrap().get("userId").unwrap(), "User id is required");
    }

    #[test]
    fn test_attendee_shape() {
        let attendee = AttendeeDTO::from(EventAttendee {
            id: 3,
            first_name: "Carol".into(),
            last_name: "Chen".into(),
            status: AttendanceStatus::Waitlist,
        });
        let json = serde_json::to_value(attendee).unwrap();
        assert_eq!(json["firstName"], "Carol");
        assert_eq!(json["Attendance"]["status"], "waitlist");
    }
}
