//! Group DTOs - request validation and the three response shapes
//! (plain group, list entry, details page)

use super::{common::parse_bool, datetime, image::ImageDTO, venue::VenueDTO};
use crate::core::{AppError, error::validation_messages};
use crate::entities::{Group, GroupSummary, MeetingType, User};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

/// Body of `POST /groups` and `PUT /groups/{id}`
#[derive(Deserialize, Debug, Validate)]
pub struct GroupBodyDTO {
    #[validate(
        required(message = "Name is required"),
        custom(function = "validate_group_name")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Description must be at least 30 characters long"),
        length(min = 30, message = "Description must be at least 30 characters long")
    )]
    pub about: Option<String>,

    #[serde(rename = "type")]
    #[validate(
        required(message = "Group Type is required"),
        custom(function = "validate_meeting_type", message = "Group Type is required")
    )]
    pub kind: Option<String>,

    /// Boolean, or its string form
    pub private: Option<Value>,

    #[validate(
        required(message = "City is required"),
        length(min = 1, message = "City is required")
    )]
    pub city: Option<String>,

    #[validate(
        required(message = "State is required"),
        length(min = 1, message = "State is required")
    )]
    pub state: Option<String>,
}

fn validate_group_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("Name is required".into()));
    }
    if name.chars().count() > 60 {
        return Err(ValidationError::new("length")
            .with_message("Name must be 60 characters or less".into()));
    }
    Ok(())
}

pub fn validate_meeting_type(value: &str) -> Result<(), ValidationError> {
    match value {
        "Online" | "In person" => Ok(()),
        _ => Err(ValidationError::new("type")),
    }
}

/// Validated group columns, shared by create and update
#[derive(Debug, Clone)]
pub struct GroupDataDTO {
    pub name: String,
    pub about: String,
    pub kind: MeetingType,
    pub private: bool,
    pub city: String,
    pub state: String,
}

impl GroupBodyDTO {
    pub fn into_data(self) -> Result<GroupDataDTO, AppError> {
        let mut errors: BTreeMap<String, String> = match self.validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => validation_messages(&e),
        };

        let private = self.private.as_ref().and_then(parse_bool);
        if private.is_none() {
            errors.insert("private".into(), "Visibility Type is required".into());
        }

        if !errors.is_empty() {
            return Err(AppError::bad_request("Bad Request").with_errors(errors));
        }

        let kind = self.kind.as_deref().and_then(|k| k.parse().ok());
        match (self.name, self.about, kind, private, self.city, self.state) {
            (Some(name), Some(about), Some(kind), Some(private), Some(city), Some(state)) => {
                Ok(GroupDataDTO {
                    name: name.trim().to_string(),
                    about,
                    kind,
                    private,
                    city: city.trim().to_string(),
                    state: state.trim().to_string(),
                })
            }
            _ => Err(AppError::bad_request("Bad Request")),
        }
    }
}

/// New group row: validated data plus the organizer
#[derive(Debug, Clone)]
pub struct CreateGroupDTO {
    pub organizer_id: i64,
    pub data: GroupDataDTO,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GroupDTO {
    pub id: i64,
    pub organizer_id: i64,
    pub name: String,
    pub about: String,
    #[serde(rename = "type")]
    pub kind: MeetingType,
    pub private: bool,
    pub city: String,
    pub state: String,
    #[serde(serialize_with = "datetime::serialize")]
    pub created_at: NaiveDateTime,
    #[serde(serialize_with = "datetime::serialize")]
    pub updated_at: NaiveDateTime,
}

impl From<Group> for GroupDTO {
    fn from(value: Group) -> Self {
        Self {
            id: value.id,
            organizer_id: value.organizer_id,
            name: value.name,
            about: value.about,
            kind: value.kind,
            private: value.private,
            city: value.city,
            state: value.state,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Entry of `GET /groups`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummaryDTO {
    #[serde(flatten)]
    pub group: GroupDTO,
    pub num_members: i64,
    pub preview_image: Option<String>,
}

impl From<GroupSummary> for GroupSummaryDTO {
    fn from(value: GroupSummary) -> Self {
        Self {
            group: GroupDTO::from(value.group),
            num_members: value.num_members,
            preview_image: value.preview_image,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct GroupListDTO {
    #[serde(rename = "Groups")]
    pub groups: Vec<GroupSummaryDTO>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerDTO {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for OrganizerDTO {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

/// Body of `GET /groups/{id}`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetailsDTO {
    #[serde(flatten)]
    pub group: GroupDTO,
    pub num_members: i64,
    #[serde(rename = "GroupImages")]
    pub group_images: Vec<ImageDTO>,
    #[serde(rename = "Organizer")]
    pub organizer: Option<OrganizerDTO>,
    #[serde(rename = "Venues")]
    pub venues: Vec<VenueDTO>,
}
