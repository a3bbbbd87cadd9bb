//! Image DTOs - shared by group and event images

use crate::core::AppError;
use crate::entities::{EventImage, GroupImage};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Debug, Validate)]
pub struct ImageBodyDTO {
    #[validate(
        required(message = "Url is required"),
        length(min = 1, message = "Url is required")
    )]
    pub url: Option<String>,
    #[serde(default)]
    pub preview: bool,
}

impl ImageBodyDTO {
    /// Returns the validated `(url, preview)` pair
    pub fn into_parts(self) -> Result<(String, bool), AppError> {
        self.validate()?;
        let url = self
            .url
            .ok_or_else(|| AppError::bad_request("Bad Request"))?;
        Ok((url.trim().to_string(), self.preview))
    }
}

#[derive(Debug, Clone)]
pub struct CreateGroupImageDTO {
    pub group_id: i64,
    pub url: String,
    pub preview: bool,
}

#[derive(Debug, Clone)]
pub struct CreateEventImageDTO {
    pub event_id: i64,
    pub url: String,
    pub preview: bool,
}

#[derive(Serialize, Debug)]
pub struct ImageDTO {
    pub id: i64,
    pub url: String,
    pub preview: bool,
}

impl From<GroupImage> for ImageDTO {
    fn from(value: GroupImage) -> Self {
        Self {
            id: value.id,
            url: value.url,
            preview: value.preview,
        }
    }
}

impl From<EventImage> for ImageDTO {
    fn from(value: EventImage) -> Self {
        Self {
            id: value.id,
            url: value.url,
            preview: value.preview,
        }
    }
}
