//! Event DTOs - request validation plus the list and details shapes

use super::{common::parse_integer, datetime, group::validate_meeting_type, image::ImageDTO};
use crate::core::{AppError, error::validation_messages};
use crate::entities::{Event, EventSummary, Group, MeetingType, Venue};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

/// Body of `POST /groups/{id}/events` and `PUT /events/{id}`
///
/// `venueId`, `capacity` and `price` are loosely typed: numeric strings are
/// accepted and anything else is reported per field.
#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventBodyDTO {
    pub venue_id: Option<Value>,

    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,

    #[serde(rename = "type")]
    #[validate(
        required(message = "Event Type is required"),
        custom(function = "validate_meeting_type", message = "Event Type is required")
    )]
    pub kind: Option<String>,

    pub capacity: Option<Value>,

    pub price: Option<Value>,

    #[validate(
        required(message = "Description needs 30 or more characters"),
        length(min = 30, message = "Description needs 30 or more characters")
    )]
    pub description: Option<String>,

    #[validate(
        required(message = "Event start is required"),
        length(min = 1, message = "Event start is required")
    )]
    pub start_date: Option<String>,

    #[validate(
        required(message = "Event end is required"),
        length(min = 1, message = "Event end is required")
    )]
    pub end_date: Option<String>,
}

/// Validated event columns, shared by create and update
#[derive(Debug, Clone)]
pub struct EventDataDTO {
    pub venue_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub kind: MeetingType,
    pub capacity: Option<i64>,
    pub price: f64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct CreateEventDTO {
    pub group_id: i64,
    pub data: EventDataDTO,
}

impl EventBodyDTO {
    pub fn into_data(self) -> Result<EventDataDTO, AppError> {
        let mut errors: BTreeMap<String, String> = match self.validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => validation_messages(&e),
        };

        let capacity = match self.capacity.as_ref() {
            None | Some(Value::Null) => None,
            Some(value) => match parse_capacity(value) {
                Some(capacity) => Some(capacity),
                None => {
                    errors.insert("capacity".into(), "Capacity must be an integer".into());
                    None
                }
            },
        };

        let price = self.price.as_ref().and_then(parse_price);
        if price.is_none() {
            errors.insert("price".into(), "Price is required".into());
        }

        let start_date = self.start_date.as_deref().and_then(datetime::parse);
        let end_date = self.end_date.as_deref().and_then(datetime::parse);
        if start_date.is_none() {
            errors
                .entry("startDate".into())
                .or_insert_with(|| "Event start is required".into());
        }
        if end_date.is_none() {
            errors
                .entry("endDate".into())
                .or_insert_with(|| "Event end is required".into());
        }
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end <= start {
                errors.insert("endDate".into(), "End date is less than start date".into());
            }
        }

        if !errors.is_empty() {
            return Err(AppError::bad_request("Bad Request").with_errors(errors));
        }

        // an id that can't name a row is the same as an unknown venue
        let venue_id = match self.venue_id.as_ref() {
            None | Some(Value::Null) => None,
            Some(value) => match parse_integer(value) {
                Some(id) => Some(id),
                None => return Err(AppError::not_found("Venue couldn't be found")),
            },
        };

        let kind = self.kind.as_deref().and_then(|k| k.parse().ok());
        match (self.name, self.description, kind, price, start_date, end_date) {
            (Some(name), Some(description), Some(kind), Some(price), Some(start), Some(end)) => {
                Ok(EventDataDTO {
                    venue_id,
                    name: name.trim().to_string(),
                    description,
                    kind,
                    capacity,
                    price,
                    start_date: start,
                    end_date: end,
                })
            }
            _ => Err(AppError::bad_request("Bad Request")),
        }
    }
}

/// Non-negative whole number, given as a JSON number or a numeric string
fn parse_capacity(value: &Value) -> Option<i64> {
    parse_integer(value).filter(|capacity| *capacity >= 0)
}

/// Non-negative amount with at most two decimal places
fn parse_price(value: &Value) -> Option<f64> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    let price: f64 = text.parse().ok()?;
    if !price.is_finite() || price < 0.0 {
        return None;
    }
    match text.split_once('.') {
        Some((_, decimals)) if decimals.len() > 2 => None,
        _ => Some(price),
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventDTO {
    pub id: i64,
    pub group_id: i64,
    pub venue_id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MeetingType,
    pub capacity: Option<i64>,
    pub price: f64,
    pub description: String,
    #[serde(serialize_with = "datetime::serialize")]
    pub start_date: NaiveDateTime,
    #[serde(serialize_with = "datetime::serialize")]
    pub end_date: NaiveDateTime,
}

impl From<Event> for EventDTO {
    fn from(value: Event) -> Self {
        Self {
            id: value.id,
            group_id: value.group_id,
            venue_id: value.venue_id,
            name: value.name,
            kind: value.kind,
            capacity: value.capacity,
            price: value.price,
            description: value.description,
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct EventGroupDTO {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
}

#[derive(Serialize, Debug)]
pub struct EventVenueDTO {
    pub id: i64,
    pub city: String,
    pub state: String,
}

/// Entry of `GET /events` and `GET /groups/{id}/events`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventSummaryDTO {
    pub id: i64,
    pub group_id: i64,
    pub venue_id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MeetingType,
    #[serde(serialize_with = "datetime::serialize")]
    pub start_date: NaiveDateTime,
    #[serde(serialize_with = "datetime::serialize")]
    pub end_date: NaiveDateTime,
    pub num_attending: i64,
    pub preview_image: Option<String>,
    #[serde(rename = "Group")]
    pub group: EventGroupDTO,
    #[serde(rename = "Venue")]
    pub venue: Option<EventVenueDTO>,
}

impl From<EventSummary> for EventSummaryDTO {
    fn from(value: EventSummary) -> Self {
        let venue = match (value.venue_id, value.venue_city, value.venue_state) {
            (Some(id), Some(city), Some(state)) => Some(EventVenueDTO { id, city, state }),
            _ => None,
        };
        Self {
            id: value.id,
            group_id: value.group_id,
            venue_id: value.venue_id,
            name: value.name,
            kind: value.kind,
            start_date: value.start_date,
            end_date: value.end_date,
            num_attending: value.num_attending,
            preview_image: value.preview_image,
            group: EventGroupDTO {
                id: value.group_id,
                name: value.group_name,
                city: value.group_city,
                state: value.group_state,
            },
            venue,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct EventListDTO {
    #[serde(rename = "Events")]
    pub events: Vec<EventSummaryDTO>,
}

#[derive(Serialize, Debug)]
pub struct EventDetailsGroupDTO {
    pub id: i64,
    pub name: String,
    pub private: bool,
    pub city: String,
    pub state: String,
}

#[derive(Serialize, Debug)]
pub struct EventDetailsVenueDTO {
    pub id: i64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
}

/// Body of `GET /events/{id}`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailsDTO {
    #[serde(flatten)]
    pub event: EventDTO,
    pub num_attending: i64,
    #[serde(rename = "Group")]
    pub group: EventDetailsGroupDTO,
    #[serde(rename = "Venue")]
    pub venue: Option<EventDetailsVenueDTO>,
    #[serde(rename = "EventImages")]
    pub event_images: Vec<ImageDTO>,
}

impl EventDetailsDTO {
    pub fn new(
        event: Event,
        num_attending: i64,
        group: Group,
        venue: Option<Venue>,
        images: Vec<ImageDTO>,
    ) -> Self {
        Self {
            event: EventDTO::from(event),
            num_attending,
            group: EventDetailsGroupDTO {
                id: group.id,
                name: group.name,
                private: group.private,
                city: group.city,
                state: group.state,
            },
            venue: venue.map(|v| EventDetailsVenueDTO {
                id: v.id,
                address: v.address,
                city: v.city,
                state: v.state,
                lat: v.lat,
                lng: v.lng,
            }),
            event_images: images,
        }
    }
}
