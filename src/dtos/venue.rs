//! Venue DTOs

use super::common::parse_number;
use crate::core::{AppError, error::validation_messages};
use crate::entities::Venue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

#[derive(Deserialize, Debug, Validate)]
pub struct VenueBodyDTO {
    #[validate(
        required(message = "Street address is required"),
        length(min = 1, message = "Street address is required")
    )]
    pub address: Option<String>,

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

    pub lat: Option<Value>,

    pub lng: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct VenueDataDTO {
    pub address: String,
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
}

impl VenueBodyDTO {
    pub fn into_data(self) -> Result<VenueDataDTO, AppError> {
        let mut errors: BTreeMap<String, String> = match self.validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => validation_messages(&e),
        };

        let lat = coordinate(self.lat.as_ref(), 90.0);
        if lat.is_none() {
            errors.insert("lat".into(), "Latitude must be within -90 and 90".into());
        }
        let lng = coordinate(self.lng.as_ref(), 180.0);
        if lng.is_none() {
            errors.insert("lng".into(), "Longitude must be within -180 and 180".into());
        }

        if !errors.is_empty() {
            return Err(AppError::bad_request("Bad Request").with_errors(errors));
        }

        match (self.address, self.city, self.state, lat, lng) {
            (Some(address), Some(city), Some(state), Some(lat), Some(lng)) => Ok(VenueDataDTO {
                address: address.trim().to_string(),
                city: city.trim().to_string(),
                state: state.trim().to_string(),
                lat,
                lng,
            }),
            _ => Err(AppError::bad_request("Bad Request")),
        }
    }
}

/// Number within `-bound..=bound`
fn coordinate(value: Option<&Value>, bound: f64) -> Option<f64> {
    value
        .and_then(parse_number)
        .filter(|v| (-bound..=bound).contains(v))
}

#[derive(Debug, Clone)]
pub struct CreateVenueDTO {
    pub group_id: i64,
    pub data: VenueDataDTO,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VenueDTO {
    pub id: i64,
    pub group_id: i64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<Venue> for VenueDTO {
    fn from(value: Venue) -> Self {
        Self {
            id: value.id,
            group_id: value.group_id,
            address: value.address,
            city: value.city,
            state: value.state,
            lat: value.lat,
            lng: value.lng,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct VenueListDTO {
    #[serde(rename = "Venues")]
    pub venues: Vec<VenueDTO>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_out_of_range() {
        let body: VenueBodyDTO = serde_json::from_str(
            r#"{"address": "123 Disney Lane", "city": "New York", "state": "NY", "lat": 91.5, "lng": -190}"#,
        )
        .unwrap();
        let err = body.into_data().unwrap_err();
        let errors = err.errors().unwrap();
        assert_eq!(errors.get("lat").unwrap(), "Latitude must be within -90 and 90");
        assert_eq!(errors.get("lng").unwrap(), "Longitude must be within -180 and 180");
        assert!(errors.get("address").is_none());
    }

    #[test]
    fn test_coordinates_as_strings() {
        let body: VenueBodyDTO = serde_json::from_str(
            r#"{"address": "123 Disney Lane", "city": "New York", "state": "NY", "lat": "37.7645", "lng": "-122.473"}"#,
        )
        .unwrap();
        let data = body.into_data().unwrap();
        assert!((data.lat - 37.7645).abs() < 1e-9);
        assert!((data.lng + 122.473).abs() < 1e-9);

        let body: VenueBodyDTO = serde_json::from_str(
            r#"{"address": "123 Disney Lane", "city": "New York", "state": "NY", "lat": "abc", "lng": 10}"#,
        )
        .unwrap();
        let err = body.into_data().unwrap_err();
        let errors = err.errors().unwrap();
        assert_eq!(errors.get("lat").unwrap(), "Latitude must be within -90 and 90");
        assert!(errors.get("lng").is_none());
    }
}
