//! Query DTOs - query string parameters of `GET /events`

use super::datetime;
use crate::core::AppError;
use crate::entities::MeetingType;
use chrono::NaiveDateTime;
use serde::Deserialize;

pub const MAX_PAGE: i64 = 10;
pub const MAX_SIZE: i64 = 20;

/// Raw query parameters; everything arrives as text and empty values count as absent
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventsQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<String>,
}

/// Validated listing filter
#[derive(Debug, Clone, PartialEq)]
pub struct EventFilter {
    pub page: i64,
    pub size: i64,
    pub name: Option<String>,
    pub kind: Option<MeetingType>,
    pub start_date: Option<NaiveDateTime>,
}

impl EventFilter {
    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl EventsQuery {
    pub fn into_filter(self) -> Result<EventFilter, AppError> {
        let mut err = AppError::bad_request("Bad Request");
        let mut invalid = false;

        let page = match present(self.page) {
            None => 1,
            Some(raw) => match raw.parse::<i64>() {
                Ok(page) if page >= 1 => page.min(MAX_PAGE),
                _ => {
                    invalid = true;
                    err = err.with_error("page", "Page must be greater than or equal to 1");
                    1
                }
            },
        };

        let size = match present(self.size) {
            None => MAX_SIZE,
            Some(raw) => match raw.parse::<i64>() {
                Ok(size) if size >= 1 => size.min(MAX_SIZE),
                _ => {
                    invalid = true;
                    err = err.with_error("size", "Size must be greater than or equal to 1");
                    MAX_SIZE
                }
            },
        };

        let kind = match present(self.kind) {
            None => None,
            Some(raw) => match raw.parse::<MeetingType>() {
                Ok(kind) => Some(kind),
                Err(()) => {
                    invalid = true;
                    err = err.with_error("type", "Type must be 'Online' or 'In Person'");
                    None
                }
            },
        };

        let start_date = match present(self.start_date) {
            None => None,
            Some(raw) => match datetime::parse(&raw) {
                Some(date) => Some(date),
                None => {
                    invalid = true;
                    err = err.with_error("startDate", "Start date must be a valid datetime");
                    None
                }
            },
        };

        if invalid {
            return Err(err);
        }

        Ok(EventFilter {
            page,
            size,
            name: present(self.name),
            kind,
            start_date,
        })
    }
}
