//! Tour date records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TourError, TourResult};

/// Label shown on a date's primary action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TourStatus {
    #[serde(rename = "Tickets")]
    Tickets,
    #[serde(rename = "Guest List")]
    GuestList,
    #[serde(rename = "Announced")]
    Announced,
}

impl TourStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TourStatus::Tickets => "Tickets",
            TourStatus::GuestList => "Guest List",
            TourStatus::Announced => "Announced",
        }
    }
}

impl fmt::Display for TourStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single show on the tour.
///
/// `date` is kept as the ISO string it was written with; ordering compares
/// those strings directly, which matches calendar order for zero-padded
/// `YYYY-MM-DD` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TourDate {
    pub date: String,
    pub city: String,
    pub country: String,
    pub venue: String,
    pub status: TourStatus,
    pub url: String,
}

impl TourDate {
    pub fn new(
        date: &str,
        city: &str,
        country: &str,
        venue: &str,
        status: TourStatus,
        url: &str,
    ) -> Self {
        TourDate {
            date: date.to_string(),
            city: city.to_string(),
            country: country.to_string(),
            venue: venue.to_string(),
            status,
            url: url.to_string(),
        }
    }

    /// Parse `date` as a calendar date.
    pub fn calendar_date(&self) -> TourResult<NaiveDate> {
        parse_iso_date(&self.date)
    }
}

impl fmt::Display for TourDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} — {}", self.date, self.city, self.venue)
    }
}

/// Parse a strict `YYYY-MM-DD` string.
pub fn parse_iso_date(s: &str) -> TourResult<NaiveDate> {
    // chrono accepts unpadded fields, which would break string ordering
    if s.len() != 10 {
        return Err(TourError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| TourError::InvalidDate(s.to_string()))
}
