//! The tour dataset.

use crate::error::TourResult;
use crate::tour_date::{TourDate, TourStatus};

pub const DEFAULT_ARTIST: &str = "Mister Bounce";

/// An artist and their read-only list of shows.
///
/// Built once and never mutated. Filtering and sorting borrow from it and
/// produce new sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    artist: String,
    dates: Vec<TourDate>,
}

impl Tour {
    /// Build a tour, checking that every date parses.
    pub fn new(artist: &str, dates: Vec<TourDate>) -> TourResult<Self> {
        for date in &dates {
            date.calendar_date()?;
        }

        Ok(Tour {
            artist: artist.to_string(),
            dates,
        })
    }

    /// The dataset shipped with the site.
    pub fn builtin() -> Self {
        Tour {
            artist: DEFAULT_ARTIST.to_string(),
            dates: builtin_dates(),
        }
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// All dates in definition order.
    pub fn dates(&self) -> &[TourDate] {
        &self.dates
    }
}

fn builtin_dates() -> Vec<TourDate> {
    vec![
        TourDate::new(
            "2025-01-18",
            "London",
            "UK",
            "Studio Night (Soho)",
            TourStatus::Tickets,
            "#contact",
        ),
        TourDate::new(
            "2025-02-01",
            "Manchester",
            "UK",
            "Warehouse Sessions",
            TourStatus::Tickets,
            "#contact",
        ),
        TourDate::new(
            "2025-02-22",
            "Birmingham",
            "UK",
            "Late Night Grooves",
            TourStatus::GuestList,
            "#contact",
        ),
        TourDate::new(
            "2025-03-08",
            "Amsterdam",
            "NL",
            "Canal Club",
            TourStatus::Announced,
            "#contact",
        ),
    ]
}
