//! Listing filters and the control that switches between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TourError, TourResult};
use crate::listing::{TourListing, render};
use crate::tour::Tour;
use crate::tour_date::TourDate;

const HOME_COUNTRY: &str = "UK";

/// Which shows a listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourFilter {
    #[default]
    All,
    Uk,
    Eu,
}

impl TourFilter {
    /// Every filter, in the order the controls are shown.
    pub const ALL: [TourFilter; 3] = [TourFilter::All, TourFilter::Uk, TourFilter::Eu];

    pub fn key(&self) -> &'static str {
        match self {
            TourFilter::All => "all",
            TourFilter::Uk => "uk",
            TourFilter::Eu => "eu",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TourFilter::All => "All",
            TourFilter::Uk => "UK",
            TourFilter::Eu => "Europe",
        }
    }

    pub fn matches(&self, date: &TourDate) -> bool {
        match self {
            TourFilter::All => true,
            TourFilter::Uk => date.country == HOME_COUNTRY,
            TourFilter::Eu => date.country != HOME_COUNTRY,
        }
    }
}

impl fmt::Display for TourFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TourFilter {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        TourFilter::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| TourError::UnknownFilter(s.to_string()))
    }
}

/// One toggle in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterButton {
    pub filter: TourFilter,
    pub label: &'static str,
    pub pressed: bool,
}

/// The filter bar: exactly one filter is active at a time.
///
/// Selecting a filter deactivates the others and re-renders the listing
/// from scratch.
#[derive(Debug, Clone)]
pub struct FilterControl<'a> {
    tour: &'a Tour,
    active: TourFilter,
}

impl<'a> FilterControl<'a> {
    pub fn new(tour: &'a Tour) -> Self {
        Self::with_active(tour, TourFilter::default())
    }

    pub fn with_active(tour: &'a Tour, active: TourFilter) -> Self {
        FilterControl { tour, active }
    }

    pub fn active(&self) -> TourFilter {
        self.active
    }

    pub fn controls(&self) -> Vec<FilterButton> {
        TourFilter::ALL
            .into_iter()
            .map(|filter| FilterButton {
                filter,
                label: filter.label(),
                pressed: filter == self.active,
            })
            .collect()
    }

    /// Make `filter` the active one and render its listing.
    pub fn select(&mut self, filter: TourFilter) -> TourResult<TourListing> {
        tracing::debug!(from = %self.active, to = %filter, "filter selected");
        self.active = filter;
        self.listing()
    }

    /// Like [`select`](Self::select), taking the key a control carries.
    pub fn select_key(&mut self, key: &str) -> TourResult<TourListing> {
        let filter = key.parse()?;
        self.select(filter)
    }

    /// The listing for the active filter.
    pub fn listing(&self) -> TourResult<TourListing> {
        render(self.tour, self.active)
    }
}
