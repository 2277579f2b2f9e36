//! Core types for tourdates.
//!
//! - `Tour` and `TourDate`: the read-only dataset of shows
//! - `listing` and `filter`: display records for a filter, and the filter control
//! - `ics`: single-event calendar files for a show
//! - `download`: handing those files to the user
//! - `tour_config`: configuration file and environment overrides

pub mod download;
pub mod error;
pub mod filter;
pub mod ics;
pub mod listing;
pub mod tour;
pub mod tour_config;
pub mod tour_date;

pub use error::{TourError, TourResult};
pub use filter::{FilterButton, FilterControl, TourFilter};
pub use listing::{TourCard, TourListing, render, visible_dates};
pub use tour::Tour;
pub use tour_date::{TourDate, TourStatus};
