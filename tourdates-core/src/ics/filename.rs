//! Export filenames.

use slug::slugify;

use crate::tour_date::TourDate;

/// `<artist-slug>-<city-slug>-<date>.ics`, e.g. `mister-bounce-london-2025-01-18.ics`
///
/// Slugs are ASCII only: punctuation is dropped and accents are stripped
/// (`St. Albans` -> `st-albans`, `Zürich` -> `zurich`) so names are safe on
/// any filesystem.
pub fn export_filename(artist: &str, date: &TourDate) -> String {
    format!("{}-{}-{}.ics", slugify(artist), slugify(&date.city), date.date)
}
