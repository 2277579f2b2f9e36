//! Tour listing renderer.
//!
//! Turns the dataset and a filter into plain display records. Turning those
//! records into terminal output or HTML is left to the caller.

use serde::Serialize;

use crate::error::TourResult;
use crate::filter::TourFilter;
use crate::ics::export_filename;
use crate::tour::Tour;
use crate::tour_date::TourDate;

const EMPTY_TITLE: &str = "No dates in this filter yet.";
const EMPTY_DETAIL: &str = "Check back soon.";

/// Shows that pass `filter`, sorted by date.
pub fn visible_dates(tour: &Tour, filter: TourFilter) -> Vec<&TourDate> {
    visible_entries(tour, filter)
        .into_iter()
        .map(|(_, date)| date)
        .collect()
}

/// Like [`visible_dates`], keeping each show's position in the dataset.
fn visible_entries(tour: &Tour, filter: TourFilter) -> Vec<(usize, &TourDate)> {
    let mut visible: Vec<_> = tour
        .dates()
        .iter()
        .enumerate()
        .filter(|(_, d)| filter.matches(d))
        .collect();
    visible.sort_by(|(_, a), (_, b)| a.date.cmp(&b.date));
    visible
}

/// Build the listing for `filter`. Each call recomputes everything.
pub fn render(tour: &Tour, filter: TourFilter) -> TourResult<TourListing> {
    let visible = visible_entries(tour, filter);
    tracing::debug!(filter = %filter, count = visible.len(), "rendering tour listing");

    if visible.is_empty() {
        return Ok(TourListing::Empty(Placeholder::default()));
    }

    let cards = visible
        .into_iter()
        .map(|(index, date)| TourCard::build(tour.artist(), index, date))
        .collect::<TourResult<Vec<_>>>()?;

    Ok(TourListing::Cards(cards))
}

/// What the tour section shows for one filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum TourListing {
    Empty(Placeholder),
    Cards(Vec<TourCard>),
}

impl TourListing {
    pub fn cards(&self) -> &[TourCard] {
        match self {
            TourListing::Empty(_) => &[],
            TourListing::Cards(cards) => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TourListing::Empty(_))
    }
}

/// Shown in place of cards when a filter matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub title: String,
    pub detail: String,
}

impl Default for Placeholder {
    fn default() -> Self {
        Placeholder {
            title: EMPTY_TITLE.to_string(),
            detail: EMPTY_DETAIL.to_string(),
        }
    }
}

/// Display record for one show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourCard {
    /// Abbreviated month, e.g. "Jan"
    pub month: String,
    /// Day of month without padding
    pub day: u32,
    pub city: String,
    pub venue: String,
    /// "<city> — <venue>"
    pub heading: String,
    /// e.g. "Saturday, January 18, 2025"
    pub long_date: String,
    pub country: String,
    pub action: ActionLink,
    pub calendar: CalendarAction,
}

/// The primary link on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionLink {
    pub label: String,
    pub href: String,
    pub aria_label: String,
}

/// The "Add to Calendar" action on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarAction {
    pub label: &'static str,
    /// Position of the show in [`Tour::dates`]
    pub index: usize,
    pub date: String,
    pub filename: String,
}

impl TourCard {
    fn build(artist: &str, index: usize, date: &TourDate) -> TourResult<Self> {
        use chrono::Datelike;

        let day = date.calendar_date()?;

        Ok(TourCard {
            month: day.format("%b").to_string(),
            day: day.day(),
            city: date.city.clone(),
            venue: date.venue.clone(),
            heading: format!("{} — {}", date.city, date.venue),
            long_date: day.format("%A, %B %-d, %Y").to_string(),
            country: date.country.clone(),
            action: ActionLink {
                label: date.status.label().to_string(),
                href: date.url.clone(),
                aria_label: format!("{} for {}", date.status, date.city),
            },
            calendar: CalendarAction {
                label: "Add to Calendar",
                index,
                date: date.date.clone(),
                filename: export_filename(artist, date),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TourError;
    use crate::tour_date::TourStatus;

    #[test]
    fn london_card_fields() {
        let tour = Tour::builtin();
        let listing = render(&tour, TourFilter::All).unwrap();
        let card = &listing.cards()[0];

        assert_eq!(card.month, "Jan");
        assert_eq!(card.day, 18);
        assert_eq!(card.heading, "London — Studio Night (Soho)");
        assert_eq!(card.long_date, "Saturday, January 18, 2025");
        assert_eq!(card.country, "UK");
        assert_eq!(card.action.label, "Tickets");
        assert_eq!(card.action.href, "#contact");
        assert_eq!(card.action.aria_label, "Tickets for London");
        assert_eq!(card.calendar.index, 0);
        assert_eq!(card.calendar.date, "2025-01-18");
        assert_eq!(card.calendar.filename, "mister-bounce-london-2025-01-18.ics");
    }

    #[test]
    fn sorts_regardless_of_definition_order() {
        let mut dates = Tour::builtin().dates().to_vec();
        dates.reverse();
        let tour = Tour::new("Mister Bounce", dates).unwrap();

        let order: Vec<_> = visible_dates(&tour, TourFilter::All)
            .iter()
            .map(|d| d.date.as_str())
            .collect();
        assert_eq!(order, ["2025-01-18", "2025-02-01", "2025-02-22", "2025-03-08"]);
        // The dataset itself is untouched
        assert_eq!(tour.dates()[0].date, "2025-03-08");
    }

    #[test]
    fn same_day_shows_keep_their_own_actions() {
        let tour = Tour::new(
            "Mister Bounce",
            vec![
                TourDate::new("2025-05-01", "Leeds", "UK", "Brudenell", TourStatus::Tickets, "#"),
                TourDate::new("2025-05-01", "Paris", "FR", "La Cigale", TourStatus::Announced, "#"),
            ],
        )
        .unwrap();

        let listing = render(&tour, TourFilter::All).unwrap();
        let actions: Vec<_> = listing
            .cards()
            .iter()
            .map(|c| (c.calendar.index, c.calendar.filename.as_str()))
            .collect();
        assert_eq!(
            actions,
            [
                (0, "mister-bounce-leeds-2025-05-01.ics"),
                (1, "mister-bounce-paris-2025-05-01.ics"),
            ]
        );

        let eu = render(&tour, TourFilter::Eu).unwrap();
        assert_eq!(eu.cards()[0].calendar.index, 1);
    }

    #[test]
    fn empty_result_is_a_placeholder() {
        let only_uk = Tour::builtin()
            .dates()
            .iter()
            .filter(|d| d.country == "UK")
            .cloned()
            .collect();
        let tour = Tour::new("Mister Bounce", only_uk).unwrap();

        let listing = render(&tour, TourFilter::Eu).unwrap();
        assert!(listing.is_empty());
        assert!(listing.cards().is_empty());
        assert_eq!(listing, TourListing::Empty(Placeholder::default()));
    }

    #[test]
    fn card_for_bad_date_fails() {
        let bad = TourDate::new("2025-13-01", "Paris", "FR", "Nowhere", TourStatus::Announced, "#");
        assert!(matches!(
            TourCard::build("Mister Bounce", 0, &bad),
            Err(TourError::InvalidDate(_))
        ));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let tour = Tour::builtin();
        let listing = render(&tour, TourFilter::Eu).unwrap();
        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["kind"], "cards");
        assert_eq!(json["items"][0]["city"], "Amsterdam");
        assert_eq!(json["items"][0]["action"]["label"], "Announced");
    }
}
