//! TUI rendering traits for tourdates types.
//!
//! Extension traits that add colored terminal rendering to the display
//! records from tourdates-core using owo_colors.

use owo_colors::OwoColorize;
use tourdates_core::listing::Placeholder;
use tourdates_core::{FilterButton, TourCard, TourListing};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for TourCard {
    fn render(&self) -> String {
        let badge = format!("{} {:>2}", self.month.to_uppercase(), self.day);

        let lines = [
            format!("{}  {}", badge.bold(), self.heading.bold()),
            format!("        {} • {}", self.long_date.dimmed(), self.country),
            format!(
                "        {} {}   {} {}",
                self.action.label.cyan(),
                format!("({})", self.action.href).dimmed(),
                self.calendar.label.green(),
                format!("(tourdates export {})", self.calendar.date).dimmed()
            ),
        ];

        lines.join("\n")
    }
}

impl Render for Placeholder {
    fn render(&self) -> String {
        format!("{} {}", self.title.bold(), self.detail.dimmed())
    }
}

impl Render for TourListing {
    fn render(&self) -> String {
        match self {
            TourListing::Empty(placeholder) => placeholder.render(),
            TourListing::Cards(cards) => cards
                .iter()
                .map(Render::render)
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

impl Render for FilterButton {
    fn render(&self) -> String {
        if self.pressed {
            format!("[{}]", self.label).bold().to_string()
        } else {
            format!(" {} ", self.label).dimmed().to_string()
        }
    }
}

/// The filter bar on one line, e.g. `[All]  UK   Europe `
pub fn render_filter_bar(buttons: &[FilterButton]) -> String {
    buttons
        .iter()
        .map(Render::render)
        .collect::<Vec<_>>()
        .join(" ")
}
