use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use tourdates_core::download::{DirectoryTarget, WriterTarget, add_to_calendar};
use tourdates_core::listing::CalendarAction;
use tourdates_core::tour_date::parse_iso_date;
use tourdates_core::{Tour, TourFilter, render};

use crate::context::Context;

/// Which shows to export.
pub enum Selection {
    Date(String),
    Filter(TourFilter),
}

/// Where exported files go.
pub enum Destination {
    Stdout,
    Directory { dir: PathBuf, open: bool },
}

pub fn run(ctx: &Context, selection: Selection, destination: Destination) -> Result<()> {
    let actions = select_actions(&ctx.tour, &selection)?;
    let formatter = ctx.formatter();
    let now = Utc::now();

    match destination {
        Destination::Stdout => {
            let mut target = WriterTarget::new(io::stdout().lock());
            for action in &actions {
                add_to_calendar(&ctx.tour, action, &formatter, &mut target, now)
                    .with_context(|| format!("Could not export {}", action.date))?;
            }
        }
        Destination::Directory { dir, open } => {
            let mut target = DirectoryTarget::new(dir);
            for action in &actions {
                let download = add_to_calendar(&ctx.tour, action, &formatter, &mut target, now)
                    .with_context(|| {
                        format!("Could not save {} to {}", action.filename, target.dir().display())
                    })?;

                let Some(path) = download.path else {
                    continue;
                };
                println!("{}", format!("  Saved: {}", path.display()).green());

                if open {
                    open_file(&path);
                }
            }
        }
    }

    Ok(())
}

/// Calendar actions for the selected shows, in listing order.
fn select_actions(tour: &Tour, selection: &Selection) -> Result<Vec<CalendarAction>> {
    match selection {
        Selection::Date(date) => {
            parse_iso_date(date)?;

            let listing = render(tour, TourFilter::All)?;
            let actions: Vec<_> = listing
                .cards()
                .iter()
                .filter(|card| &card.calendar.date == date)
                .map(|card| card.calendar.clone())
                .collect();

            if actions.is_empty() {
                let available: Vec<_> = listing
                    .cards()
                    .iter()
                    .map(|c| c.calendar.date.as_str())
                    .collect();
                anyhow::bail!("No show on {}. Available: {}", date, available.join(", "));
            }
            Ok(actions)
        }
        Selection::Filter(filter) => {
            let listing = render(tour, *filter)?;
            if listing.is_empty() {
                anyhow::bail!("No dates in the '{}' filter yet.", filter);
            }
            Ok(listing.cards().iter().map(|c| c.calendar.clone()).collect())
        }
    }
}

fn open_file(path: &Path) {
    if let Err(e) = open::that(path) {
        eprintln!(
            "  {}",
            format!("Could not open {}: {}", path.display(), e).red()
        );
    }
}
