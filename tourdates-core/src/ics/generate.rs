//! ICS payload generation for a single show.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};
use uuid::Uuid;

use crate::error::{TourError, TourResult};
use crate::tour::DEFAULT_ARTIST;
use crate::tour_date::TourDate;

const ICS_DATETIME_UTC: &str = "%Y%m%dT%H%M%SZ";

pub const DEFAULT_UID_DOMAIN: &str = "misterbounce";

/// Produces the random part of an event UID.
pub trait UidSource {
    fn next_uid(&self) -> String;
}

/// v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUid;

impl UidSource for RandomUid {
    fn next_uid(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> UidSource for F
where
    F: Fn() -> String,
{
    fn next_uid(&self) -> String {
        self()
    }
}

/// How a show maps onto a calendar event.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub artist: String,
    /// Zone the doors time is read in
    pub timezone: Tz,
    pub doors: NaiveTime,
    pub set_length: Duration,
    pub uid_domain: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            artist: DEFAULT_ARTIST.to_string(),
            timezone: Tz::UTC,
            doors: NaiveTime::from_hms_opt(21, 0, 0).unwrap_or_default(),
            set_length: Duration::minutes(150),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
        }
    }
}

/// Turns tour dates into single-event calendar files.
#[derive(Debug, Clone)]
pub struct EventFormatter<U = RandomUid> {
    settings: ExportSettings,
    uids: U,
}

impl EventFormatter<RandomUid> {
    pub fn new(settings: ExportSettings) -> Self {
        Self::with_uid_source(settings, RandomUid)
    }
}

impl<U: UidSource> EventFormatter<U> {
    pub fn with_uid_source(settings: ExportSettings, uids: U) -> Self {
        EventFormatter { settings, uids }
    }

    /// Start and end of the show in UTC.
    pub fn event_window(&self, date: &TourDate) -> TourResult<(DateTime<Utc>, DateTime<Utc>)> {
        let day = date.calendar_date()?;
        let local = day.and_time(self.settings.doors);

        // Ambiguous local times resolve to the earlier instant; skipped ones have no start
        let start = self
            .settings
            .timezone
            .from_local_datetime(&local)
            .earliest()
            .ok_or_else(|| TourError::InvalidDate(date.date.clone()))?
            .with_timezone(&Utc);

        Ok((start, start + self.settings.set_length))
    }

    /// Build the calendar payload for `date`, stamped at `now`.
    pub fn format(&self, date: &TourDate, now: DateTime<Utc>) -> TourResult<String> {
        let (start, end) = self.event_window(date)?;

        let mut cal = Calendar::new();

        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@{}", self.uids.next_uid(), self.settings.uid_domain));
        ics_event.add_property("DTSTAMP", now.format(ICS_DATETIME_UTC).to_string());
        ics_event.add_property("DTSTART", start.format(ICS_DATETIME_UTC).to_string());
        ics_event.add_property("DTEND", end.format(ICS_DATETIME_UTC).to_string());
        ics_event.summary(&format!("{} — {}", date.venue, self.settings.artist));
        ics_event.location(&format!("{}, {}", date.city, date.country));

        cal.push(ics_event.done());

        let output = replace_prodid(&cal.to_string(), &self.prodid_line()?);

        tracing::debug!(date = %date.date, city = %date.city, "formatted calendar event");
        Ok(output)
    }

    fn prodid_line(&self) -> TourResult<String> {
        let prodid = format!("-//{}//Tour Dates//EN", self.settings.artist);
        Property::new("PRODID", prodid)
            .try_into()
            .map_err(|e: std::fmt::Error| TourError::Export(e.to_string()))
    }
}

/// Swap the icalendar crate's own PRODID for `prodid_line`, which is already
/// a complete CRLF-terminated content line.
fn replace_prodid(ics: &str, prodid_line: &str) -> String {
    let mut result = String::with_capacity(ics.len() + prodid_line.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(prodid_line);
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::inspect_ics;
    use crate::tour::Tour;
    use crate::tour_date::TourStatus;

    fn london_settings() -> ExportSettings {
        ExportSettings {
            timezone: chrono_tz::Europe::London,
            ..ExportSettings::default()
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 1, 9, 30, 0).unwrap()
    }

    fn fixed_uid() -> String {
        "00000000-0000-4000-8000-000000000001".to_string()
    }

    fn show(date: &str, city: &str, country: &str, venue: &str) -> TourDate {
        TourDate::new(date, city, country, venue, TourStatus::Tickets, "#contact")
    }

    #[test]
    fn london_show_in_winter_is_utc() {
        let tour = Tour::builtin();
        let formatter = EventFormatter::with_uid_source(london_settings(), fixed_uid);

        let ics = formatter.format(&tour.dates()[0], fixed_now()).unwrap();
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(
            lines,
            [
                "BEGIN:VCALENDAR",
                "VERSION:2.0",
                "PRODID:-//Mister Bounce//Tour Dates//EN",
                "CALSCALE:GREGORIAN",
                "BEGIN:VEVENT",
                "DTEND:20250118T233000Z",
                "DTSTAMP:20241201T093000Z",
                "DTSTART:20250118T210000Z",
                "LOCATION:London\\, UK",
                "SUMMARY:Studio Night (Soho) — Mister Bounce",
                "UID:00000000-0000-4000-8000-000000000001@misterbounce",
                "END:VEVENT",
                "END:VCALENDAR",
                "",
            ]
        );
    }

    #[test]
    fn summer_show_shifts_by_offset() {
        let date = show("2025-07-12", "Amsterdam", "NL", "Canal Club");
        let settings = ExportSettings {
            timezone: chrono_tz::Europe::Amsterdam,
            ..ExportSettings::default()
        };
        let formatter = EventFormatter::with_uid_source(settings, fixed_uid);

        let ics = formatter.format(&date, fixed_now()).unwrap();
        assert!(ics.contains("\r\nDTSTART:20250712T190000Z\r\n"), "{}", ics);
        assert!(ics.contains("\r\nDTEND:20250712T213000Z\r\n"), "{}", ics);
    }

    #[test]
    fn invalid_date_aborts() {
        let date = show("2025-02-29", "Leeds", "UK", "Brudenell");
        let formatter = EventFormatter::with_uid_source(london_settings(), fixed_uid);

        let err = formatter.format(&date, fixed_now()).unwrap_err();
        assert!(matches!(err, TourError::InvalidDate(ref d) if d == "2025-02-29"));
    }

    #[test]
    fn doors_in_skipped_hour_are_invalid() {
        // Clocks in London jump from 01:00 to 02:00 on 2025-03-30
        let settings = ExportSettings {
            doors: NaiveTime::from_hms_opt(2, 30, 0).unwrap(),
            ..london_settings()
        };
        let formatter = EventFormatter::with_uid_source(settings, fixed_uid);
        let date = show("2025-03-30", "Leeds", "UK", "Brudenell");

        let err = formatter.format(&date, fixed_now()).unwrap_err();
        assert!(matches!(err, TourError::InvalidDate(ref d) if d == "2025-03-30"));
    }

    #[test]
    fn doors_in_repeated_hour_use_earlier_instant() {
        // 01:00-02:00 happens twice in London on 2025-10-26, first in BST
        let settings = ExportSettings {
            doors: NaiveTime::from_hms_opt(1, 30, 0).unwrap(),
            ..london_settings()
        };
        let formatter = EventFormatter::with_uid_source(settings, fixed_uid);
        let date = show("2025-10-26", "Leeds", "UK", "Brudenell");

        let (start, end) = formatter.event_window(&date).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 10, 26, 0, 30, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 10, 26, 3, 0, 0).unwrap());

        let ics = formatter.format(&date, fixed_now()).unwrap();
        assert!(ics.contains("\r\nDTSTART:20251026T003000Z\r\n"), "{}", ics);
    }

    #[test]
    fn special_characters_are_escaped() {
        let date = show("2025-04-05", "Bristol; Harbourside", "UK", "Thekla, Lower Deck \\ Bar");
        let formatter = EventFormatter::with_uid_source(london_settings(), fixed_uid);

        let ics = formatter.format(&date, fixed_now()).unwrap();
        assert!(ics.contains("SUMMARY:Thekla\\, Lower Deck \\\\ Bar — Mister Bounce\r\n"), "{}", ics);
        assert!(ics.contains("LOCATION:Bristol\\; Harbourside\\, UK\r\n"), "{}", ics);

        let event = inspect_ics(&ics).unwrap();
        assert_eq!(event.summary, "Thekla, Lower Deck \\ Bar — Mister Bounce");
        assert_eq!(event.location.as_deref(), Some("Bristol; Harbourside, UK"));
    }

    #[test]
    fn artist_is_written_into_prodid() {
        let settings = ExportSettings {
            artist: "The Bouncers".to_string(),
            ..london_settings()
        };
        let formatter = EventFormatter::with_uid_source(settings, fixed_uid);

        let ics = formatter.format(&Tour::builtin().dates()[0], fixed_now()).unwrap();
        assert!(ics.contains("\r\nPRODID:-//The Bouncers//Tour Dates//EN\r\n"), "{}", ics);
        assert!(!ics.contains("ICALENDAR-RS"));
    }

    #[test]
    fn random_uids_differ() {
        let tour = Tour::builtin();
        let formatter = EventFormatter::new(ExportSettings::default());
        let date = &tour.dates()[1];

        let uid = |ics: &str| {
            ics.lines()
                .find(|l| l.starts_with("UID:"))
                .map(str::to_string)
                .unwrap()
        };
        let first = formatter.format(date, fixed_now()).unwrap();
        let second = formatter.format(date, fixed_now()).unwrap();

        assert_ne!(uid(&first), uid(&second));
        assert!(uid(&first).ends_with("@misterbounce"));
    }

    #[test]
    fn long_lines_fold_at_75_octets() {
        let venue = "é".repeat(60);
        let date = show("2025-05-02", "Lyon", "FR", &venue);
        let formatter = EventFormatter::with_uid_source(london_settings(), fixed_uid);

        let ics = formatter.format(&date, fixed_now()).unwrap();
        for line in ics.split("\r\n") {
            assert!(line.len() <= 75, "{} octets: {}", line.len(), line);
        }
        assert!(ics.contains("\r\n "), "{}", ics);

        let event = inspect_ics(&ics).unwrap();
        assert_eq!(event.summary, format!("{} — Mister Bounce", venue));
    }
}
