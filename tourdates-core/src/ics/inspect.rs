//! Read exported payloads back using the icalendar crate's parser.

use chrono::{DateTime, NaiveDateTime, Utc};
use icalendar::parser::{read_calendar, unfold};

use crate::error::{TourError, TourResult};

/// The single event carried by an exported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedEvent {
    pub uid: String,
    pub summary: String,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Parse a calendar payload that must hold exactly one timed UTC event.
pub fn inspect_ics(content: &str) -> TourResult<ExportedEvent> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded)
        .map_err(|e| TourError::Export(format!("Unreadable calendar payload: {}", e)))?;

    let events: Vec<_> = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .collect();
    let [vevent] = events.as_slice() else {
        return Err(TourError::Export(format!(
            "Expected exactly one VEVENT, found {}",
            events.len()
        )));
    };

    let text = |name: &str| vevent.find_prop(name).map(|p| unescape_text(p.val.as_ref()));
    let required = |name: &str| {
        text(name).ok_or_else(|| TourError::Export(format!("Missing {} in calendar payload", name)))
    };

    Ok(ExportedEvent {
        uid: required("UID")?,
        summary: required("SUMMARY")?,
        location: text("LOCATION"),
        start: parse_utc(&required("DTSTART")?)?,
        end: parse_utc(&required("DTEND")?)?,
    })
}

fn parse_utc(value: &str) -> TourResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%SZ")
        .map(|dt| dt.and_utc())
        .map_err(|_| TourError::Export(format!("Expected a UTC date-time, got '{}'", value)))
}

/// Undo RFC 5545 TEXT escaping. Unknown escapes keep their backslash.
fn unescape_text(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some(&next @ (',' | ';' | '\\')) => {
                result.push(next);
                chars.next();
            }
            Some('n') | Some('N') => {
                result.push('\n');
                chars.next();
            }
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ics::{EventFormatter, ExportSettings};
    use crate::tour::Tour;
    use chrono::{Duration, TimeZone};

    #[test]
    fn reads_back_a_generated_event() {
        let tour = Tour::builtin();
        let settings = ExportSettings {
            timezone: chrono_tz::Europe::London,
            ..ExportSettings::default()
        };
        let formatter = EventFormatter::with_uid_source(settings, || "fixed".to_string());
        let now = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();

        let ics = formatter.format(&tour.dates()[2], now).unwrap();
        let event = inspect_ics(&ics).unwrap();

        assert_eq!(event.uid, "fixed@misterbounce");
        assert_eq!(event.summary, "Late Night Grooves — Mister Bounce");
        assert_eq!(event.location.as_deref(), Some("Birmingham, UK"));
        assert_eq!(event.start, Utc.with_ymd_and_hms(2025, 2, 22, 21, 0, 0).unwrap());
        assert_eq!(event.end - event.start, Duration::minutes(150));
    }

    #[test]
    fn rejects_payload_without_event() {
        let ics = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//x//y//EN\r\nEND:VCALENDAR\r\n";
        assert!(matches!(inspect_ics(ics), Err(TourError::Export(_))));
    }

    #[test]
    fn rejects_floating_times() {
        let ics = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//x//y//EN\r\n\
                   BEGIN:VEVENT\r\nUID:a\r\nDTSTAMP:20250101T000000Z\r\n\
                   DTSTART:20250118T210000\r\nDTEND:20250118T233000\r\n\
                   SUMMARY:x\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
        assert!(matches!(inspect_ics(ics), Err(TourError::Export(_))));
    }

    #[test]
    fn unescape_reverses_escaping() {
        assert_eq!(unescape_text("a\\, b\\; c\\\\ d\\n"), "a, b; c\\ d\n");
        assert_eq!(unescape_text("keep \\x"), "keep \\x");
    }
}
