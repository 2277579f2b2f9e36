//! Calendar file export.
//!
//! Builds single-event iCalendar payloads (RFC 5545) for tour dates and
//! reads them back for validation.

mod filename;
mod generate;
mod inspect;

pub use filename::export_filename;
pub use generate::{DEFAULT_UID_DOMAIN, EventFormatter, ExportSettings, RandomUid, UidSource};
pub use inspect::{ExportedEvent, inspect_ics};

/// MIME type offered for exported files.
pub const ICS_MIME_TYPE: &str = "text/calendar; charset=utf-8";
