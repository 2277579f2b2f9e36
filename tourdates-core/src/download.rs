//! Offering exported calendar files to the user.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{TourError, TourResult};
use crate::ics::{EventFormatter, ICS_MIME_TYPE, UidSource, export_filename, inspect_ics};
use crate::listing::CalendarAction;
use crate::tour::Tour;

/// A calendar payload ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFile {
    pub filename: String,
    pub content: String,
}

impl CalendarFile {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        CalendarFile {
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        ICS_MIME_TYPE
    }
}

/// Outcome of a successful offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Where the file landed, if it was saved to disk
    pub path: Option<PathBuf>,
    pub bytes: usize,
    pub mime: &'static str,
}

/// Somewhere a calendar file can be handed to the user.
pub trait DownloadTarget {
    fn offer(&mut self, file: &CalendarFile) -> TourResult<Download>;
}

/// Saves files into a directory.
///
/// The payload is written to a temporary file next to the destination and
/// renamed into place. The temporary file is removed if anything fails.
#[derive(Debug, Clone)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectoryTarget { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadTarget for DirectoryTarget {
    fn offer(&mut self, file: &CalendarFile) -> TourResult<Download> {
        check_filename(&file.filename)?;
        inspect_ics(&file.content)?;

        std::fs::create_dir_all(&self.dir)?;

        let mut temp = tempfile::Builder::new()
            .prefix(".tourdates-")
            .suffix(".part")
            .tempfile_in(&self.dir)?;
        temp.write_all(file.content.as_bytes())?;
        temp.flush()?;

        let path = self.dir.join(&file.filename);
        temp.persist(&path).map_err(|e| TourError::Io(e.error))?;

        tracing::info!(path = %path.display(), bytes = file.content.len(), "saved calendar file");

        Ok(Download {
            path: Some(path),
            bytes: file.content.len(),
            mime: file.mime_type(),
        })
    }
}

/// Streams files to a writer, e.g. stdout.
pub struct WriterTarget<W> {
    writer: W,
}

impl<W: Write> WriterTarget<W> {
    pub fn new(writer: W) -> Self {
        WriterTarget { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DownloadTarget for WriterTarget<W> {
    fn offer(&mut self, file: &CalendarFile) -> TourResult<Download> {
        inspect_ics(&file.content)?;

        self.writer.write_all(file.content.as_bytes())?;
        self.writer.flush()?;

        Ok(Download {
            path: None,
            bytes: file.content.len(),
            mime: file.mime_type(),
        })
    }
}

/// Run a card's "Add to Calendar" action: format the show and offer the file.
pub fn add_to_calendar<U: UidSource, T: DownloadTarget + ?Sized>(
    tour: &Tour,
    action: &CalendarAction,
    formatter: &EventFormatter<U>,
    target: &mut T,
    now: DateTime<Utc>,
) -> TourResult<Download> {
    let date = tour
        .dates()
        .get(action.index)
        .filter(|d| d.date == action.date)
        .ok_or_else(|| TourError::Export(format!("No show on {}", action.date)))?;

    let content = formatter.format(date, now)?;
    let file = CalendarFile::new(export_filename(tour.artist(), date), content);

    target.offer(&file)
}

fn check_filename(filename: &str) -> TourResult<()> {
    let plain = Path::new(filename)
        .file_name()
        .is_some_and(|name| name == filename);

    if plain && filename.ends_with(".ics") {
        Ok(())
    } else {
        Err(TourError::Export(format!(
            "Refusing to save '{}': expected a bare .ics filename",
            filename
        )))
    }
}
