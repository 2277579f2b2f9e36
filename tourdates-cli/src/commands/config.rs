use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use tourdates_core::tour_config::TourConfig;

use crate::context::Context;

pub fn run() -> Result<()> {
    let config_path = TourConfig::config_path()?;
    report(&mut io::stdout().lock(), &config_path, Context::load)
}

/// Print the config path, then load and print the effective settings. The
/// path is printed first so it is visible even when the file is invalid.
fn report<W: Write>(
    out: &mut W,
    config_path: &Path,
    load: impl FnOnce() -> Result<Context>,
) -> Result<()> {
    writeln!(out, "{}", "Paths".bold())?;
    writeln!(out, "  Config:     {}", config_path.display())?;
    out.flush()?;

    let ctx = load()?;
    writeln!(out, "  Exports:    {}", ctx.config.export_path().display())?;

    let dataset = if ctx.config.dates.is_some() {
        "from config"
    } else {
        "built-in"
    };

    writeln!(out)?;
    writeln!(out, "{}", "Settings".bold())?;
    writeln!(out, "  Artist:     {}", ctx.settings.artist)?;
    writeln!(out, "  Time zone:  {}", ctx.settings.timezone)?;
    writeln!(out, "  Doors:      {}", ctx.settings.doors.format("%H:%M"))?;
    writeln!(
        out,
        "  Set length: {}",
        humanize_minutes(ctx.settings.set_length.num_minutes())
    )?;
    writeln!(out, "  Filter:     {}", ctx.config.default_filter)?;
    writeln!(
        out,
        "  Dates:      {} {}",
        ctx.tour.dates().len(),
        format!("({})", dataset).dimmed()
    )?;

    Ok(())
}

fn humanize_minutes(total: i64) -> String {
    match (total / 60, total % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
