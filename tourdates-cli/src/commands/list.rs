use anyhow::Result;
use owo_colors::OwoColorize;
use tourdates_core::{FilterControl, TourFilter};

use crate::context::Context;
use crate::render::{Render, render_filter_bar};

pub fn run(ctx: &Context, filter: TourFilter, json: bool) -> Result<()> {
    let control = FilterControl::with_active(&ctx.tour, filter);
    let listing = control.listing()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("{}", ctx.tour.artist().bold());
    println!("{}", render_filter_bar(&control.controls()));
    println!();
    println!("{}", listing.render());

    Ok(())
}
