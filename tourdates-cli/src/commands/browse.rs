use anyhow::Result;
use dialoguer::Select;
use owo_colors::OwoColorize;
use tourdates_core::FilterControl;

use crate::context::Context;
use crate::render::Render;

pub fn run(ctx: &Context) -> Result<()> {
    let mut control = FilterControl::with_active(&ctx.tour, ctx.config.default_filter);

    println!("{}", ctx.tour.artist().bold());
    println!();
    println!("{}", control.listing()?.render());

    loop {
        let buttons = control.controls();
        let mut items: Vec<&str> = buttons.iter().map(|b| b.label).collect();
        items.push("Quit");

        let current = buttons.iter().position(|b| b.pressed).unwrap_or(0);

        println!();
        let selection = Select::new()
            .with_prompt("  Show")
            .items(&items)
            .default(current)
            .interact()?;

        let Some(button) = buttons.get(selection) else {
            break;
        };

        let listing = control.select(button.filter)?;
        println!();
        println!("{}", listing.render());
    }

    Ok(())
}
