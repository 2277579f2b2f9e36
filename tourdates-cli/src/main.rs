mod commands;
mod context;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::context::Context;

#[derive(Parser)]
#[command(name = "tourdates")]
#[command(about = "Browse tour dates and add them to your calendar")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tour dates
    List {
        /// Which dates to show: all, uk or eu
        #[arg(short, long)]
        filter: Option<String>,

        /// Print display records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch between filters interactively
    Browse,
    /// Save a show as an .ics file
    Export {
        /// Date of the show (YYYY-MM-DD)
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        date: Option<String>,

        /// Export every show in the filter
        #[arg(long)]
        all: bool,

        /// Which dates --all exports: all, uk or eu
        #[arg(short, long, requires = "all")]
        filter: Option<String>,

        /// Directory to save into (defaults to export_dir from the config)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Write the calendar payload to stdout instead of a file
        #[arg(long, conflicts_with_all = ["out", "open"])]
        stdout: bool,

        /// Open the saved file with the default calendar app
        #[arg(long)]
        open: bool,
    },
    /// Show configuration paths and effective settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::List { filter, json } => {
            let ctx = Context::load()?;
            let filter = ctx.resolve_filter(filter.as_deref())?;
            commands::list::run(&ctx, filter, json)
        }
        Commands::Browse => {
            let ctx = Context::load()?;
            commands::browse::run(&ctx)
        }
        Commands::Export {
            date,
            all,
            filter,
            out,
            stdout,
            open,
        } => {
            let ctx = Context::load()?;
            let selection = match date {
                Some(date) => commands::export::Selection::Date(date),
                None => commands::export::Selection::Filter(ctx.resolve_filter(filter.as_deref())?),
            };
            let destination = if stdout {
                commands::export::Destination::Stdout
            } else {
                commands::export::Destination::Directory {
                    dir: out.unwrap_or_else(|| ctx.config.export_path()),
                    open,
                }
            };
            commands::export::run(&ctx, selection, destination)
        }
        Commands::Config => commands::config::run(),
    }
}
