//! CLI for tangram puzzle sessions.
//!
//! Provides:
//! - Replaying a scripted session (pointer, double-click, command and dropdown
//!   events) through the interaction controller
//! - Rendering a session's board to SVG

mod render;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::info;
use tangram_core::{Outcome, Session};

use crate::render::{render_svg, RenderConfig};

#[derive(Parser)]
#[command(name = "tangram")]
#[command(about = "Drag-and-rotate tangram puzzle sessions", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TANGRAM_BUILD_SHA"), ")"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session's events and print the resulting state
    Replay {
        /// Session file (JSON)
        session: PathBuf,

        /// Also write the final board as SVG
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Print the outcome as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Print every effect emitted while replaying
        #[arg(short, long)]
        effects: bool,
    },

    /// Render a session's initial board to SVG
    Render {
        /// Session file (JSON)
        session: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Omit piece labels
        #[arg(long)]
        no_labels: bool,
    },
}

fn load(path: &PathBuf) -> Result<Session> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let session = Session::from_json(&json).with_context(|| format!("parsing {}", path.display()))?;
    info!("Loaded {}: {} pieces, {} events", path.display(), session.pieces.len(), session.events.len());
    Ok(session)
}

fn print_outcome(outcome: &Outcome, effects: bool) {
    for notice in &outcome.notices {
        println!("notice (event {}): {}", notice.event, notice.message);
    }
    if effects {
        println!("effects:");
        for effect in &outcome.effects {
            println!("  {:?}", effect);
        }
    }
    println!("pieces:");
    for piece in &outcome.pieces {
        println!(
            "  {:<10} {:<32} {:>4} {:<10} at {}{}",
            piece.id.to_string(),
            piece.name,
            piece.rotation.to_string(),
            piece.container.to_string(),
            piece.position,
            if piece.selected { " (selected)" } else { "" },
        );
    }
    match &outcome.summary {
        Some(summary) => println!("summary:\n{}", summary.to_string().lines().map(|l| format!("  {}", l)).join("\n")),
        None => println!("summary: (none)"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { session, svg, json, effects } => {
            let path = session;
            let session = load(&path)?;
            let outcome = session.replay().with_context(|| format!("replaying {}", path.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome, effects);
            }
            if let Some(svg) = svg {
                let rendered = render_svg(&outcome.board, &outcome.pieces, &RenderConfig::default())?;
                fs::write(&svg, rendered).with_context(|| format!("writing {}", svg.display()))?;
                info!("Wrote {}", svg.display());
            }
        }
        Commands::Render { session, output, no_labels } => {
            let session = load(&session)?;
            let controller = session.controller()?;
            let config = RenderConfig { show_labels: !no_labels, ..Default::default() };
            let rendered = render_svg(controller.board(), controller.pieces(), &config)?;
            fs::write(&output, rendered).with_context(|| format!("writing {}", output.display()))?;
            info!("Wrote {}", output.display());
        }
    }
    Ok(())
}
