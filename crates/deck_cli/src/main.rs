//! Deck CLI
//!
//! Simulate a stack of draggable cards without a display.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deck_card::{snap_point, CardConfig, CardMetrics};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod simulate;

use simulate::{parse_screen, Scenario, Swipe};

#[derive(Parser)]
#[command(name = "deck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Draggable card stack simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount a stack, swipe the top card, and run until everything rests
    Simulate {
        /// Number of cards in the stack
        #[arg(short, long, default_value = "4")]
        cards: usize,

        /// Screen size as WIDTHxHEIGHT
        #[arg(short, long, default_value = "390x844")]
        screen: String,

        /// Seed for the initial card tilts (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Card configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Gesture on the top card (left, right, tap, none)
        #[arg(long, default_value = "right")]
        swipe: String,

        /// Pointer speed of the swipe (px/s)
        #[arg(long, default_value = "1500")]
        speed: f32,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: f32,

        /// Print every frame as a JSON line
        #[arg(long)]
        json: bool,
    },

    /// Show where a card released at an offset and velocity would land
    Snap {
        /// Horizontal offset at release (px)
        #[arg(long, allow_hyphen_values = true)]
        offset: f32,

        /// Horizontal velocity at release (px/s)
        #[arg(long, allow_hyphen_values = true)]
        velocity: f32,

        /// Screen size as WIDTHxHEIGHT
        #[arg(short, long, default_value = "390x844")]
        screen: String,
    },

    /// Print the default card configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            cards,
            screen,
            seed,
            config,
            swipe,
            speed,
            fps,
            json,
        } => {
            let config = match config {
                Some(path) => CardConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => CardConfig::default(),
            };
            let scenario = Scenario {
                cards,
                screen: parse_screen(&screen)?,
                seed,
                swipe: swipe.parse()?,
                speed,
                fps,
                config,
            };
            cmd_simulate(&scenario, json)
        }

        Commands::Snap {
            offset,
            velocity,
            screen,
        } => cmd_snap(offset, velocity, &screen),

        Commands::Config => cmd_config(),
    }
}

fn cmd_simulate(scenario: &Scenario, json: bool) -> Result<()> {
    info!(
        "Simulating {} cards on {}x{} ({:?})",
        scenario.cards, scenario.screen.width, scenario.screen.height, scenario.swipe
    );

    let report = simulate::run(scenario, |record| {
        if json {
            println!("{}", serde_json::to_string(record)?);
        }
        Ok(())
    })?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    println!("{} frames, {:.0} ms", report.frames, report.elapsed_ms);
    if report.settled.is_empty() && scenario.swipe != Swipe::None {
        println!("no card settled");
    }
    for settled in &report.settled {
        println!("card {} settled {}", settled.index, settled.direction);
    }
    for card in &report.cards {
        println!(
            "  card {}: x={:.1} y={:.1} rotate={:.2}deg scale={:.2} ({})",
            card.index, card.x, card.y, card.rotation, card.scale, card.phase
        );
    }

    Ok(())
}

fn cmd_snap(offset: f32, velocity: f32, screen: &str) -> Result<()> {
    let config = CardConfig::default();
    let metrics = CardMetrics::new(parse_screen(screen)?, &config.geometry, &config.release)?;
    let points = metrics.snap_points;

    let destination = snap_point(
        offset,
        velocity,
        &points.as_array(),
        config.release.velocity_projection,
    );
    info!(
        "Snap points: {:?} (projected {})",
        points.as_array(),
        offset + config.release.velocity_projection * velocity
    );

    println!("{} ({})", destination, points.direction_of(destination));
    Ok(())
}

fn cmd_config() -> Result<()> {
    print!("{}", CardConfig::default().to_toml()?);
    Ok(())
}
