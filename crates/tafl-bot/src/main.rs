//! Tafl bot command line.
//!
//! Searches a position given as FEN (the start position by default) and
//! prints the chosen move, or plays the bot against itself for a number of
//! plies.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tafl_bot::{search_position, BotConfig};
use tafl_engine::{Game, Position};
use tracing_subscriber::EnvFilter;

/// Tafl bot - picks moves with an alpha-beta search.
#[derive(Parser)]
#[command(name = "tafl-bot")]
#[command(about = "Picks Tafl moves with an alpha-beta search")]
struct Args {
    /// Position to search (defaults to the start position)
    #[arg(long)]
    fen: Option<String>,

    /// Search depth in plies (overrides the config file)
    #[arg(long)]
    depth: Option<u8>,

    /// Path to the TOML config file
    #[arg(long, default_value_os_t = BotConfig::config_path())]
    config: PathBuf,

    /// Play this many plies against itself instead of searching once
    #[arg(long)]
    play: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut config = BotConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(depth) = args.depth {
        anyhow::ensure!(depth > 0, "depth must be at least 1");
        config = config.with_depth(depth);
    }
    tracing::debug!(?config, "configuration");

    let mut game = match &args.fen {
        Some(fen) => {
            let position = Position::from_fen(fen).with_context(|| format!("parsing {}", fen))?;
            Game::from_position(position, config.rules)
        }
        None => Game::with_options(config.rules),
    };

    if let Some(result) = game.result() {
        println!("{}", result);
        return Ok(());
    }

    let plies = args.play.unwrap_or(1);
    for ply in 1..=plies {
        let result = search_position(game.position(), &config)?;
        let record = game.make_move(result.best_move)?;
        if args.play.is_some() {
            println!("{:>3}. {:<8} {}", ply, record.notation, record.fen);
        } else {
            println!("{} {}", record.notation, result.score);
        }

        if let Some(result) = game.result() {
            println!("{}", result);
            break;
        }
    }

    Ok(())
}
