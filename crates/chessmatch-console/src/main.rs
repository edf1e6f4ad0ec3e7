//! Chessmatch - a two-player chess match on the terminal.
//!
//! Both players share the keyboard and enter moves as a source square
//! followed by a target square, e.g. `e2` then `e4`.

mod config;
mod session;
mod ui;

use chessmatch_engine::ChessMatch;
use clap::Parser;
use config::ConsoleConfig;
use session::{OutputMode, Session};
use std::path::PathBuf;
use tracing::Level;
use ui::Renderer;

/// Chessmatch - play chess against another person on one terminal.
#[derive(Parser)]
#[command(name = "chessmatch")]
#[command(about = "Plays a chess match between two players on one terminal")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value_os_t = ConsoleConfig::default_path())]
    config: PathBuf,

    /// Print the match as JSON after every move instead of drawing the board
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace); overrides the config file
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ConsoleConfig::load(&args.config)?;

    let level: Level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.log_level)
        .parse()?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Config: {:?}", args.config);
    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let mut chess_match = ChessMatch::new();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), Renderer::new(&config), mode);
    session.run(&mut chess_match)?;

    Ok(())
}
