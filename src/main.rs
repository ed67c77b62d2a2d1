//! # Lamplight Main Entry Point
//!
//! Collects the session configuration from the command line, then runs the
//! turn loop over stdin and stdout until the session ends.

use clap::Parser;
use lamplight::{
    config, ConsoleDisplay, ConsoleInput, GameSession, LamplightResult, SessionConfig,
};
use log::info;

/// Command line arguments for Lamplight.
#[derive(Parser, Debug)]
#[command(name = "lamplight")]
#[command(about = "A turn-based dungeon chase: catch every adversary before the lamp burns out")]
#[command(version)]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = config::DEFAULT_BOARD_WIDTH)]
    width: u32,

    /// Board height in cells
    #[arg(long, default_value_t = config::DEFAULT_BOARD_HEIGHT)]
    height: u32,

    /// Number of adversaries to spawn
    #[arg(long, default_value_t = config::DEFAULT_ADVERSARIES)]
    adversaries: u32,

    /// Lamp lifespan: how many command lines before the light goes out
    #[arg(long, default_value_t = config::DEFAULT_LAMP_LIFESPAN)]
    lamp_lifespan: u32,

    /// Relocate surviving adversaries after every turn
    #[arg(long)]
    adversaries_move: bool,

    /// Random seed for adversary placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> LamplightResult<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    let session_config = SessionConfig {
        width: args.width,
        height: args.height,
        adversaries: args.adversaries,
        lamp_lifespan: args.lamp_lifespan,
        adversaries_move: args.adversaries_move,
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Starting Lamplight v{} with seed {}", lamplight::VERSION, seed);

    let mut session = GameSession::new(session_config, seed)?;
    let stdin = std::io::stdin();
    let mut input = ConsoleInput::new(stdin.lock());
    let mut display = ConsoleDisplay::new(std::io::stdout());
    session.run(&mut input, &mut display)?;
    Ok(())
}
