mod config;
mod input;
mod session;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use twenty48_core::GameEngine;

use config::Config;
use session::Session;

#[derive(Debug, Parser)]
#[command(author, version, about = "Play 2048 in the terminal, one command per line")]
struct Args {
    /// Optional TOML file with seed and key bindings
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// RNG seed for reproducible games (overrides the config file)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let config = match &args.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            Config::from_toml(path)?
        }
        None => Config::default(),
    };

    let game = match args.seed.or(config.seed) {
        Some(seed) => {
            info!("Seeding RNG with {seed}");
            GameEngine::seeded(seed)
        }
        None => GameEngine::new(),
    };

    let mut session = Session::new(game, config.keys);
    session.run(io::stdin().lock(), io::stdout().lock())?;
    info!(
        "Session finished: status={} score={}",
        session.game().status(),
        session.game().score()
    );
    Ok(())
}
