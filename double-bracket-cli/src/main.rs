mod commands;
mod config;
mod document;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use double_bracket_core::MatchId;
use thiserror::Error;

use crate::commands::Command;
use crate::config::{Config, ConfigError};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Write compact instead of pretty printed JSON.
    #[arg(long)]
    compact: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Bracket(#[from] double_bracket_core::Error),
    #[error("match {0} is not part of the tournament")]
    NotInTournament(MatchId),
}

pub type Result<T> = std::result::Result<T, Error>;

fn main() {
    let args = Args::parse();

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    if args.compact {
        config.pretty = false;
    }

    pretty_env_logger::formatted_builder()
        .filter_level(config.loglevel)
        .init();

    log::debug!("Using config: {:?}", config);

    if let Err(err) = args.command.run(&config) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    Ok(config.with_environment())
}
