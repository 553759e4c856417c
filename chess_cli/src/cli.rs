use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chess_cli", version, about = "Two-player chess in the terminal")]
pub struct Cli {
    /// YAML config file; defaults to $CHESS_CONFIG_PATH when set
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a game, reading moves such as `e2 e4` from stdin
    Play,
    /// Print the starting position
    Show,
}
