mod cli;
mod config;
mod play;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::{error, info};
use rchess::ui::renderer::BoardRenderer;
use rchess::{Board, Game};

fn main() -> ExitCode {
    // Initialize logger
    let env = Env::default().filter_or("CHESS_LOG_LEVEL", "info");
    env_logger::Builder::from_env(env).init();

    let cli = cli::Cli::parse();
    let cfg_path = cli
        .config
        .clone()
        .or_else(|| std::env::var_os("CHESS_CONFIG_PATH").map(PathBuf::from));
    let cfg = match config::Config::load(cfg_path.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Some(cli::Commands::Play) => {
            let mut game = Game::new();
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            match play::run(&mut game, stdin.lock(), &mut stdout, &cfg) {
                Ok(outcome) => info!("game finished: {:?}", outcome),
                Err(e) => {
                    error!("terminal i/o failed: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        Some(cli::Commands::Show) => {
            print!("{}", BoardRenderer::render(&Board::new(), cfg.style(), cfg.coordinates));
        }
        None => {
            // If no subcommand, print help
            if let Err(e) = cli::Cli::command().print_help() {
                error!("failed to print help: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
