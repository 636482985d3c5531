use std::path::Path;

use clap::Parser;
use petal::cli::commands::Cli;
use petal::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let data_dir = cli.data_dir.as_deref().map(Path::new);
            if let Err(e) = petal::tui::run(data_dir) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
