//! Prover Registry Server Entry Point

use clap::Parser;
use prover_registry::cli::{self, Cli, Commands};
use prover_registry::logging;

#[tokio::main]
async fn main() {
    let parsed = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match parsed.command {
        Some(Commands::Probe(args)) => cli::probe::execute(&args).await,
        Some(Commands::Serve(args)) => cli::serve::execute(&args).await,
        None => cli::serve::execute(&cli::serve::ServeArgs::default()).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
