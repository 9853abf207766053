//! healthmon entry point

use clap::Parser;
use healthmon::cli::{Cli, Commands};
use healthmon::logging::{self, LoggingConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&LoggingConfig::from_env()) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let outcome = match cli.command {
        Some(Commands::Run(args)) => healthmon::cli::run::execute(&args).await,
        Some(Commands::Provision) => healthmon::cli::provision::execute().await.map(|_| true),
        Some(Commands::History(args)) => {
            healthmon::cli::history::execute(&args).await.map(|_| true)
        }
        // No subcommand - default to a single run with an empty event
        None => {
            let args = healthmon::cli::run::RunArgs {
                event: "{}".to_string(),
            };
            healthmon::cli::run::execute(&args).await
        }
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
