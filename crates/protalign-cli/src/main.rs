mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("protalign v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!("Setting Rayon global thread pool to {} threads.", num_threads);
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    // A malformed configuration aborts here, before any chain is touched.
    let pipeline_config = config::load_pipeline_config(&cli.config)?;

    let command_result = match cli.command {
        Commands::OnSet(args) => {
            info!("Dispatching to 'on-set' command.");
            commands::on_set::run(args, &pipeline_config)
        }
        Commands::OnChain(args) => {
            info!("Dispatching to 'on-chain' command.");
            commands::on_chain::run(args, &pipeline_config)
        }
        Commands::NetViz(args) => {
            info!("Dispatching to 'net-viz' command.");
            commands::net_viz::run(args, &pipeline_config)
        }
    };

    match &command_result {
        Ok(_) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }

    command_result
}
