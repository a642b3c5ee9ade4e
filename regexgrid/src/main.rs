// regexgrid/src/main.rs
//! regexgrid entry point.
//!
//! Loads `.env`, parses flags, initialises logging and dispatches the subcommand.

use anyhow::Result;
use clap::Parser;

use regexgrid::cli::{Cli, Commands};
use regexgrid::commands::{apply::run_apply, serve::run_serve};
use regexgrid::logger;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));

    let config = args.service_config()?;

    match &args.command {
        Commands::Serve(_) => run_serve(config).await,
        Commands::Apply(cmd) => run_apply(cmd, &config).await,
    }
}
