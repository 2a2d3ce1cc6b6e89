// zaakimport - i-Navigator to Open Zaak catalog import tool
// Copyright (c) 2025 Zaakimport Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use zaakimport::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Commands initialize logging themselves, once the configured level is
    // known; the exit code distinguishes a completed run (0, issues included)
    // from an aborted one (1) and a fatal startup problem (2).
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            2
        }
    };

    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let log_level = cli.log_level.as_deref();
    match &cli.command {
        Commands::Precheck(args) => args.execute(&cli.config, log_level).await,
        Commands::Import(args) => args.execute(&cli.config, log_level).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config, log_level).await,
        Commands::Init(args) => args.execute(log_level).await,
    }
}
