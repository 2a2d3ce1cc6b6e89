//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for zaakimport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// zaakimport - i-Navigator to Open Zaak catalog import tool
#[derive(Parser, Debug)]
#[command(name = "zaakimport")]
#[command(version, about, long_about = None)]
#[command(author = "Zaakimport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "zaakimport.toml", env = "ZAAKIMPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ZAAKIMPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dry run: parse and validate a DSP export without touching the catalog
    Precheck(commands::precheck::PrecheckArgs),

    /// Import a DSP export into the configured catalog
    Import(commands::import::ImportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
