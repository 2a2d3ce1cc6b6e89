//! Precheck command: dry-run a DSP export against the catalog

use crate::adapters::catalog::CatalogClient;
use crate::adapters::selectielijst::SelectielijstResolver;
use crate::cli::commands::{finish, options_from};
use crate::config::load_config;
use crate::core::importer;
use crate::core::session::format::transform_precheck_statistics;
use crate::core::session::NullJobStore;
use crate::logging::init_logging;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the precheck command
#[derive(Args, Debug)]
pub struct PrecheckArgs {
    /// Path to the DSP export XML file
    #[arg(short, long)]
    pub file: PathBuf,
}

impl PrecheckArgs {
    pub async fn execute(&self, config_path: &str, log_level: Option<&str>) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;
        let level = log_level.unwrap_or(&config.application.log_level);
        let _guard = init_logging(level, &config.logging)?;

        tracing::info!(file = %self.file.display(), "starting precheck");
        let xml = std::fs::read_to_string(&self.file)?;

        let catalog = CatalogClient::new(&config.catalog);
        let resolver = SelectielijstResolver::new(&config.selectielijst);

        let session = importer::precheck_import(
            options_from(&config),
            Arc::new(NullJobStore),
            &catalog,
            &resolver,
            &xml,
        )
        .await;

        let rows = transform_precheck_statistics(&session.counter().snapshot());
        Ok(finish(&session, rows))
    }
}
