//! Validate-config command

use crate::config::load_config;
use crate::logging::init_logging;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    pub async fn execute(&self, config_path: &str, log_level: Option<&str>) -> anyhow::Result<i32> {
        let _guard = init_logging(log_level.unwrap_or("info"), &Default::default())?;

        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration {config_path} is valid.");
                println!("  catalog api root:  {}", config.catalog.api_root);
                println!("  catalog:           {}", config.catalog.catalog_url);
                println!("  selectielijst:     {}", config.selectielijst.api_root);
                println!("  year:              {}", config.import.year);
                println!("  close published:   {}", config.import.close_published);
                Ok(0)
            }
            Err(err) => {
                eprintln!("Configuration {config_path} is invalid: {err}");
                Ok(1)
            }
        }
    }
}
