//! Init command: write a starter configuration file

use crate::logging::init_logging;
use clap::Args;
use std::path::PathBuf;

const SAMPLE_CONFIG: &str = r#"# zaakimport configuration

[application]
log_level = "info"

[catalog]
api_root = "https://catalogi.example.nl/api/v1"
catalog_url = "https://catalogi.example.nl/api/v1/catalogussen/00000000-0000-0000-0000-000000000000"
# api_token = "${ZAAKIMPORT_CATALOG_API_TOKEN}"

[selectielijst]
api_root = "https://selectielijst.openzaak.nl/api/v1"
cache_ttl_hours = 24

[import]
year = 2020
close_published = false
# start_date = "2021-04-01"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the configuration file
    #[arg(short, long, default_value = "zaakimport.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    pub async fn execute(&self, log_level: Option<&str>) -> anyhow::Result<i32> {
        let _guard = init_logging(log_level.unwrap_or("info"), &Default::default())?;

        if self.output.exists() && !self.force {
            eprintln!(
                "{} already exists; pass --force to overwrite",
                self.output.display()
            );
            return Ok(1);
        }

        std::fs::write(&self.output, SAMPLE_CONFIG)?;
        println!("Wrote {}", self.output.display());
        println!("Fill in the catalog URLs before running an import.");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses_and_validates() {
        let config: crate::config::ZaakimportConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.import.year, 2020);
    }
}
