//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ZaakimportConfig;
use crate::config::secret::SecretValue;
use crate::domain::errors::ImportError;
use crate::domain::result::Result;
use regex::Regex;
use secrecy::Secret;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ZaakimportConfig
/// 4. Applies environment variable overrides (ZAAKIMPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, the TOML is invalid, a
/// referenced environment variable is unset or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<ZaakimportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ImportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ImportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ZaakimportConfig = toml::from_str(&contents)
        .map_err(|e| ImportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ImportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. A referenced but unset variable is an
/// error naming every missing variable at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ImportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the ZAAKIMPORT_* prefix
///
/// Variables follow the pattern ZAAKIMPORT_<SECTION>_<KEY>, for example
/// ZAAKIMPORT_CATALOG_API_ROOT.
fn apply_env_overrides(config: &mut ZaakimportConfig) {
    if let Ok(val) = std::env::var("ZAAKIMPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("ZAAKIMPORT_CATALOG_API_ROOT") {
        config.catalog.api_root = val;
    }
    if let Ok(val) = std::env::var("ZAAKIMPORT_CATALOG_CATALOG_URL") {
        config.catalog.catalog_url = val;
    }
    if let Ok(val) = std::env::var("ZAAKIMPORT_CATALOG_API_TOKEN") {
        config.catalog.api_token = Some(Secret::new(SecretValue::from(val)));
    }

    if let Ok(val) = std::env::var("ZAAKIMPORT_SELECTIELIJST_API_ROOT") {
        config.selectielijst.api_root = val;
    }

    if let Ok(val) = std::env::var("ZAAKIMPORT_IMPORT_YEAR") {
        if let Ok(year) = val.parse() {
            config.import.year = year;
        }
    }
    if let Ok(val) = std::env::var("ZAAKIMPORT_IMPORT_CLOSE_PUBLISHED") {
        config.import.close_published = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("ZAAKIMPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ZAAKIMPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ZAAKIMPORT_TEST_VAR", "test_value");
        let input = "api_token = \"${ZAAKIMPORT_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_token = \"test_value\"\n");
        std::env::remove_var("ZAAKIMPORT_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ZAAKIMPORT_MISSING_VAR");
        let input = "api_token = \"${ZAAKIMPORT_MISSING_VAR}\"";
        assert!(substitute_env_vars(input).is_err());
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# reference ${ZAAKIMPORT_NOT_SET} in a comment";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${ZAAKIMPORT_NOT_SET}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("nonexistent.toml").is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[catalog]
api_root = "https://catalogi.example.nl/api/v1"
catalog_url = "https://catalogi.example.nl/api/v1/catalogussen/7c0e6595"

[import]
year = 2020
close_published = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert!(config.import.close_published);
        assert_eq!(config.import.year, 2020);
    }

    #[test]
    fn test_load_config_invalid_year() {
        let toml_content = r#"
[catalog]
api_root = "https://catalogi.example.nl/api/v1"
catalog_url = "https://catalogi.example.nl/api/v1/catalogussen/7c0e6595"

[import]
year = 20
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }
}
