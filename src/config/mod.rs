//! Configuration management
//!
//! TOML configuration with environment variable substitution and overrides.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CatalogConfig, ImportConfig, LoggingConfig, SelectielijstConfig,
    ZaakimportConfig,
};
pub use secret::{SecretString, SecretValue};
