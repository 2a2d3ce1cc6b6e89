//! Selectielijst taxonomy integration
//!
//! Client, models and the cached resolver for the external reference
//! taxonomy the parser validates against.

pub mod cache;
pub mod client;
pub mod models;
pub mod resolver;

pub use client::SelectielijstClient;
pub use models::{Procestype, Resultaat, ResultaattypeOmschrijving};
pub use resolver::SelectielijstResolver;
