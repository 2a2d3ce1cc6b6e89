//! Catalog API integration
//!
//! Client and response models for the ZTC catalog the import targets.

pub mod client;
pub mod models;

pub use client::{CatalogClient, UniqueMatch};
pub use models::{ListPage, RemoteResource};
