// zaakimport - i-Navigator to Open Zaak catalog import tool
// Copyright (c) 2025 Zaakimport Contributors
// Licensed under the MIT License

//! # zaakimport - i-Navigator to Open Zaak catalog import
//!
//! zaakimport ingests i-Navigator DSP XML exports describing case type
//! (zaaktype) definitions, validates and normalizes every field against the
//! controlled vocabularies of the ZTC standard and the external Selectielijst
//! taxonomy, and synchronizes the resulting object graph into an Open Zaak
//! catalog API with idempotent create/update/version-close semantics.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The parse, resolve, reconcile and report pipeline
//! - [`adapters`] - External integrations (catalog API, Selectielijst API)
//! - [`domain`] - Draft records, vocabularies and the error hierarchy
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Run modes
//!
//! A run is either a **precheck** (parse and report, catalog untouched) or an
//! **import** (parse, then reconcile every record against the catalog). Both
//! produce the same artifacts: an ordered leveled log and a per-resource-type
//! statistics map.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zaakimport::adapters::catalog::CatalogClient;
//! use zaakimport::adapters::selectielijst::SelectielijstResolver;
//! use zaakimport::config::load_config;
//! use zaakimport::core::importer;
//! use zaakimport::core::session::{ImportOptions, NullJobStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("zaakimport.toml")?;
//!     let catalog = CatalogClient::new(&config.catalog);
//!     let resolver = SelectielijstResolver::new(&config.selectielijst);
//!
//!     let xml = std::fs::read_to_string("export.xml")?;
//!     let session = importer::run_import(
//!         ImportOptions {
//!             year: config.import.year,
//!             start_date: chrono::Local::now().date_naive(),
//!             close_published: config.import.close_published,
//!             catalog_url: config.catalog.catalog_url.clone(),
//!         },
//!         Arc::new(NullJobStore),
//!         &catalog,
//!         &resolver,
//!         &xml,
//!     )
//!     .await;
//!
//!     println!("run produced {} log entries", session.logs().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fatal problems (malformed XML, unsupported export version, unreachable
//! catalog) abort the whole run. Everything else is a per-record failure:
//! logged with context, counted against the record's resource type, and
//! processing continues with the remaining records. See
//! [`domain::ImportError`] for the error hierarchy.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
