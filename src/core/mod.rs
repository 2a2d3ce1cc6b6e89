//! Business logic
//!
//! The parse, resolve, reconcile and report pipeline: normalization,
//! parsing, catalog synchronization, session bookkeeping and the run
//! orchestration tying them together.

pub mod importer;
pub mod loader;
pub mod normalize;
pub mod parser;
pub mod session;
