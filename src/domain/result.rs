//! Result type alias for zaakimport
//!
//! This module provides a convenient Result type alias that uses ImportError
//! as the error type.

use super::errors::ImportError;

/// Result type alias for zaakimport operations
///
/// This is a convenience type alias that uses `ImportError` as the error type.
/// Use this throughout the codebase for fallible operations.
pub type Result<T> = std::result::Result<T, ImportError>;
