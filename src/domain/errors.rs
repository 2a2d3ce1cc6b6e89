//! Domain error types
//!
//! This module defines the error hierarchy for zaakimport. All errors are
//! domain-specific and don't expose third-party types; the two remote
//! collaborators (catalog API, Selectielijst API) each get their own enum.

use thiserror::Error;

/// Main zaakimport error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The source document is not well-formed XML
    ///
    /// The payload carries the parser detail for diagnostics; the display
    /// form is the stable message surfaced in the job log.
    #[error("XML parse error")]
    XmlParse(String),

    /// The source document is not a DSP export
    #[error("non supported XML format")]
    UnsupportedFormat,

    /// The source document carries an unsupported export version
    #[error("non supported XML version '{0}' (expected 'ICR1.5.x')")]
    UnsupportedVersion(String),

    /// Catalog API errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Selectielijst API errors
    #[error("Selectielijst error: {0}")]
    Selectielijst(#[from] SelectielijstError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Per-record parse failure
///
/// Raised while constructing a single draft from its XML element. The parser
/// catches these at the smallest enclosing scope: a failing case type skips
/// the whole case type, a failing child skips only that child.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ParseError(pub String);

/// Catalog-API-specific errors
///
/// Errors that occur when talking to the ZTC catalog API. Validation
/// rejections keep their structured payload so the session can render the
/// invalid parameters in a readable form.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to reach the catalog API
    #[error("failed to connect to catalog API: {0}")]
    ConnectionFailed(String),

    /// The API rejected the request (4xx/5xx)
    #[error("{}", api_display(.status, .body))]
    Api {
        status: u16,
        body: Option<ApiErrorBody>,
    },

    /// The API answered with something we could not decode
    #[error("invalid response from catalog API: {0}")]
    InvalidResponse(String),

    /// A URL could not be constructed for a request
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Selectielijst-API-specific errors
#[derive(Debug, Error)]
pub enum SelectielijstError {
    /// Failed to reach the Selectielijst API
    #[error("failed to connect to Selectielijst API: {0}")]
    ConnectionFailed(String),

    /// The API rejected the request
    #[error("Selectielijst API returned status {status} for {endpoint}")]
    Api { status: u16, endpoint: String },

    /// The API answered with something we could not decode
    #[error("invalid response from Selectielijst API: {0}")]
    InvalidResponse(String),
}

/// Structured error body returned by the catalog API on validation failures
///
/// Follows the DSO API error format: a title plus zero or more invalid
/// parameters, each naming the offending field.
#[derive(Debug, Clone, serde::Deserialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default, rename = "invalidParams")]
    pub invalid_params: Vec<InvalidParam>,
}

/// A single invalid parameter inside an [`ApiErrorBody`]
#[derive(Debug, Clone, serde::Deserialize, PartialEq)]
pub struct InvalidParam {
    pub name: String,

    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub reason: String,
}

/// Synthetic parameter name the catalog API uses for whole-object errors
pub const NON_FIELD_ERRORS: &str = "nonFieldErrors";

fn api_display(status: &u16, body: &Option<ApiErrorBody>) -> String {
    match body {
        Some(body) if !body.title.is_empty() => {
            format!("catalog API returned status {status}: {}", body.title)
        }
        _ => format!("catalog API returned status {status}"),
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ImportError {
    fn from(err: toml::de::Error) -> Self {
        ImportError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_display() {
        let err = ImportError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_xml_errors_display() {
        assert_eq!(
            ImportError::XmlParse("unexpected end of stream".to_string()).to_string(),
            "XML parse error"
        );
        assert_eq!(
            ImportError::UnsupportedFormat.to_string(),
            "non supported XML format"
        );
        assert_eq!(
            ImportError::UnsupportedVersion("ICR1.3.13".to_string()).to_string(),
            "non supported XML version 'ICR1.3.13' (expected 'ICR1.5.x')"
        );
    }

    #[test]
    fn test_catalog_error_conversion() {
        let catalog_err = CatalogError::ConnectionFailed("network error".to_string());
        let err: ImportError = catalog_err.into();
        assert!(matches!(err, ImportError::Catalog(_)));
    }

    #[test]
    fn test_selectielijst_error_conversion() {
        let lijst_err = SelectielijstError::ConnectionFailed("network error".to_string());
        let err: ImportError = lijst_err.into();
        assert!(matches!(err, ImportError::Selectielijst(_)));
    }

    #[test]
    fn test_api_error_body_deserialize() {
        let body: ApiErrorBody = serde_json::from_str(
            r#"{
                "type": "http://localhost:9000/ref/fouten/ValidationError/",
                "code": "invalid",
                "title": "Invalid input.",
                "status": 400,
                "invalidParams": [
                    {"name": "beginGeldigheid", "code": "overlap", "reason": "Overlap."}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(body.title, "Invalid input.");
        assert_eq!(body.invalid_params.len(), 1);
        assert_eq!(body.invalid_params[0].name, "beginGeldigheid");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError("the element with path naam is empty".to_string());
        assert_eq!(err.to_string(), "the element with path naam is empty");
    }
}
