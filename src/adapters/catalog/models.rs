//! Catalog API response models

use crate::domain::CatalogError;
use serde::Deserialize;
use serde_json::Value;

/// One page of a paginated catalog list response
#[derive(Debug, Clone, Deserialize)]
pub struct ListPage {
    #[serde(default)]
    pub count: u64,

    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub previous: Option<String>,

    #[serde(default)]
    pub results: Vec<Value>,
}

/// An existing resource in the catalog
///
/// Never constructed by this crate; always read from catalog responses. The
/// `concept` flag drives the three-way reconciliation decision: a concept is
/// still editable in place, a published resource needs a new version.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RemoteResource {
    pub url: String,

    #[serde(default)]
    pub concept: bool,
}

impl RemoteResource {
    /// Extract the resource envelope from a raw list result
    pub fn from_value(value: &Value) -> Result<Self, CatalogError> {
        serde_json::from_value(value.clone())
            .map_err(|e| CatalogError::InvalidResponse(format!("resource envelope: {e}")))
    }
}
