//! Selectielijst API response models
//!
//! Only the fields the resolver matches on are deserialized; the API
//! returns considerably more.

use serde::Deserialize;

/// A process type from the Selectielijst taxonomy
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Procestype {
    pub url: String,
    pub nummer: u32,

    #[serde(default)]
    pub naam: String,

    #[serde(default)]
    pub jaar: Option<u16>,
}

/// A result definition (`resultaat`) from the Selectielijst taxonomy
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resultaat {
    pub url: String,
    pub volledig_nummer: String,
    pub proces_type: String,

    #[serde(default)]
    pub naam: String,
}

/// A generic result type description from the Selectielijst taxonomy
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ResultaattypeOmschrijving {
    pub url: String,
    pub omschrijving: String,
}
