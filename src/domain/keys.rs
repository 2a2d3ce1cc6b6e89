//! Resource type keys and log levels
//!
//! The six resource types the importer tracks share a compact stable key
//! (used in persisted statistics) and a human-readable label (used in the
//! statistics tables).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key identifying one of the six imported resource types
///
/// Declaration order is the display order of the statistics tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ObjectTypeKey {
    /// Role types attached to a case type
    #[serde(rename = "rt")]
    Roltypen,

    /// Case types, the top-level imported definition
    #[serde(rename = "zt")]
    Zaaktypen,

    /// Status types attached to a case type
    #[serde(rename = "st")]
    Statustypen,

    /// Result types attached to a case type
    #[serde(rename = "rst")]
    Resultaattypen,

    /// Document types, shared across case types
    #[serde(rename = "iot")]
    Informatieobjecttypen,

    /// Case-type-to-document-type links
    #[serde(rename = "ziot")]
    Zaakinformatieobjecttypen,
}

impl ObjectTypeKey {
    /// All keys in display order
    pub const ALL: [ObjectTypeKey; 6] = [
        ObjectTypeKey::Roltypen,
        ObjectTypeKey::Zaaktypen,
        ObjectTypeKey::Statustypen,
        ObjectTypeKey::Resultaattypen,
        ObjectTypeKey::Informatieobjecttypen,
        ObjectTypeKey::Zaakinformatieobjecttypen,
    ];

    /// Human-readable label for statistics tables
    pub fn label(&self) -> &'static str {
        match self {
            ObjectTypeKey::Roltypen => "Roltypen",
            ObjectTypeKey::Zaaktypen => "Zaaktypen",
            ObjectTypeKey::Statustypen => "Statustypen",
            ObjectTypeKey::Resultaattypen => "Resultaattypen",
            ObjectTypeKey::Informatieobjecttypen => "Informatieobjecttypen",
            ObjectTypeKey::Zaakinformatieobjecttypen => "Zaakinformatieobjecttypen",
        }
    }
}

impl fmt::Display for ObjectTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity of a job log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// All levels in severity order
    pub const ALL: [LogLevel; 3] = [LogLevel::Info, LogLevel::Warning, LogLevel::Error];

    /// Lowercase label as used in issue summaries
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_type_key_serialized_form() {
        assert_eq!(
            serde_json::to_string(&ObjectTypeKey::Zaaktypen).unwrap(),
            "\"zt\""
        );
        assert_eq!(
            serde_json::to_string(&ObjectTypeKey::Zaakinformatieobjecttypen).unwrap(),
            "\"ziot\""
        );
    }

    #[test]
    fn test_object_type_key_display_order() {
        let labels: Vec<&str> = ObjectTypeKey::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            [
                "Roltypen",
                "Zaaktypen",
                "Statustypen",
                "Resultaattypen",
                "Informatieobjecttypen",
                "Zaakinformatieobjecttypen",
            ]
        );
    }

    #[test]
    fn test_log_level_serialized_form() {
        assert_eq!(serde_json::to_string(&LogLevel::Warning).unwrap(), "\"warning\"");
    }
}
