//! Field normalization
//!
//! Pure functions turning raw DSP text values into typed values. Functions
//! that can fall back to a default report through the session with a log
//! scope naming the owning record, so every message is attributable to the
//! case type it came from.

use crate::core::session::ImportSession;
use crate::domain::ParseError;
use chrono::{NaiveDate, NaiveDateTime};

/// Convert a value plus a Dutch time unit into an ISO-8601 period
///
/// An unknown or empty unit yields a bare `P<value>`; an empty value yields
/// no period at all.
pub fn duration(value: &str, unit: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let iso_unit = match unit.to_lowercase().as_str() {
        "dag" => "D",
        "week" => "W",
        "maand" => "M",
        "jaar" => "Y",
        _ => "",
    };
    Some(format!("P{value}{iso_unit}"))
}

/// Dutch yes/no to bool; anything but "ja" is false
pub fn boolean(value: &str) -> bool {
    value.to_lowercase() == "ja"
}

/// Split a multi-value field on commas
///
/// The separator format is a guess; no populated example exists in the
/// source data.
pub fn array(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(|part| part.to_string()).collect()
}

/// Parse an ISO-8601 date or datetime, truncated to the calendar date
pub fn date(value: &str) -> Result<Option<NaiveDate>, ParseError> {
    if value.is_empty() {
        return Ok(None);
    }

    if let Ok(parsed) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Some(parsed));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(parsed.date()));
    }
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|parsed| Some(parsed.date_naive()))
        .map_err(|_| ParseError(format!("cannot parse '{value}' as an ISO-8601 date")))
}

/// Validate a value against a bounded choice set
///
/// The value is lowercased with spaces turned into underscores before
/// matching. Unmatched values fall through an explicit synonym table and
/// finally to the default, with a log entry whose level depends on whether
/// the field was required and whether a value was present at all.
pub fn choice(
    session: &mut ImportSession,
    log_scope: &str,
    value: &str,
    choices: &[&str],
    default: &str,
    extra_mapping: &[(&str, &str)],
    required: bool,
) -> String {
    let formatted = value.to_lowercase().replace(' ', "_");
    if choices.contains(&formatted.as_str()) {
        return formatted;
    }

    if let Some((_, mapped)) = extra_mapping
        .iter()
        .find(|(synonym, _)| *synonym == formatted)
    {
        return mapped.to_string();
    }

    if value.is_empty() {
        if required {
            session.log_error(
                format!(
                    "{log_scope} not defined but marked as required. If continued, this will \
                     be set as '{default}'"
                ),
                None,
            );
        } else {
            session.log_info(
                format!("{log_scope} not defined. It will be set as '{default}'"),
                None,
            );
        }
    } else {
        session.log_warning(
            format!(
                "{log_scope} cannot find '{formatted}' in options {}. It will be set as \
                 '{default}'",
                quote_join(choices)
            ),
            None,
        );
    }
    default.to_string()
}

/// Truncate to `max_len` characters and strip surrounding whitespace
///
/// Logs at info level when truncation actually changed the value.
pub fn trim(session: &mut ImportSession, log_scope: &str, value: &str, max_len: usize) -> String {
    let truncated: String = value.chars().take(max_len).collect();
    if truncated.chars().count() < value.chars().count() {
        session.log_info(
            format!(
                "{log_scope} value of {} characters truncated to {}",
                value.chars().count(),
                truncated.chars().count()
            ),
            None,
        );
    }
    truncated.trim().to_string()
}

/// Return the value if set, else log and return the default
pub fn value_or_default(
    session: &mut ImportSession,
    log_scope: &str,
    value: String,
    default: &str,
) -> String {
    if value.is_empty() {
        session.log_info(
            format!("{log_scope} not defined. It will be set as '{default}'"),
            None,
        );
        default.to_string()
    } else {
        value
    }
}

fn quote_join(values: &[&str]) -> String {
    let mut quoted: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
    quoted.sort();
    quoted.join(", ")
}
