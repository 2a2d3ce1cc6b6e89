//! Log message and statistics formatting
//!
//! Renders catalog errors and counter snapshots into the one-line forms the
//! job log and the CLI tables use.

use crate::core::session::counter::Statistics;
use crate::domain::{CatalogError, InvalidParam, LogLevel, ObjectTypeKey, NON_FIELD_ERRORS};
use std::collections::BTreeMap;

/// Render a catalog error as a single human-readable line
///
/// Validation rejections with a structured payload are rendered from their
/// invalid parameters; a parameter named with the whole-object marker omits
/// the field annotation. Everything else falls back to the error's display
/// form.
pub fn format_exception(err: &CatalogError) -> String {
    match err {
        CatalogError::Api {
            body: Some(body), ..
        } if !body.invalid_params.is_empty() => {
            let title = body.title.trim_end_matches('.');
            if body.invalid_params.len() == 1 {
                format!("{title}: {}", format_invalid_param(&body.invalid_params[0]))
            } else {
                let parts: Vec<String> = body
                    .invalid_params
                    .iter()
                    .enumerate()
                    .map(|(i, param)| format!("{}) {}", i + 1, format_invalid_param(param)))
                    .collect();
                format!("{title}: {}", parts.join(" "))
            }
        }
        CatalogError::Api {
            body: Some(body), ..
        } if !body.title.is_empty() => body.title.trim_end_matches('.').to_string(),
        other => other.to_string(),
    }
}

fn format_invalid_param(param: &InvalidParam) -> String {
    if param.name == NON_FIELD_ERRORS {
        param.reason.clone()
    } else {
        let reason = param.reason.trim_end_matches('.');
        format!("{reason} ({}).", param.name)
    }
}

/// Format an issue map like `(2 warnings, 1 errors)`, empty when clean
pub fn format_issues(issues: &BTreeMap<LogLevel, u32>) -> String {
    let parts: Vec<String> = LogLevel::ALL
        .iter()
        .filter_map(|level| {
            issues
                .get(level)
                .map(|count| format!("{count} {}s", level.label()))
        })
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!("({})", parts.join(", "))
    }
}

/// Statistics rows for a precheck run: label, errored, counted, issues
pub fn transform_precheck_statistics(stats: &Statistics) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        String::new(),
        "errored".to_string(),
        "counted".to_string(),
        String::new(),
    ]];
    for key in ObjectTypeKey::ALL {
        let data = stats.get(key);
        rows.push(vec![
            key.label().to_string(),
            data.errored.to_string(),
            data.counted.to_string(),
            format_issues(&data.issues),
        ]);
    }
    rows
}

/// Statistics rows for an import run: label, updated, created, errored,
/// total, issues
pub fn transform_import_statistics(stats: &Statistics) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        String::new(),
        "updated".to_string(),
        "created".to_string(),
        "errored".to_string(),
        "total".to_string(),
        String::new(),
    ]];
    for key in ObjectTypeKey::ALL {
        let data = stats.get(key);
        rows.push(vec![
            key.label().to_string(),
            data.updated.to_string(),
            data.created.to_string(),
            data.errored.to_string(),
            data.counted.to_string(),
            format_issues(&data.issues),
        ]);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::counter::TypeCounter;
    use crate::domain::ApiErrorBody;

    fn api_error(title: &str, params: Vec<InvalidParam>) -> CatalogError {
        CatalogError::Api {
            status: 400,
            body: Some(ApiErrorBody {
                title: title.to_string(),
                code: Some("invalid".to_string()),
                invalid_params: params,
            }),
        }
    }

    fn param(name: &str, reason: &str) -> InvalidParam {
        InvalidParam {
            name: name.to_string(),
            code: None,
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_format_exception_single() {
        let err = api_error(
            "Invalid input.",
            vec![param(
                "beginGeldigheid",
                "Dit zaaktype komt al voor binnen de catalogus en opgegeven geldigheidsperiode.",
            )],
        );
        assert_eq!(
            format_exception(&err),
            "Invalid input: Dit zaaktype komt al voor binnen de catalogus en opgegeven \
             geldigheidsperiode (beginGeldigheid)."
        );
    }

    #[test]
    fn test_format_exception_single_whole_object() {
        let err = api_error("Error title.", vec![param(NON_FIELD_ERRORS, "Foo-bar-reason")]);
        assert_eq!(format_exception(&err), "Error title: Foo-bar-reason");
    }

    #[test]
    fn test_format_exception_multiple() {
        let err = api_error(
            "Invalid input.",
            vec![
                param(
                    "beginGeldigheid",
                    "Dit zaaktype komt al voor binnen de catalogus en opgegeven geldigheidsperiode.",
                ),
                param(
                    NON_FIELD_ERRORS,
                    "De velden catalogus, omschrijving moeten een unieke set zijn.",
                ),
            ],
        );
        assert_eq!(
            format_exception(&err),
            "Invalid input: 1) Dit zaaktype komt al voor binnen de catalogus en opgegeven \
             geldigheidsperiode (beginGeldigheid). 2) De velden catalogus, omschrijving moeten \
             een unieke set zijn."
        );
    }

    #[test]
    fn test_format_exception_api_error_without_params() {
        let err = api_error("Not found.", vec![]);
        assert_eq!(format_exception(&err), "Not found");
    }

    #[test]
    fn test_format_exception_generic_error() {
        let err = CatalogError::ConnectionFailed("problem".to_string());
        assert_eq!(
            format_exception(&err),
            "failed to connect to catalog API: problem"
        );
    }

    #[test]
    fn test_format_issues() {
        let mut issues = BTreeMap::new();
        issues.insert(LogLevel::Warning, 2);
        issues.insert(LogLevel::Error, 1);
        assert_eq!(format_issues(&issues), "(2 warnings, 1 errors)");
        assert_eq!(format_issues(&BTreeMap::new()), "");
    }

    #[test]
    fn test_transform_import_statistics() {
        let mut counter = TypeCounter::new();
        for _ in 0..10 {
            counter.increment_created(ObjectTypeKey::Resultaattypen);
        }
        for _ in 0..20 {
            counter.increment_updated(ObjectTypeKey::Resultaattypen);
        }
        for _ in 0..5 {
            counter.increment_errored(ObjectTypeKey::Resultaattypen);
        }
        for _ in 0..35 {
            counter.increment_counted(ObjectTypeKey::Resultaattypen);
        }
        counter.increment_issue(ObjectTypeKey::Resultaattypen, LogLevel::Warning);
        counter.increment_issue(ObjectTypeKey::Resultaattypen, LogLevel::Warning);
        counter.increment_issue(ObjectTypeKey::Resultaattypen, LogLevel::Error);

        let rows = transform_import_statistics(&counter.snapshot());
        assert_eq!(
            rows[0],
            vec!["", "updated", "created", "errored", "total", ""]
        );
        assert_eq!(
            rows[4],
            vec![
                "Resultaattypen",
                "20",
                "10",
                "5",
                "35",
                "(2 warnings, 1 errors)"
            ]
        );
        // untouched types render as zero rows
        assert_eq!(rows[1], vec!["Roltypen", "0", "0", "0", "0", ""]);
    }

    #[test]
    fn test_transform_precheck_statistics_empty() {
        let rows = transform_precheck_statistics(&Statistics::default());
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], vec!["", "errored", "counted", ""]);
        assert_eq!(rows[2], vec!["Zaaktypen", "0", "0", ""]);
    }
}
