//! Taxonomy-backed reference resolution
//!
//! Anchoring a result type in the Selectielijst starts from its "resultaat
//! number" (like `11.2`), which DSP exports hide in one of three places.
//! Extraction cascades through them; resolution then matches the number
//! against the cached taxonomy lists.

use crate::adapters::selectielijst::SelectielijstResolver;
use crate::core::parser::xml::{descend, optional_text};
use crate::core::session::ImportSession;
use crate::domain::vocab::DEFAULT_RESULTAATTYPE_OMSCHRIJVING;
use crate::domain::{ObjectTypeKey, ParseError};
use regex::Regex;
use roxmltree::Node;
use std::sync::OnceLock;

fn citation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^Resultaat (\d+\.\d+\.?\d*)").unwrap())
}

fn leading_number_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+\.\d+\.?\d*),").unwrap())
}

fn leading_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+\.\d+\.?\d*)").unwrap())
}

/// Extract the resultaat number from a `resultaattype` element
///
/// Three-stage fallback, each stage only tried when the previous one
/// produced nothing:
/// 1. the citation field inside `vernietigingsgrondslag`, pattern
///    `Resultaat <N.N[.N]>`;
/// 2. the `toelichting` free text, a leading number followed by a comma;
/// 3. the `opmerking` free text, a leading number.
///
/// Returns an empty string when all three fail.
pub fn resultaat_number(resultaattype: Node) -> String {
    if let Some(name) = citation_name(resultaattype) {
        if let Some(captures) = citation_re().captures(&name) {
            return captures[1].to_string();
        }
    }

    let toelichting = optional_text(resultaattype, "velden/toelichting");
    if let Some(captures) = leading_number_comma_re().captures(&toelichting) {
        return captures[1].to_string();
    }

    let opmerking = optional_text(resultaattype, "velden/opmerking");
    if let Some(captures) = leading_number_re().captures(&opmerking) {
        return captures[1].to_string();
    }

    String::new()
}

/// The citation field: `velden/vernietigingsgrondslag/list/fields/field`
/// with attribute `naam="NAAM"`
fn citation_name(resultaattype: Node) -> Option<String> {
    let fields = descend(resultaattype, "velden/vernietigingsgrondslag/list/fields")?;
    fields
        .children()
        .filter(|node| node.is_element() && node.has_tag_name("field"))
        .find(|field| field.attribute("naam") == Some("NAAM"))
        .and_then(|field| field.text())
        .map(str::to_string)
}

/// Resolve the Selectielijst process type for a case type
///
/// Uses the resultaat number of the FIRST result type: the integer before
/// the first dot is the process type code. An unresolvable case type gets an
/// empty reference and a warning so it can be reviewed; it is still parsed.
pub async fn resolve_procestype(
    session: &mut ImportSession,
    resolver: &SelectielijstResolver,
    log_scope: &str,
    proces: Node<'_, '_>,
    year: u16,
) -> Result<String, ParseError> {
    let Some(first) = descend(proces, "resultaattypen/resultaattype") else {
        session.log_warning(
            format!("{log_scope} has no resultaattypen to derive a procestype from"),
            Some(ObjectTypeKey::Zaaktypen),
        );
        return Ok(String::new());
    };

    let number = resultaat_number(first);
    if number.is_empty() {
        session.log_warning(
            format!(
                "{log_scope} cannot determine a resultaat number to derive the procestype from"
            ),
            Some(ObjectTypeKey::Zaaktypen),
        );
        return Ok(String::new());
    }

    let code: u32 = number
        .split('.')
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ParseError(format!("{log_scope} invalid resultaat number '{number}'")))?;

    let procestypen = resolver.procestypen(year).await.map_err(|e| {
        ParseError(format!(
            "{log_scope} cannot fetch procestypen from the Selectielijst API: {e}"
        ))
    })?;

    match procestypen.iter().find(|p| p.nummer == code) {
        Some(procestype) => Ok(procestype.url.clone()),
        None => {
            session.log_warning(
                format!(
                    "{log_scope} no procestype with number {code} in the {year} Selectielijst"
                ),
                Some(ObjectTypeKey::Zaaktypen),
            );
            Ok(String::new())
        }
    }
}

/// Resolve the Selectielijst resultaat for a result type
///
/// Matches both the full number and the already-resolved process type, so a
/// case type with an empty process-type reference can never silently match a
/// wrong definition.
pub async fn resolve_resultaat(
    resolver: &SelectielijstResolver,
    log_scope: &str,
    resultaattype: Node<'_, '_>,
    procestype: &str,
) -> Result<String, ParseError> {
    let number = resultaat_number(resultaattype);
    if number.is_empty() {
        return Err(ParseError(format!(
            "{log_scope} Imported \"resultaat\" does not contain a resultaat number to find a \
             matching entry in the Selectielijst API."
        )));
    }

    let resultaten = resolver.resultaten().await.map_err(|e| {
        ParseError(format!(
            "{log_scope} cannot fetch resultaten from the Selectielijst API: {e}"
        ))
    })?;

    resultaten
        .iter()
        .find(|r| r.volledig_nummer == number && r.proces_type == procestype)
        .map(|r| r.url.clone())
        .ok_or_else(|| {
            ParseError(format!(
                "{log_scope} Imported \"resultaat\" does not contain a valid combination of \
                 resultaat number ({number}) and processType ({procestype}) to match \
                 \"volledigNummer\" and \"procesType\" in the Selectielijst API."
            ))
        })
}

/// Resolve the generic result type description from the model name
///
/// A missing match substitutes the documented default reference without
/// logging; product decision.
pub async fn resolve_resultaattype_omschrijving(
    resolver: &SelectielijstResolver,
    log_scope: &str,
    resultaattype: Node<'_, '_>,
) -> Result<String, ParseError> {
    let omschrijving = optional_text(resultaattype, "velden/naam-model");

    let omschrijvingen = resolver.resultaattype_omschrijvingen().await.map_err(|e| {
        ParseError(format!(
            "{log_scope} cannot fetch resultaattypeomschrijvingen from the Selectielijst API: {e}"
        ))
    })?;

    Ok(omschrijvingen
        .iter()
        .find(|r| r.omschrijving == omschrijving)
        .map(|r| r.url.clone())
        .unwrap_or_else(|| DEFAULT_RESULTAATTYPE_OMSCHRIJVING.to_string()))
}
