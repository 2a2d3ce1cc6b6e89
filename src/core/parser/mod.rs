//! DSP export parser
//!
//! Walks the XML tree and produces normalized draft records: one
//! [`CaseTypeDraft`] per `proces` element plus the run-wide deduplicated
//! [`DocumentTypeDraft`] list. Failures are isolated per record: a failing
//! case type is skipped whole, a failing child element only skips itself.
//! Every attempted record increments its type's `counted` statistic exactly
//! once, whatever the outcome.

pub mod resolve;
pub mod xml;

use crate::adapters::selectielijst::SelectielijstResolver;
use crate::core::normalize;
use crate::core::session::ImportSession;
use crate::domain::vocab::{
    ARCHIEFNOMINATIE, ARCHIEFNOMINATIE_SYNONYMS, AFLEIDINGSWIJZE, DEFAULT_AANLEIDING,
    DEFAULT_AFLEIDINGSWIJZE, DEFAULT_ARCHIEFNOMINATIE, DEFAULT_HANDELING_BEHANDELAAR,
    DEFAULT_HANDELING_INITIATOR, DEFAULT_ONDERWERP, DEFAULT_RICHTING, DEFAULT_ROL_OMSCHRIJVING,
    DEFAULT_VERTROUWELIJKHEID, RICHTING, ROL_OMSCHRIJVING, VERTROUWELIJKHEID,
};
use crate::domain::{
    BrondatumArchiefprocedure, CaseDocumentLinkDraft, CaseTypeChildren, CaseTypeDraft,
    DocumentTypeDraft, ImportError, ObjectTypeKey, ParseError, Referentieproces, ResultDraft,
    RoleDraft, StatusDraft,
};
use roxmltree::{Document, Node};
use std::collections::HashMap;
use xml::{child, children, optional_text, required_text};

/// Version prefix of DSP exports this parser understands
pub const SUPPORTED_VERSION_PREFIX: &str = "ICR1.5";

/// Verify the document is a DSP export of a supported version
///
/// Both failures are fatal for the whole run and happen before any record
/// is parsed.
pub fn check_format(doc: &Document) -> Result<(), ImportError> {
    let root = doc.root_element();
    if !root.has_tag_name("dsp") {
        return Err(ImportError::UnsupportedFormat);
    }

    let version = root.attribute("versie").unwrap_or_default();
    if !version.starts_with(SUPPORTED_VERSION_PREFIX) {
        return Err(ImportError::UnsupportedVersion(version.to_string()));
    }
    Ok(())
}

/// Parse all case types and document types out of a DSP document
pub async fn parse_xml(
    session: &mut ImportSession,
    resolver: &SelectielijstResolver,
    doc: &Document<'_>,
) -> (Vec<CaseTypeDraft>, Vec<DocumentTypeDraft>) {
    let year = session.options().year;
    let mut zaaktypen: Vec<CaseTypeDraft> = Vec::new();
    let mut iotypen: Vec<DocumentTypeDraft> = Vec::new();
    let mut iotypen_index: HashMap<String, usize> = HashMap::new();

    let Some(processen) = child(doc.root_element(), "processen") else {
        return (zaaktypen, iotypen);
    };

    for proces in children(processen, "proces") {
        let identificatie = proces.attribute("id").unwrap_or_default();
        let log_scope = format!("zaaktype {identificatie}:");

        session
            .counter_mut()
            .increment_counted(ObjectTypeKey::Zaaktypen);
        let mut zaaktype = match build_case_type(session, resolver, &log_scope, proces, year).await
        {
            Ok(draft) => draft,
            Err(err) => {
                session
                    .counter_mut()
                    .increment_errored(ObjectTypeKey::Zaaktypen);
                session.log_error(
                    format!("{log_scope} Imported zaaktype cannot be parsed: {err}"),
                    Some(ObjectTypeKey::Zaaktypen),
                );
                continue;
            }
        };

        let mut roltypen = Vec::new();
        if let Some(container) = child(proces, "roltypen") {
            for roltype in children(container, "roltype") {
                session
                    .counter_mut()
                    .increment_counted(ObjectTypeKey::Roltypen);
                match build_role(session, &log_scope, roltype) {
                    Ok(draft) => roltypen.push(draft),
                    Err(err) => {
                        session
                            .counter_mut()
                            .increment_errored(ObjectTypeKey::Roltypen);
                        session.log_error(
                            format!(
                                "{log_scope} Imported roltype '{}' cannot be parsed: {err}",
                                roltype.attribute("omschrijving").unwrap_or_default()
                            ),
                            Some(ObjectTypeKey::Roltypen),
                        );
                    }
                }
            }
        }

        let mut statustypen = Vec::new();
        if let Some(container) = child(proces, "statustypen") {
            for statustype in children(container, "statustype") {
                session
                    .counter_mut()
                    .increment_counted(ObjectTypeKey::Statustypen);
                match build_status(statustype) {
                    Ok(draft) => statustypen.push(draft),
                    Err(err) => {
                        session
                            .counter_mut()
                            .increment_errored(ObjectTypeKey::Statustypen);
                        session.log_error(
                            format!(
                                "{log_scope} Imported statustype '{}' cannot be parsed: {err}",
                                statustype.attribute("volgnummer").unwrap_or_default()
                            ),
                            Some(ObjectTypeKey::Statustypen),
                        );
                    }
                }
            }
        }

        let mut resultaattypen = Vec::new();
        if let Some(container) = child(proces, "resultaattypen") {
            for resultaattype in children(container, "resultaattype") {
                session
                    .counter_mut()
                    .increment_counted(ObjectTypeKey::Resultaattypen);
                match build_result(
                    session,
                    resolver,
                    &log_scope,
                    resultaattype,
                    &zaaktype.selectielijst_procestype,
                )
                .await
                {
                    Ok(draft) => resultaattypen.push(draft),
                    Err(err) => {
                        session
                            .counter_mut()
                            .increment_errored(ObjectTypeKey::Resultaattypen);
                        session.log_error(
                            format!(
                                "{log_scope} Imported resultaattype '{}' cannot be parsed: {err}",
                                resultaattype.attribute("id").unwrap_or_default()
                            ),
                            Some(ObjectTypeKey::Resultaattypen),
                        );
                    }
                }
            }
        }

        let mut proces_iotypen = Vec::new();
        if let Some(container) = child(proces, "documenttypen") {
            for documenttype in children(container, "documenttype") {
                session
                    .counter_mut()
                    .increment_counted(ObjectTypeKey::Informatieobjecttypen);
                match build_document_type(session, &log_scope, documenttype) {
                    Ok(draft) => proces_iotypen.push(draft),
                    Err(err) => {
                        session
                            .counter_mut()
                            .increment_errored(ObjectTypeKey::Informatieobjecttypen);
                        session.log_error(
                            format!(
                                "{log_scope} Imported documenttype '{}' cannot be parsed: {err}",
                                documenttype.attribute("omschrijving").unwrap_or_default()
                            ),
                            Some(ObjectTypeKey::Informatieobjecttypen),
                        );
                    }
                }
            }
        }

        let mut zaakinformatieobjecttypen = Vec::new();
        if let Some(container) = child(proces, "documenttypen") {
            for documenttype in children(container, "documenttype") {
                session
                    .counter_mut()
                    .increment_counted(ObjectTypeKey::Zaakinformatieobjecttypen);
                match build_document_link(session, &log_scope, documenttype) {
                    Ok(draft) => zaakinformatieobjecttypen.push(draft),
                    Err(err) => {
                        session
                            .counter_mut()
                            .increment_errored(ObjectTypeKey::Zaakinformatieobjecttypen);
                        session.log_error(
                            format!(
                                "{log_scope} Imported documenttype-zaaktype relatie '{}' cannot \
                                 be parsed: {err}",
                                documenttype.attribute("volgnummer").unwrap_or_default()
                            ),
                            Some(ObjectTypeKey::Zaakinformatieobjecttypen),
                        );
                    }
                }
            }
        }

        zaaktype.children = CaseTypeChildren {
            roltypen,
            statustypen,
            resultaattypen,
            zaakinformatieobjecttypen,
        };
        zaaktypen.push(zaaktype);

        for iotype in proces_iotypen {
            dedupe_document_type(session, &log_scope, &mut iotypen, &mut iotypen_index, iotype);
        }
    }

    (zaaktypen, iotypen)
}

/// Merge a document type into the run-wide list, deduplicating by name
///
/// A later occurrence with different content is discarded with a warning
/// only when the kept record has a validity start; otherwise the later
/// occurrence overwrites silently. This mirrors the source business rule
/// as-is; see DESIGN.md for the open question around the asymmetry.
fn dedupe_document_type(
    session: &mut ImportSession,
    log_scope: &str,
    iotypen: &mut Vec<DocumentTypeDraft>,
    index: &mut HashMap<String, usize>,
    draft: DocumentTypeDraft,
) {
    match index.get(&draft.omschrijving) {
        Some(&kept_at) => {
            let kept = &iotypen[kept_at];
            if *kept != draft && kept.begin_geldigheid.is_some() {
                session.log_warning(
                    format!(
                        "{log_scope} Skipping creation of \"Informatieobjectype\" ({0}): Import \
                         contains multiple \"documenttypen\" with the same omschrijving ({0})",
                        draft.omschrijving
                    ),
                    Some(ObjectTypeKey::Informatieobjecttypen),
                );
            } else {
                iotypen[kept_at] = draft;
            }
        }
        None => {
            index.insert(draft.omschrijving.clone(), iotypen.len());
            iotypen.push(draft);
        }
    }
}

async fn build_case_type(
    session: &mut ImportSession,
    resolver: &SelectielijstResolver,
    log_scope: &str,
    proces: Node<'_, '_>,
    year: u16,
) -> Result<CaseTypeDraft, ParseError> {
    let identificatie = proces.attribute("id").unwrap_or_default().to_string();
    if identificatie.is_empty() {
        return Err(ParseError(
            "the proces element has no id attribute".to_string(),
        ));
    }
    let fields = child(proces, "velden")
        .ok_or_else(|| ParseError("the element with path velden is empty".to_string()))?;

    let indicatie_intern_of_extern = if optional_text(fields, "zaaktype-categorie")
        .to_lowercase()
        .contains("extern")
    {
        "extern"
    } else {
        "intern"
    }
    .to_string();

    let handeling_initiator = normalize::value_or_default(
        session,
        &format!("{log_scope} handelingInitiator"),
        optional_text(fields, "zaaktype-naam/structuur/handeling-initiator"),
        DEFAULT_HANDELING_INITIATOR,
    );
    let aanleiding = normalize::value_or_default(
        session,
        &format!("{log_scope} aanleiding"),
        optional_text(fields, "aanleiding"),
        DEFAULT_AANLEIDING,
    );
    let onderwerp = normalize::value_or_default(
        session,
        &format!("{log_scope} onderwerp"),
        optional_text(fields, "zaaktype-naam/structuur/onderwerp"),
        DEFAULT_ONDERWERP,
    );
    let handeling_behandelaar = normalize::value_or_default(
        session,
        &format!("{log_scope} handeling_behandelaar"),
        optional_text(fields, "zaaktype-naam/structuur/handeling-behandelaar"),
        DEFAULT_HANDELING_BEHANDELAAR,
    );

    let servicenorm = normalize::duration(
        &required_text(fields, "afdoeningstermijn")?,
        &required_text(fields, "afdoeningstermijn-eenheid")?,
    );
    let mut doorlooptijd = normalize::duration(
        &optional_text(fields, "wettelijke-afdoeningstermijn"),
        &optional_text(fields, "wettelijke-afdoeningstermijn-eenheid"),
    );
    if doorlooptijd.is_none() {
        doorlooptijd = normalize::duration(
            &required_text(fields, "afdoeningstermijn")?,
            &required_text(fields, "afdoeningstermijn-eenheid")?,
        );
        session.log_warning(
            format!(
                "{log_scope} Used \"afdoeningstermijn\" ({}) for \"Zaaktype.doorlooptijd\": \
                 Import has no value for \"wettelijke-afdoeningstermijn\".",
                doorlooptijd.as_deref().unwrap_or_default()
            ),
            None,
        );
    }

    // the export has no verlengingstermijn, and the catalog API rejects
    // verlengingMogelijk without one
    let mut verlenging_mogelijk = normalize::boolean(&required_text(fields, "beroep-mogelijk")?);
    if verlenging_mogelijk {
        session.log_error(
            format!(
                "{log_scope} Cannot set \"Zaaktype.verlengingMogelijk\" to True: Import \
                 indicated \"beroep-mogelijk\" is True but the catalog requires \
                 \"Zaaktype.verlengingstermijn\" to be filled when \
                 \"Zaaktype.verlengingMogelijk\" is True."
            ),
            None,
        );
        verlenging_mogelijk = false;
    }

    let vertrouwelijkheidaanduiding = normalize::choice(
        session,
        &format!("{log_scope} vertrouwelijkheidaanduiding"),
        &optional_text(fields, "vertrouwelijkheid"),
        VERTROUWELIJKHEID,
        DEFAULT_VERTROUWELIJKHEID,
        &[],
        true,
    );

    let selectielijst_procestype =
        resolve::resolve_procestype(session, resolver, log_scope, proces, year).await?;

    let versiedatum = normalize::date(&required_text(fields, "actueel-van")?)?
        .ok_or_else(|| ParseError("the element with path actueel-van is empty".to_string()))?;

    Ok(CaseTypeDraft {
        identificatie,
        omschrijving: required_text(fields, "kernomschrijving")?,
        omschrijving_generiek: optional_text(fields, "model-kernomschrijving"),
        vertrouwelijkheidaanduiding,
        doel: required_text(fields, "naam")?,
        aanleiding,
        toelichting: optional_text(fields, "toelichting-proces"),
        indicatie_intern_of_extern,
        handeling_initiator,
        onderwerp,
        handeling_behandelaar,
        doorlooptijd,
        opschorting_en_aanhouding_mogelijk: normalize::boolean(&optional_text(
            fields,
            "aanhouden-mogelijk",
        )),
        verlenging_mogelijk,
        trefwoorden: normalize::array(&optional_text(fields, "lokale-trefwoorden")),
        publicatie_indicatie: normalize::boolean(&optional_text(fields, "publicatie-indicatie")),
        publicatietekst: optional_text(fields, "publicatietekst"),
        verantwoordingsrelatie: normalize::array(&optional_text(fields, "verantwoordingsrelatie")),
        selectielijst_procestype,
        referentieproces: Referentieproces {
            naam: required_text(fields, "ztc-procestype")?,
        },
        begin_geldigheid: session.options().start_date,
        einde_geldigheid: None,
        versiedatum,
        servicenorm,
        producten_of_diensten: Vec::new(),
        gerelateerde_zaaktypen: Vec::new(),
        besluittypen: Vec::new(),
        children: CaseTypeChildren::default(),
    })
}

fn build_role(
    session: &mut ImportSession,
    log_scope: &str,
    roltype: Node,
) -> Result<RoleDraft, ParseError> {
    let fields = child(roltype, "velden")
        .ok_or_else(|| ParseError("the element with path velden is empty".to_string()))?;
    Ok(RoleDraft {
        omschrijving: required_text(fields, "naam")?,
        omschrijving_generiek: normalize::choice(
            session,
            &format!("{log_scope} omschrijvingGeneriek"),
            &optional_text(fields, "naam-model"),
            ROL_OMSCHRIJVING,
            DEFAULT_ROL_OMSCHRIJVING,
            &[],
            false,
        ),
    })
}

fn build_status(statustype: Node) -> Result<StatusDraft, ParseError> {
    let fields = child(statustype, "velden")
        .ok_or_else(|| ParseError("the element with path velden is empty".to_string()))?;
    Ok(StatusDraft {
        volgnummer: sequence_number(statustype)?,
        omschrijving: required_text(fields, "naam")?,
        omschrijving_generiek: optional_text(fields, "naam-model"),
        statustekst: optional_text(fields, "bericht"),
    })
}

async fn build_result(
    session: &mut ImportSession,
    resolver: &SelectielijstResolver,
    log_scope: &str,
    resultaattype: Node<'_, '_>,
    procestype: &str,
) -> Result<ResultDraft, ParseError> {
    let fields = child(resultaattype, "velden")
        .ok_or_else(|| ParseError("the element with path velden is empty".to_string()))?;
    let toelichting = optional_text(fields, "toelichting");

    let afleidingswijze = normalize::choice(
        session,
        &format!("{log_scope} afleidingswijze"),
        &optional_text(fields, "brondatum-archiefprocedure"),
        AFLEIDINGSWIJZE,
        DEFAULT_AFLEIDINGSWIJZE,
        &[],
        false,
    );

    let datumkenmerk = if afleidingswijze == "afgehandeld" {
        String::new()
    } else if let Some((prefix, _)) = toelichting.split_once(':') {
        prefix.to_string()
    } else {
        toelichting
            .rsplit(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string()
    };
    let datumkenmerk = normalize::trim(
        session,
        &format!("{log_scope} datumkenmerk"),
        &datumkenmerk,
        80,
    );

    let omschrijving = normalize::trim(
        session,
        &format!("{log_scope} resultaattype omschrijving"),
        &required_text(fields, "naam")?,
        20,
    );

    let mut brondatum = BrondatumArchiefprocedure {
        afleidingswijze: afleidingswijze.clone(),
        datumkenmerk,
        // fixed values, the catalog API rejects the block without them
        einddatum_bekend: false,
        objecttype: String::new(),
        registratie: String::new(),
        procestermijn: None,
    };
    if afleidingswijze == "ander_datumkenmerk" {
        brondatum.objecttype = "overige".to_string();
        brondatum.registratie = "TODO".to_string();
        session.log_info(
            format!(
                "{log_scope} resultaattype '{omschrijving}' doesn't have \
                 brondatumArchiefprocedure.objecttype. It will be set as 'overige'"
            ),
            Some(ObjectTypeKey::Resultaattypen),
        );
        session.log_info(
            format!(
                "{log_scope} resultaattype '{omschrijving}' doesn't have \
                 brondatumArchiefprocedure.registratie. It will be set as 'TODO'"
            ),
            Some(ObjectTypeKey::Resultaattypen),
        );
    }

    Ok(ResultDraft {
        resultaattypeomschrijving: resolve::resolve_resultaattype_omschrijving(
            resolver,
            log_scope,
            resultaattype,
        )
        .await?,
        selectielijstklasse: resolve::resolve_resultaat(
            resolver,
            log_scope,
            resultaattype,
            procestype,
        )
        .await?,
        omschrijving,
        toelichting,
        archiefnominatie: normalize::choice(
            session,
            &format!("{log_scope} archiefnominatie"),
            &optional_text(fields, "waardering"),
            ARCHIEFNOMINATIE,
            DEFAULT_ARCHIEFNOMINATIE,
            ARCHIEFNOMINATIE_SYNONYMS,
            false,
        ),
        archiefactietermijn: normalize::duration(
            &optional_text(fields, "bewaartermijn"),
            &optional_text(fields, "bewaartermijn-eenheid"),
        ),
        brondatum_archiefprocedure: brondatum,
    })
}

fn build_document_type(
    session: &mut ImportSession,
    log_scope: &str,
    documenttype: Node,
) -> Result<DocumentTypeDraft, ParseError> {
    let fields = child(documenttype, "velden")
        .ok_or_else(|| ParseError("the element with path velden is empty".to_string()))?;

    let omschrijving = normalize::trim(
        session,
        &format!("{log_scope} iotype"),
        &required_text(fields, "naam")?,
        80,
    );
    let scope = format!("{log_scope} iotype '{omschrijving}'");

    Ok(DocumentTypeDraft {
        vertrouwelijkheidaanduiding: normalize::choice(
            session,
            &format!("{scope} vertrouwelijkheidaanduiding"),
            &optional_text(fields, "vertrouwelijkheid"),
            VERTROUWELIJKHEID,
            DEFAULT_VERTROUWELIJKHEID,
            &[],
            false,
        ),
        begin_geldigheid: normalize::date(&optional_text(fields, "actueel-van"))?,
        einde_geldigheid: normalize::date(&optional_text(fields, "actueel-tot"))?,
        omschrijving,
    })
}

fn build_document_link(
    session: &mut ImportSession,
    log_scope: &str,
    documenttype: Node,
) -> Result<CaseDocumentLinkDraft, ParseError> {
    let fields = child(documenttype, "velden")
        .ok_or_else(|| ParseError("the element with path velden is empty".to_string()))?;
    Ok(CaseDocumentLinkDraft {
        informatieobjecttype_omschrijving: normalize::trim(
            session,
            &format!("{log_scope} ziotype"),
            &required_text(fields, "naam")?,
            80,
        ),
        volgnummer: sequence_number(documenttype)?,
        richting: normalize::choice(
            session,
            &format!("{log_scope} richting"),
            &optional_text(fields, "type"),
            RICHTING,
            DEFAULT_RICHTING,
            &[],
            false,
        ),
    })
}

fn sequence_number(node: Node) -> Result<u32, ParseError> {
    let raw = node.attribute("volgnummer").unwrap_or_default();
    raw.parse().map_err(|_| {
        ParseError(format!(
            "the volgnummer attribute '{raw}' is not a valid sequence number"
        ))
    })
}
