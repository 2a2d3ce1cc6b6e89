//! Draft records produced by the parser
//!
//! A draft is the normalized, in-memory form of one XML record, ready to be
//! serialized as a catalog API request body. Drafts are built once by the
//! parser and never mutated afterwards; the loader injects the parent
//! references (`catalogus`, `zaaktype`, `informatieobjecttype`) that are only
//! known at synchronization time.
//!
//! Serialized field names follow the ZTC API (camelCase Dutch).

use chrono::NaiveDate;
use serde::Serialize;

/// Top-level case type definition, one per `proces` element
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaseTypeDraft {
    /// External natural key (the `id` attribute of the `proces` element)
    pub identificatie: String,
    pub omschrijving: String,
    pub omschrijving_generiek: String,
    pub vertrouwelijkheidaanduiding: String,
    pub doel: String,
    pub aanleiding: String,
    pub toelichting: String,
    pub indicatie_intern_of_extern: String,
    pub handeling_initiator: String,
    pub onderwerp: String,
    pub handeling_behandelaar: String,
    pub doorlooptijd: Option<String>,
    pub opschorting_en_aanhouding_mogelijk: bool,
    pub verlenging_mogelijk: bool,
    pub trefwoorden: Vec<String>,
    pub publicatie_indicatie: bool,
    pub publicatietekst: String,
    pub verantwoordingsrelatie: Vec<String>,
    /// Resolved Selectielijst process type URL; empty when resolution failed
    pub selectielijst_procestype: String,
    pub referentieproces: Referentieproces,
    pub begin_geldigheid: NaiveDate,
    pub einde_geldigheid: Option<NaiveDate>,
    pub versiedatum: NaiveDate,
    pub servicenorm: Option<String>,
    pub producten_of_diensten: Vec<String>,
    pub gerelateerde_zaaktypen: Vec<String>,
    pub besluittypen: Vec<String>,

    /// Child collections, loaded after the case type itself
    #[serde(skip)]
    pub children: CaseTypeChildren,
}

/// Reference process block of a case type
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Referentieproces {
    pub naam: String,
}

/// The four ordered child collections of a case type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseTypeChildren {
    pub roltypen: Vec<RoleDraft>,
    pub statustypen: Vec<StatusDraft>,
    pub resultaattypen: Vec<ResultDraft>,
    pub zaakinformatieobjecttypen: Vec<CaseDocumentLinkDraft>,
}

/// Role type attached to a case type, matched remotely by `omschrijving`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleDraft {
    pub omschrijving: String,
    pub omschrijving_generiek: String,
}

/// Status type attached to a case type, matched remotely by `volgnummer`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusDraft {
    pub volgnummer: u32,
    pub omschrijving: String,
    pub omschrijving_generiek: String,
    pub statustekst: String,
}

/// Result type attached to a case type, matched remotely by `omschrijving`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultDraft {
    pub omschrijving: String,
    /// Resolved resultaattypeomschrijving URL
    pub resultaattypeomschrijving: String,
    /// Resolved Selectielijst resultaat URL
    pub selectielijstklasse: String,
    pub toelichting: String,
    pub archiefnominatie: String,
    pub archiefactietermijn: Option<String>,
    pub brondatum_archiefprocedure: BrondatumArchiefprocedure,
}

/// Archive start date derivation block of a result type
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrondatumArchiefprocedure {
    pub afleidingswijze: String,
    pub datumkenmerk: String,
    pub einddatum_bekend: bool,
    pub objecttype: String,
    pub registratie: String,
    pub procestermijn: Option<String>,
}

/// Document type, shared across case types, deduplicated run-wide by name
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypeDraft {
    pub omschrijving: String,
    pub vertrouwelijkheidaanduiding: String,
    /// Validity start; backfilled with the run's start date when absent
    pub begin_geldigheid: Option<NaiveDate>,
    pub einde_geldigheid: Option<NaiveDate>,
}

/// Link between a case type and a document type
///
/// Carries the document type's name; the loader swaps it for the remote URL
/// once all document types are reconciled.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaseDocumentLinkDraft {
    #[serde(skip)]
    pub informatieobjecttype_omschrijving: String,
    pub volgnummer: u32,
    pub richting: String,
}
