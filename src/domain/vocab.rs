//! Controlled vocabularies of the catalog API
//!
//! Legal value sets for the bounded choice fields, plus the documented
//! defaults substituted when the export carries no usable value. The sets
//! mirror the ZTC API enumerations.

/// Confidentiality classifications (`vertrouwelijkheidaanduiding`)
pub const VERTROUWELIJKHEID: &[&str] = &[
    "openbaar",
    "beperkt_openbaar",
    "intern",
    "zaakvertrouwelijk",
    "vertrouwelijk",
    "confidentieel",
    "geheim",
    "zeer_geheim",
];

/// Generic role descriptions (`RolType.omschrijvingGeneriek`)
pub const ROL_OMSCHRIJVING: &[&str] = &[
    "adviseur",
    "behandelaar",
    "belanghebbende",
    "beslisser",
    "initiator",
    "klantcontacter",
    "zaakcoordinator",
    "mede_initiator",
];

/// Archive nominations (`ResultaatType.archiefnominatie`)
pub const ARCHIEFNOMINATIE: &[&str] = &["blijvend_bewaren", "vernietigen"];

/// Derivation methods for the archive start date
/// (`BrondatumArchiefprocedure.afleidingswijze`)
pub const AFLEIDINGSWIJZE: &[&str] = &[
    "afgehandeld",
    "ander_datumkenmerk",
    "eigenschap",
    "gerelateerde_zaak",
    "hoofdzaak",
    "ingangsdatum_besluit",
    "termijn",
    "vervaldatum_besluit",
    "zaakobject",
];

/// Document flow directions (`ZaakInformatieobjectType.richting`)
pub const RICHTING: &[&str] = &["inkomend", "intern", "uitgaand"];

/// Synonyms seen in DSP exports for archive nominations
pub const ARCHIEFNOMINATIE_SYNONYMS: &[(&str, &str)] = &[("bewaren", "blijvend_bewaren")];

pub const DEFAULT_VERTROUWELIJKHEID: &str = "openbaar";
pub const DEFAULT_ROL_OMSCHRIJVING: &str = "adviseur";
pub const DEFAULT_ARCHIEFNOMINATIE: &str = "blijvend_bewaren";
pub const DEFAULT_AFLEIDINGSWIJZE: &str = "afgehandeld";
pub const DEFAULT_RICHTING: &str = "intern";

/// Fallback when the export's `naam-model` has no matching
/// resultaattypeomschrijving in the Selectielijst API. Substituted without
/// logging per product decision.
pub const DEFAULT_RESULTAATTYPE_OMSCHRIJVING: &str =
    "https://selectielijst.openzaak.nl/api/v1/resultaattypeomschrijvingen/50060769-96b3-4993-ae6a-35ae5fd14604";

pub const DEFAULT_HANDELING_INITIATOR: &str = "n.v.t.";
pub const DEFAULT_AANLEIDING: &str = "n.v.t.";
pub const DEFAULT_ONDERWERP: &str = "n.v.t.";
pub const DEFAULT_HANDELING_BEHANDELAAR: &str = "n.v.t.";
