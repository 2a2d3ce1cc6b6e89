//! Domain models and types for zaakimport.
//!
//! This module contains the draft records the parser produces, the resource
//! type keys used for counting, the controlled vocabularies of the catalog
//! API and the error hierarchy.

pub mod drafts;
pub mod errors;
pub mod keys;
pub mod result;
pub mod vocab;

pub use drafts::{
    BrondatumArchiefprocedure, CaseDocumentLinkDraft, CaseTypeChildren, CaseTypeDraft,
    DocumentTypeDraft, Referentieproces, ResultDraft, RoleDraft, StatusDraft,
};
pub use errors::{
    ApiErrorBody, CatalogError, ImportError, InvalidParam, ParseError, SelectielijstError,
    NON_FIELD_ERRORS,
};
pub use keys::{LogLevel, ObjectTypeKey};
pub use result::Result;
