//! Catalog synchronization
//!
//! Reconciles parsed drafts against the remote catalog. Document types go
//! first (they are shared), then each case type with its four child
//! collections. Matching is by natural key; the decision per resource is
//! three-way: create when absent, update in place when a concept exists,
//! close-and-replace when a published version exists.
//!
//! There is no cross-record transaction: a failure leaves the catalog
//! partially updated and the run continues with the next record.

use crate::adapters::catalog::{CatalogClient, RemoteResource, UniqueMatch};
use crate::core::session::format::format_exception;
use crate::core::session::ImportSession;
use crate::domain::{CaseTypeDraft, CatalogError, DocumentTypeDraft, ObjectTypeKey};
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

/// Counter flush cadence inside large collections, so progress polling sees
/// incremental movement on long batches
const FLUSH_OBJECTS: usize = 10;

/// Per-record load failure
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The natural key matched more than one remote resource
    #[error("found multiple conflicting resources")]
    Ambiguous,

    /// A document link references a name that never made it to the catalog
    #[error("unknown informatieobjecttype '{0}'")]
    UnknownDocumentType(String),

    #[error("cannot serialize request body: {0}")]
    Body(String),
}

impl LoadError {
    /// One-line human-readable form for the job log
    fn describe(&self) -> String {
        match self {
            LoadError::Catalog(err) => format_exception(err),
            other => other.to_string(),
        }
    }
}

/// Per-child-type reconciliation configuration
///
/// One generic function handles all four child collections; this struct
/// carries what differs per type.
pub struct ChildSpec {
    /// Singular resource name, used in log lines
    pub resource: &'static str,

    /// Collection path under the API root
    pub path: &'static str,

    pub type_key: ObjectTypeKey,

    /// Field the remote children are matched on
    pub match_field: &'static str,
}

const ROLTYPE_SPEC: ChildSpec = ChildSpec {
    resource: "roltype",
    path: "roltypen",
    type_key: ObjectTypeKey::Roltypen,
    match_field: "omschrijving",
};
const STATUSTYPE_SPEC: ChildSpec = ChildSpec {
    resource: "statustype",
    path: "statustypen",
    type_key: ObjectTypeKey::Statustypen,
    match_field: "volgnummer",
};
const RESULTAATTYPE_SPEC: ChildSpec = ChildSpec {
    resource: "resultaattype",
    path: "resultaattypen",
    type_key: ObjectTypeKey::Resultaattypen,
    match_field: "omschrijving",
};
const ZAAKINFORMATIEOBJECTTYPE_SPEC: ChildSpec = ChildSpec {
    resource: "zaakinformatieobjecttype",
    path: "zaaktype-informatieobjecttypen",
    type_key: ObjectTypeKey::Zaakinformatieobjecttypen,
    match_field: "volgnummer",
};

/// Load all parsed drafts into the catalog
///
/// Document types are reconciled first to build the name-to-URL map the
/// document links need; a failure to fetch the existing document types
/// aborts the load (nothing else can proceed without the map).
pub async fn load_data(
    session: &mut ImportSession,
    client: &CatalogClient,
    zaaktypen: Vec<CaseTypeDraft>,
    iotypen: Vec<DocumentTypeDraft>,
) {
    let iotype_urls = match update_informatieobjecttypen(session, client, &iotypen).await {
        Ok(urls) => urls,
        Err(err) => {
            session.log_error(
                format!("informatieobjecttypen can't be created: {}", err.describe()),
                Some(ObjectTypeKey::Informatieobjecttypen),
            );
            return;
        }
    };

    for zaaktype in zaaktypen {
        let log_scope = format!("zaaktype {}:", zaaktype.identificatie);

        let remote = match update_zaaktype(session, client, &zaaktype).await {
            Ok(remote) => remote,
            Err(err) => {
                session
                    .counter_mut()
                    .increment_errored(ObjectTypeKey::Zaaktypen);
                session.log_error(
                    format!("{log_scope} can't be created: {}", err.describe()),
                    Some(ObjectTypeKey::Zaaktypen),
                );
                continue;
            }
        };
        session.flush_counts();

        let zaaktype_url = remote["url"].as_str().unwrap_or_default().to_string();
        let children = zaaktype.children;

        let role_bodies = to_bodies(&children.roltypen);
        update_zaaktype_children(session, client, &log_scope, role_bodies, &zaaktype_url, &ROLTYPE_SPEC)
            .await;

        let status_bodies = to_bodies(&children.statustypen);
        update_zaaktype_children(
            session,
            client,
            &log_scope,
            status_bodies,
            &zaaktype_url,
            &STATUSTYPE_SPEC,
        )
        .await;

        let result_bodies = to_bodies(&children.resultaattypen);
        update_zaaktype_children(
            session,
            client,
            &log_scope,
            result_bodies,
            &zaaktype_url,
            &RESULTAATTYPE_SPEC,
        )
        .await;

        let link_bodies = resolve_link_bodies(
            session,
            &log_scope,
            &children.zaakinformatieobjecttypen,
            &iotype_urls,
        );
        update_zaaktype_children(
            session,
            client,
            &log_scope,
            link_bodies,
            &zaaktype_url,
            &ZAAKINFORMATIEOBJECTTYPE_SPEC,
        )
        .await;
    }
}

fn to_bodies<T: serde::Serialize>(drafts: &[T]) -> Vec<Value> {
    drafts
        .iter()
        .filter_map(|draft| serde_json::to_value(draft).ok())
        .collect()
}

/// Swap each link's document type name for its remote URL
///
/// A name missing from the map means the document type never made it to the
/// catalog; the link fails as a single record and its siblings continue.
fn resolve_link_bodies(
    session: &mut ImportSession,
    log_scope: &str,
    links: &[crate::domain::CaseDocumentLinkDraft],
    iotype_urls: &HashMap<String, String>,
) -> Vec<Value> {
    let mut bodies = Vec::new();
    for link in links {
        match iotype_urls.get(&link.informatieobjecttype_omschrijving) {
            Some(url) => {
                if let Ok(mut body) = serde_json::to_value(link) {
                    body["informatieobjecttype"] = json!(url);
                    bodies.push(body);
                }
            }
            None => {
                session
                    .counter_mut()
                    .increment_errored(ObjectTypeKey::Zaakinformatieobjecttypen);
                session.log_error(
                    format!(
                        "{log_scope} zaakinformatieobjecttype volgnummer='{}' can't be created: {}",
                        link.volgnummer,
                        LoadError::UnknownDocumentType(
                            link.informatieobjecttype_omschrijving.clone()
                        )
                        .describe()
                    ),
                    Some(ObjectTypeKey::Zaakinformatieobjecttypen),
                );
            }
        }
    }
    bodies
}

/// Reconcile a single case type by its `identificatie`
async fn update_zaaktype(
    session: &mut ImportSession,
    client: &CatalogClient,
    draft: &CaseTypeDraft,
) -> Result<Value, LoadError> {
    let log_scope = format!("zaaktype {}", draft.identificatie);
    let catalog_url = session.options().catalog_url.clone();

    let mut body = serde_json::to_value(draft).map_err(|e| LoadError::Body(e.to_string()))?;
    body["catalogus"] = json!(catalog_url);

    let remote = match client
        .find_unique(
            "zaaktypen",
            &[
                ("identificatie", draft.identificatie.as_str()),
                ("catalogus", catalog_url.as_str()),
                ("status", "alles"),
            ],
        )
        .await?
    {
        UniqueMatch::None => None,
        UniqueMatch::One(remote) => Some(remote),
        UniqueMatch::Multiple(_) => return Err(LoadError::Ambiguous),
    };

    upsert_versioned(
        session,
        client,
        "zaaktypen",
        ObjectTypeKey::Zaaktypen,
        &log_scope,
        body,
        remote,
    )
    .await
}

/// Reconcile all document types, returning the name-to-URL map
///
/// The catalog API cannot filter document types by name, so all existing
/// ones are fetched once and matched client-side.
async fn update_informatieobjecttypen(
    session: &mut ImportSession,
    client: &CatalogClient,
    iotypen: &[DocumentTypeDraft],
) -> Result<HashMap<String, String>, LoadError> {
    let catalog_url = session.options().catalog_url.clone();
    let start_date = session.options().start_date;

    let remote_list = client
        .list_all(
            "informatieobjecttypen",
            &[
                ("catalogus", catalog_url.as_str()),
                ("status", "alles"),
            ],
        )
        .await?;

    let mut remote_map: HashMap<String, RemoteResource> = HashMap::new();
    for value in &remote_list {
        if let (Some(omschrijving), Ok(remote)) = (
            value["omschrijving"].as_str(),
            RemoteResource::from_value(value),
        ) {
            remote_map.insert(omschrijving.to_string(), remote);
        }
    }

    let mut urls = HashMap::new();
    for (i, draft) in iotypen.iter().enumerate() {
        if (i + 1) % FLUSH_OBJECTS == 0 {
            session.flush_counts();
        }

        let log_scope = format!("informatieobjecttype '{}'", draft.omschrijving);
        let remote = remote_map.get(&draft.omschrijving).cloned();
        let result = upsert_document_type(
            session,
            client,
            draft,
            &catalog_url,
            start_date,
            &log_scope,
            remote,
        )
        .await;

        match result {
            Ok(created) => {
                if let Some(url) = created["url"].as_str() {
                    urls.insert(draft.omschrijving.clone(), url.to_string());
                }
            }
            Err(err) => {
                session
                    .counter_mut()
                    .increment_errored(ObjectTypeKey::Informatieobjecttypen);
                session.log_error(
                    format!("{log_scope} can't be created: {}", err.describe()),
                    Some(ObjectTypeKey::Informatieobjecttypen),
                );
            }
        }
    }
    session.flush_counts();

    Ok(urls)
}

async fn upsert_document_type(
    session: &mut ImportSession,
    client: &CatalogClient,
    draft: &DocumentTypeDraft,
    catalog_url: &str,
    start_date: chrono::NaiveDate,
    log_scope: &str,
    remote: Option<RemoteResource>,
) -> Result<Value, LoadError> {
    let mut body = serde_json::to_value(draft).map_err(|e| LoadError::Body(e.to_string()))?;
    body["catalogus"] = json!(catalog_url);
    if draft.begin_geldigheid.is_none() {
        body["beginGeldigheid"] = json!(start_date.format("%Y-%m-%d").to_string());
    }

    upsert_versioned(
        session,
        client,
        "informatieobjecttypen",
        ObjectTypeKey::Informatieobjecttypen,
        log_scope,
        body,
        remote,
    )
    .await
}

/// The three-way create/update/close-and-replace decision
///
/// * no remote match: create a new concept
/// * one concept match: replace it in place
/// * one published match: optionally close its validity window, then always
///   create the new version
///
/// Both outcomes on a published match count as `updated`.
async fn upsert_versioned(
    session: &mut ImportSession,
    client: &CatalogClient,
    path: &str,
    type_key: ObjectTypeKey,
    log_scope: &str,
    body: Value,
    remote: Option<RemoteResource>,
) -> Result<Value, LoadError> {
    match remote {
        None => {
            let created = client.create(path, &body).await?;
            session.log_info(format!("{log_scope} created new concept"), None);
            session.counter_mut().increment_created(type_key);
            Ok(created)
        }
        Some(remote) if remote.concept => {
            let updated = client.update(&remote.url, &body).await?;
            session.log_info(format!("{log_scope} updated existing concept"), None);
            session.counter_mut().increment_updated(type_key);
            Ok(updated)
        }
        Some(remote) => {
            let begin = body["beginGeldigheid"].as_str().unwrap_or_default().to_string();
            if session.options().close_published {
                client
                    .partial_update(&remote.url, &json!({ "eindeGeldigheid": begin }))
                    .await?;
                session.log_info(
                    format!("{log_scope} closed existing published on '{begin}'"),
                    None,
                );
            } else {
                session.log_info(format!("{log_scope} existing published stays active"), None);
            }

            let created = client.create(path, &body).await?;
            session.log_info(format!("{log_scope} created new version"), None);
            session.counter_mut().increment_updated(type_key);
            Ok(created)
        }
    }
}

/// Generic reconciliation of one child collection against its parent
///
/// Existing children (drafts included) are bulk-fetched once and indexed by
/// the match field; each draft is then updated or created. One bad child
/// never blocks its siblings.
async fn update_zaaktype_children(
    session: &mut ImportSession,
    client: &CatalogClient,
    log_scope: &str,
    bodies: Vec<Value>,
    zaaktype_url: &str,
    spec: &ChildSpec,
) {
    let remote_list = match client
        .list_all(spec.path, &[("zaaktype", zaaktype_url), ("status", "alles")])
        .await
    {
        Ok(list) => list,
        Err(err) => {
            session.counter_mut().increment_errored(spec.type_key);
            session.log_error(
                format!(
                    "{log_scope} existing {} can't be fetched: {}",
                    spec.resource,
                    format_exception(&err)
                ),
                Some(spec.type_key),
            );
            return;
        }
    };

    let mut remote_map: HashMap<String, String> = HashMap::new();
    for value in &remote_list {
        if let Some(url) = value["url"].as_str() {
            remote_map.insert(match_value(&value[spec.match_field]), url.to_string());
        }
    }

    for (i, mut body) in bodies.into_iter().enumerate() {
        if (i + 1) % FLUSH_OBJECTS == 0 {
            session.flush_counts();
        }

        let matched = match_value(&body[spec.match_field]);
        let child_scope = format!(
            "{log_scope} {} {}='{matched}'",
            spec.resource, spec.match_field
        );
        body["zaaktype"] = json!(zaaktype_url);

        let result: Result<Value, CatalogError> = match remote_map.get(&matched) {
            Some(url) => client.update(url, &body).await,
            None => client.create(spec.path, &body).await,
        };

        match (result, remote_map.contains_key(&matched)) {
            (Ok(_), true) => {
                session.counter_mut().increment_updated(spec.type_key);
                session.log_info(format!("{child_scope} updated existing"), None);
            }
            (Ok(_), false) => {
                session.counter_mut().increment_created(spec.type_key);
                session.log_info(format!("{child_scope} created new"), None);
            }
            (Err(err), _) => {
                session.counter_mut().increment_errored(spec.type_key);
                session.log_error(
                    format!("{child_scope} can't be created: {}", format_exception(&err)),
                    Some(spec.type_key),
                );
            }
        }
    }
    session.flush_counts();
}

/// Stringified match key; sequence numbers and names compare uniformly
fn match_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
