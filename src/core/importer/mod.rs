//! Run orchestration
//!
//! The two run modes share the same skeleton: check the catalog is
//! reachable, parse the source document (with the fatal format/version
//! gate), then either stop after reporting (precheck) or load everything
//! into the catalog (import). Both return the finished session; the caller
//! renders its log and statistics.

use crate::adapters::catalog::CatalogClient;
use crate::adapters::selectielijst::SelectielijstResolver;
use crate::core::loader;
use crate::core::parser;
use crate::core::session::{ImportOptions, ImportSession, JobStore};
use crate::domain::{ImportError, ObjectTypeKey};
use roxmltree::Document;
use std::sync::Arc;

/// Dry run: check, parse and report without touching the catalog
pub async fn precheck_import(
    options: ImportOptions,
    store: Arc<dyn JobStore>,
    catalog: &CatalogClient,
    resolver: &SelectielijstResolver,
    xml: &str,
) -> ImportSession {
    let mut session = ImportSession::new(options, store, false);
    if !check_catalog(&mut session, catalog).await {
        return session;
    }

    let Some(doc) = parse_source(&mut session, xml) else {
        return session;
    };

    let (zaaktypen, _iotypen) = parser::parse_xml(&mut session, resolver, &doc).await;

    for zaaktype in &zaaktypen {
        session.log_info(
            format!(
                "zaaktype {} '{}'",
                zaaktype.identificatie, zaaktype.omschrijving
            ),
            Some(ObjectTypeKey::Zaaktypen),
        );
    }
    session.flush_counts();

    session
}

/// Committing run: check, parse and synchronize into the catalog
pub async fn run_import(
    options: ImportOptions,
    store: Arc<dyn JobStore>,
    catalog: &CatalogClient,
    resolver: &SelectielijstResolver,
    xml: &str,
) -> ImportSession {
    let mut session = ImportSession::new(options, store, true);
    if !check_catalog(&mut session, catalog).await {
        return session;
    }

    let Some(doc) = parse_source(&mut session, xml) else {
        return session;
    };

    let (zaaktypen, iotypen) = parser::parse_xml(&mut session, resolver, &doc).await;
    session.flush_counts();

    loader::load_data(&mut session, catalog, zaaktypen, iotypen).await;
    session.flush_counts();

    session
}

/// Startup reachability check against the configured catalog
async fn check_catalog(session: &mut ImportSession, client: &CatalogClient) -> bool {
    let catalog_url = session.options().catalog_url.clone();
    match client.retrieve(&catalog_url).await {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(error = %err, "catalog retrieval failed");
            session.log_error(format!("cannot find catalog with URI '{catalog_url}'"), None);
            session.mark_aborted();
            false
        }
    }
}

/// Parse the source text and apply the fatal format/version gate
///
/// Any failure here aborts the run before a single record is parsed.
fn parse_source<'input>(
    session: &mut ImportSession,
    xml: &'input str,
) -> Option<Document<'input>> {
    let doc = match Document::parse(xml) {
        Ok(doc) => doc,
        Err(err) => {
            session.log_error(ImportError::XmlParse(err.to_string()).to_string(), None);
            session.mark_aborted();
            return None;
        }
    };

    if let Err(err) = parser::check_format(&doc) {
        session.log_error(err.to_string(), None);
        session.mark_aborted();
        return None;
    }
    Some(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, SelectielijstConfig};
    use crate::core::session::{MemoryJobStore, RunOutcome};
    use chrono::NaiveDate;
    use serde_json::json;

    fn options(catalog_url: String) -> ImportOptions {
        ImportOptions {
            year: 2020,
            start_date: NaiveDate::from_ymd_opt(2021, 4, 1).unwrap(),
            close_published: false,
            catalog_url,
        }
    }

    fn clients(server: &mockito::Server) -> (CatalogClient, SelectielijstResolver) {
        let catalog = CatalogClient::new(&CatalogConfig {
            api_root: format!("{}/api", server.url()),
            catalog_url: format!("{}/api/catalogussen/1", server.url()),
            api_token: None,
            timeout_seconds: 5,
        });
        let resolver = SelectielijstResolver::new(&SelectielijstConfig {
            api_root: format!("{}/lijst/api/v1", server.url()),
            timeout_seconds: 5,
            cache_ttl_hours: 24,
        });
        (catalog, resolver)
    }

    async fn mock_catalog_check(server: &mut mockito::Server) -> mockito::Mock {
        server
            .mock("GET", "/api/catalogussen/1")
            .with_body(json!({"url": "http://test/api/catalogussen/1"}).to_string())
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_unreachable_catalog_aborts_before_parsing() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", "/api/catalogussen/1")
            .with_status(404)
            .create_async()
            .await;

        let (catalog, resolver) = clients(&server);
        let session = precheck_import(
            options(format!("{}/api/catalogussen/1", server.url())),
            Arc::new(MemoryJobStore::new()),
            &catalog,
            &resolver,
            "<dsp versie=\"ICR1.5.13\"/>",
        )
        .await;

        assert_eq!(session.outcome(), RunOutcome::Aborted);
        assert!(session.logs()[0]
            .message
            .starts_with("cannot find catalog with URI"));
    }

    #[tokio::test]
    async fn test_malformed_xml_aborts() {
        let mut server = mockito::Server::new_async().await;
        let _check = mock_catalog_check(&mut server).await;

        let (catalog, resolver) = clients(&server);
        let session = precheck_import(
            options(format!("{}/api/catalogussen/1", server.url())),
            Arc::new(MemoryJobStore::new()),
            &catalog,
            &resolver,
            "<dsp><broken",
        )
        .await;

        assert_eq!(session.outcome(), RunOutcome::Aborted);
        assert_eq!(session.logs()[0].message, "XML parse error");
    }

    #[tokio::test]
    async fn test_unsupported_version_aborts() {
        let mut server = mockito::Server::new_async().await;
        let _check = mock_catalog_check(&mut server).await;

        let (catalog, resolver) = clients(&server);
        let session = precheck_import(
            options(format!("{}/api/catalogussen/1", server.url())),
            Arc::new(MemoryJobStore::new()),
            &catalog,
            &resolver,
            "<dsp versie=\"ICR1.3.13\"><processen/></dsp>",
        )
        .await;

        assert_eq!(session.outcome(), RunOutcome::Aborted);
        assert_eq!(
            session.logs()[0].message,
            "non supported XML version 'ICR1.3.13' (expected 'ICR1.5.x')"
        );
    }
}
