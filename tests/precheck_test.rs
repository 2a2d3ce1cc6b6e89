//! Integration tests for the precheck (dry-run) mode
//!
//! A precheck parses and reports like a real import but must never issue a
//! mutation against the catalog, and must not mirror its log to the store.

mod common;

use common::*;
use std::sync::Arc;
use zaakimport::core::importer;
use zaakimport::core::session::{MemoryJobStore, RunOutcome};
use zaakimport::domain::{LogLevel, ObjectTypeKey};

#[tokio::test]
async fn test_precheck_counts_without_touching_the_catalog() {
    let mut server = mockito::Server::new_async().await;
    let _check = mock_catalog_check(&mut server).await;
    let _lijst = mock_selectielijst(&mut server).await;

    let zt_create = server
        .mock("POST", "/api/zaaktypen")
        .expect(0)
        .create_async()
        .await;
    let iot_create = server
        .mock("POST", "/api/informatieobjecttypen")
        .expect(0)
        .create_async()
        .await;

    let store = Arc::new(MemoryJobStore::new());
    let catalog = catalog_client(&server);
    let resolver = selectielijst_resolver(&server);
    let session = importer::precheck_import(
        options(&server, false),
        store.clone(),
        &catalog,
        &resolver,
        DSP_XML,
    )
    .await;

    assert_eq!(session.outcome(), RunOutcome::Completed);
    zt_create.assert_async().await;
    iot_create.assert_async().await;

    for key in ObjectTypeKey::ALL {
        let data = session.counter().get(key).unwrap();
        assert_eq!(
            (data.counted, data.errored, data.created, data.updated),
            (1, 0, 0, 0),
            "unexpected counters for {key}"
        );
    }

    // one summary line per parsed case type
    let summary = session
        .logs()
        .iter()
        .find(|log| log.message == "zaaktype B1796 'Melding behandelen'")
        .expect("summary line for the parsed case type");
    assert_eq!(summary.level, LogLevel::Info);

    // a precheck session flushes statistics but never mirrors its log
    assert!(store.logs().is_empty());
    let stats = store.statistics().expect("statistics were flushed");
    assert_eq!(stats.get(ObjectTypeKey::Zaaktypen).counted, 1);
}

#[tokio::test]
async fn test_precheck_isolates_a_broken_sibling_record() {
    // a second case type without required fields fails alone; the first one
    // still parses and the run completes
    let broken = DSP_XML.replace(
        "</proces>\n  </processen>",
        "</proces>\n    <proces id=\"B9999\" volgnummer=\"2\"><velden/></proces>\n  </processen>",
    );

    let mut server = mockito::Server::new_async().await;
    let _check = mock_catalog_check(&mut server).await;
    let _lijst = mock_selectielijst(&mut server).await;

    let store = Arc::new(MemoryJobStore::new());
    let catalog = catalog_client(&server);
    let resolver = selectielijst_resolver(&server);
    let session = importer::precheck_import(
        options(&server, false),
        store,
        &catalog,
        &resolver,
        &broken,
    )
    .await;

    assert_eq!(session.outcome(), RunOutcome::Completed);

    let zt = session.counter().get(ObjectTypeKey::Zaaktypen).unwrap();
    assert_eq!((zt.counted, zt.errored), (2, 1));
    assert_eq!(zt.issues.get(&LogLevel::Error), Some(&1));

    // children of the broken case type are never attempted
    let rt = session.counter().get(ObjectTypeKey::Roltypen).unwrap();
    assert_eq!(rt.counted, 1);

    assert!(session.logs().iter().any(|log| {
        log.level == LogLevel::Error
            && log
                .message
                .contains("zaaktype B9999: Imported zaaktype cannot be parsed")
    }));
}
