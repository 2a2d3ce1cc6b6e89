//! Shared fixtures for the integration tests: a small but complete DSP
//! export (one case type with one role, status, result and document) and the
//! mock endpoints both APIs need.

#![allow(dead_code)]

use serde_json::{json, Value};
use zaakimport::adapters::catalog::CatalogClient;
use zaakimport::adapters::selectielijst::SelectielijstResolver;
use zaakimport::config::{CatalogConfig, SelectielijstConfig};
use zaakimport::core::session::ImportOptions;

pub const PROCESTYPE_URL: &str = "https://selectielijst.test/api/v1/procestypen/11";
pub const RESULTAAT_URL: &str = "https://selectielijst.test/api/v1/resultaten/1";
pub const OMSCHRIJVING_URL: &str =
    "https://selectielijst.test/api/v1/resultaattypeomschrijvingen/1";

/// One complete `proces` element with every required field filled, so a
/// clean import produces no warnings
pub const DSP_XML: &str = r#"<dsp versie="ICR1.5.13">
  <processen>
    <proces id="B1796" volgnummer="1">
      <velden>
        <kernomschrijving>Melding behandelen</kernomschrijving>
        <model-kernomschrijving>Melding klein kansspel</model-kernomschrijving>
        <naam>Behandelen van meldingen voor een klein kansspel</naam>
        <ztc-procestype>Melding behandelen</ztc-procestype>
        <zaaktype-categorie>externe dienstverlening</zaaktype-categorie>
        <zaaktype-naam>
          <structuur>
            <handeling-initiator>melden</handeling-initiator>
            <onderwerp>klein kansspel</onderwerp>
            <handeling-behandelaar>behandelen</handeling-behandelaar>
          </structuur>
        </zaaktype-naam>
        <aanleiding>Er wordt een melding voor een klein kansspel gedaan</aanleiding>
        <toelichting-proces>Melding wordt beoordeeld en geregistreerd</toelichting-proces>
        <vertrouwelijkheid>Openbaar</vertrouwelijkheid>
        <afdoeningstermijn>8</afdoeningstermijn>
        <afdoeningstermijn-eenheid>week</afdoeningstermijn-eenheid>
        <wettelijke-afdoeningstermijn>8</wettelijke-afdoeningstermijn>
        <wettelijke-afdoeningstermijn-eenheid>week</wettelijke-afdoeningstermijn-eenheid>
        <aanhouden-mogelijk>Nee</aanhouden-mogelijk>
        <beroep-mogelijk>Nee</beroep-mogelijk>
        <publicatie-indicatie>Nee</publicatie-indicatie>
        <actueel-van>2021-03-01</actueel-van>
      </velden>
      <roltypen>
        <roltype volgnummer="1" omschrijving="Initiator">
          <velden>
            <naam>Initiator</naam>
            <naam-model>Initiator</naam-model>
          </velden>
        </roltype>
      </roltypen>
      <statustypen>
        <statustype volgnummer="1">
          <velden>
            <naam>Ontvangen</naam>
            <naam-model>Ontvangen</naam-model>
            <bericht>Uw melding is ontvangen</bericht>
          </velden>
        </statustype>
      </statustypen>
      <resultaattypen>
        <resultaattype id="R1" volgnummer="1">
          <velden>
            <naam>Verleend</naam>
            <naam-model>Verleend</naam-model>
            <waardering>Bewaren</waardering>
            <bewaartermijn>5</bewaartermijn>
            <bewaartermijn-eenheid>jaar</bewaartermijn-eenheid>
            <brondatum-archiefprocedure>Afgehandeld</brondatum-archiefprocedure>
            <vernietigingsgrondslag>
              <list>
                <fields>
                  <field naam="NAAM">Resultaat 11.1, Verleend</field>
                </fields>
              </list>
            </vernietigingsgrondslag>
          </velden>
        </resultaattype>
      </resultaattypen>
      <documenttypen>
        <documenttype volgnummer="1">
          <velden>
            <naam>Onderzoeksstuk</naam>
            <type>Inkomend</type>
            <vertrouwelijkheid>Openbaar</vertrouwelijkheid>
            <actueel-van>2021-01-01</actueel-van>
          </velden>
        </documenttype>
      </documenttypen>
    </proces>
  </processen>
</dsp>
"#;

pub fn catalog_url(server: &mockito::Server) -> String {
    format!("{}/api/catalogussen/1", server.url())
}

pub fn options(server: &mockito::Server, close_published: bool) -> ImportOptions {
    ImportOptions {
        year: 2020,
        start_date: chrono::NaiveDate::from_ymd_opt(2021, 4, 1).unwrap(),
        close_published,
        catalog_url: catalog_url(server),
    }
}

pub fn catalog_client(server: &mockito::Server) -> CatalogClient {
    CatalogClient::new(&CatalogConfig {
        api_root: format!("{}/api", server.url()),
        catalog_url: catalog_url(server),
        api_token: None,
        timeout_seconds: 5,
    })
}

pub fn selectielijst_resolver(server: &mockito::Server) -> SelectielijstResolver {
    SelectielijstResolver::new(&SelectielijstConfig {
        api_root: format!("{}/lijst/api/v1", server.url()),
        timeout_seconds: 5,
        cache_ttl_hours: 24,
    })
}

/// Wrap list results in the paginated envelope the catalog API uses
pub fn list_body(results: Value) -> String {
    json!({
        "count": results.as_array().map(|a| a.len()).unwrap_or(0),
        "next": null,
        "previous": null,
        "results": results,
    })
    .to_string()
}

/// Mock the startup catalog reachability check
pub async fn mock_catalog_check(server: &mut mockito::Server) -> mockito::Mock {
    server
        .mock("GET", "/api/catalogussen/1")
        .with_body(json!({"url": "http://test/api/catalogussen/1"}).to_string())
        .create_async()
        .await
}

/// Mock the three Selectielijst lookup endpoints
pub async fn mock_selectielijst(server: &mut mockito::Server) -> Vec<mockito::Mock> {
    let procestypen = server
        .mock("GET", "/lijst/api/v1/procestypen")
        .match_query(mockito::Matcher::UrlEncoded("jaar".into(), "2020".into()))
        .with_body(
            json!([{
                "url": PROCESTYPE_URL,
                "nummer": 11,
                "naam": "Toezicht uitvoeren",
                "jaar": 2020,
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let resultaten = server
        .mock("GET", "/lijst/api/v1/resultaten")
        .with_body(
            json!({
                "count": 1,
                "next": null,
                "results": [{
                    "url": RESULTAAT_URL,
                    "volledigNummer": "11.1",
                    "procesType": PROCESTYPE_URL,
                    "naam": "Verleend",
                }],
            })
            .to_string(),
        )
        .create_async()
        .await;

    let omschrijvingen = server
        .mock("GET", "/lijst/api/v1/resultaattypeomschrijvingen")
        .with_body(
            json!([{
                "url": OMSCHRIJVING_URL,
                "omschrijving": "Verleend",
            }])
            .to_string(),
        )
        .create_async()
        .await;

    vec![procestypen, resultaten, omschrijvingen]
}
