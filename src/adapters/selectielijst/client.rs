//! Selectielijst API client
//!
//! Read-only client for the three taxonomy lookup lists. `procestypen` and
//! `resultaattypeomschrijvingen` come back as plain arrays; `resultaten` is
//! paginated and followed until exhausted.

use crate::adapters::selectielijst::models::{Procestype, Resultaat, ResultaattypeOmschrijving};
use crate::config::SelectielijstConfig;
use crate::domain::SelectielijstError;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default)]
    next: Option<String>,
    results: Vec<T>,
}

/// Client for the Selectielijst reference API
pub struct SelectielijstClient {
    http: Client,
    api_root: String,
}

impl SelectielijstClient {
    /// Create a new Selectielijst client from configuration
    pub fn new(config: &SelectielijstConfig) -> Self {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            api_root: config.api_root.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, SelectielijstError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| SelectielijstError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SelectielijstError::Api {
                status: status.as_u16(),
                endpoint: url.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SelectielijstError::InvalidResponse(e.to_string()))
    }

    /// Fetch the process types for one Selectielijst year
    pub async fn procestypen(&self, year: u16) -> Result<Vec<Procestype>, SelectielijstError> {
        let url = format!("{}/procestypen", self.api_root);
        self.get(&url, &[("jaar", year.to_string())]).await
    }

    /// Fetch all result definitions, following pagination until exhausted
    pub async fn resultaten(&self) -> Result<Vec<Resultaat>, SelectielijstError> {
        let url = format!("{}/resultaten", self.api_root);
        let mut page: Page<Resultaat> = self.get(&url, &[]).await?;
        let mut results = std::mem::take(&mut page.results);

        while let Some(next) = page.next {
            page = self.get(&next, &[]).await?;
            results.append(&mut page.results);
        }

        Ok(results)
    }

    /// Fetch the generic result type descriptions
    pub async fn resultaattype_omschrijvingen(
        &self,
    ) -> Result<Vec<ResultaattypeOmschrijving>, SelectielijstError> {
        let url = format!("{}/resultaattypeomschrijvingen", self.api_root);
        self.get(&url, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client(server: &mockito::Server) -> SelectielijstClient {
        SelectielijstClient::new(&SelectielijstConfig {
            api_root: format!("{}/api/v1", server.url()),
            timeout_seconds: 5,
            cache_ttl_hours: 24,
        })
    }

    #[tokio::test]
    async fn test_procestypen_passes_year() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/procestypen")
            .match_query(mockito::Matcher::UrlEncoded("jaar".into(), "2020".into()))
            .with_body(
                json!([
                    {"url": "http://lijst/procestypen/11", "nummer": 11, "jaar": 2020}
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server);
        let procestypen = client.procestypen(2020).await.unwrap();
        assert_eq!(procestypen.len(), 1);
        assert_eq!(procestypen[0].nummer, 11);
    }

    #[tokio::test]
    async fn test_resultaten_follows_pagination() {
        let mut server = mockito::Server::new_async().await;
        let next_url = format!("{}/api/v1/resultaten?page=2", server.url());

        let _first = server
            .mock("GET", "/api/v1/resultaten")
            .with_body(
                json!({
                    "count": 2,
                    "next": next_url,
                    "results": [{
                        "url": "http://lijst/resultaten/1",
                        "volledigNummer": "11.1",
                        "procesType": "http://lijst/procestypen/11",
                    }],
                })
                .to_string(),
            )
            .create_async()
            .await;
        let _second = server
            .mock("GET", "/api/v1/resultaten")
            .match_query(mockito::Matcher::UrlEncoded("page".into(), "2".into()))
            .with_body(
                json!({
                    "count": 2,
                    "next": null,
                    "results": [{
                        "url": "http://lijst/resultaten/2",
                        "volledigNummer": "11.2",
                        "procesType": "http://lijst/procestypen/11",
                    }],
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = test_client(&server);
        let resultaten = client.resultaten().await.unwrap();
        assert_eq!(resultaten.len(), 2);
        assert_eq!(resultaten[1].volledig_nummer, "11.2");
    }

    #[tokio::test]
    async fn test_error_status_propagates() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/resultaattypeomschrijvingen")
            .with_status(503)
            .create_async()
            .await;

        let client = test_client(&server);
        let err = client.resultaattype_omschrijvingen().await.unwrap_err();
        assert!(matches!(err, SelectielijstError::Api { status: 503, .. }));
    }
}
