//! Catalog API client
//!
//! Thin HTTP wrapper over the ZTC catalog API. The client knows nothing
//! about reconciliation; it exposes the five operations the loader composes
//! (`list`, `create`, `update`, `partial_update`, `delete`) plus direct
//! retrieval for the startup reachability check. All responses are surfaced
//! as raw JSON values; typed extraction happens at the call site.

use crate::adapters::catalog::models::{ListPage, RemoteResource};
use crate::config::CatalogConfig;
use crate::domain::{ApiErrorBody, CatalogError};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

/// Client for one catalog API deployment
pub struct CatalogClient {
    http: Client,
    api_root: String,
    api_token: Option<String>,
}

impl CatalogClient {
    /// Create a new catalog client from configuration
    pub fn new(config: &CatalogConfig) -> Self {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            api_root: config.api_root.trim_end_matches('/').to_string(),
            api_token: config
                .api_token
                .as_ref()
                .map(|token| token.expose_secret().to_string()),
        }
    }

    /// Absolute URL of a resource collection
    fn collection_url(&self, resource: &str) -> String {
        format!("{}/{}", self.api_root, resource)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.http.request(method, url);
        if let Some(ref token) = self.api_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, CatalogError> {
        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ApiErrorBody>().await.ok();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }

    /// Retrieve a single resource by its absolute URL
    pub async fn retrieve(&self, url: &str) -> Result<Value, CatalogError> {
        self.execute(self.request(Method::GET, url)).await
    }

    /// Fetch one page of a resource collection with the given filters
    pub async fn list(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<ListPage, CatalogError> {
        let url = self.collection_url(resource);
        let value = self
            .execute(self.request(Method::GET, &url).query(query))
            .await?;
        serde_json::from_value(value)
            .map_err(|e| CatalogError::InvalidResponse(format!("list page: {e}")))
    }

    /// Fetch every page of a resource collection, following `next` links
    pub async fn list_all(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<Value>, CatalogError> {
        let mut page = self.list(resource, query).await?;
        let mut results = std::mem::take(&mut page.results);

        while let Some(next) = page.next {
            let value = self.execute(self.request(Method::GET, &next)).await?;
            page = serde_json::from_value(value)
                .map_err(|e| CatalogError::InvalidResponse(format!("list page: {e}")))?;
            results.append(&mut page.results);
        }

        Ok(results)
    }

    /// Create a new resource in a collection
    pub async fn create(&self, resource: &str, body: &Value) -> Result<Value, CatalogError> {
        let url = self.collection_url(resource);
        self.execute(self.request(Method::POST, &url).json(body))
            .await
    }

    /// Replace a resource in full
    pub async fn update(&self, url: &str, body: &Value) -> Result<Value, CatalogError> {
        self.execute(self.request(Method::PUT, url).json(body)).await
    }

    /// Update a subset of a resource's fields
    ///
    /// Only exercised to close a published resource's validity window.
    pub async fn partial_update(&self, url: &str, body: &Value) -> Result<Value, CatalogError> {
        self.execute(self.request(Method::PATCH, url).json(body))
            .await
    }

    /// Delete a resource
    pub async fn delete(&self, url: &str) -> Result<(), CatalogError> {
        let response = self
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(|e| CatalogError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ApiErrorBody>().await.ok();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Find the single resource matching a natural-key filter
    ///
    /// Returns `Ok(None)` for no match, `Ok(Some)` for exactly one and an
    /// ambiguity count for anything more, leaving the decision to the caller.
    pub async fn find_unique(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<UniqueMatch, CatalogError> {
        let page = self.list(resource, query).await?;
        match page.results.len() {
            0 => Ok(UniqueMatch::None),
            1 => Ok(UniqueMatch::One(RemoteResource::from_value(
                &page.results[0],
            )?)),
            n => Ok(UniqueMatch::Multiple(n)),
        }
    }
}

/// Outcome of a natural-key lookup
#[derive(Debug, Clone, PartialEq)]
pub enum UniqueMatch {
    None,
    One(RemoteResource),
    Multiple(usize),
}
