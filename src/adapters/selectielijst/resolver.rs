//! Read-through taxonomy resolver
//!
//! Wraps the Selectielijst client with per-lookup TTL caches. The resolver
//! is constructed once per process and shared by all runs; concurrent runs
//! read the same snapshots.

use crate::adapters::selectielijst::cache::TtlCache;
use crate::adapters::selectielijst::client::SelectielijstClient;
use crate::adapters::selectielijst::models::{
    Procestype, Resultaat, ResultaattypeOmschrijving,
};
use crate::config::SelectielijstConfig;
use crate::domain::SelectielijstError;
use std::sync::Arc;
use std::time::Duration;

/// Taxonomy lookups with a read-through cache per list
pub struct SelectielijstResolver {
    client: SelectielijstClient,
    procestypen: TtlCache<u16, Procestype>,
    resultaten: TtlCache<(), Resultaat>,
    omschrijvingen: TtlCache<(), ResultaattypeOmschrijving>,
}

impl SelectielijstResolver {
    /// Create a resolver from configuration
    pub fn new(config: &SelectielijstConfig) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_hours * 60 * 60);
        Self {
            client: SelectielijstClient::new(config),
            procestypen: TtlCache::new(ttl),
            resultaten: TtlCache::new(ttl),
            omschrijvingen: TtlCache::new(ttl),
        }
    }

    /// Process types for one Selectielijst year
    pub async fn procestypen(
        &self,
        year: u16,
    ) -> Result<Arc<Vec<Procestype>>, SelectielijstError> {
        if let Some(snapshot) = self.procestypen.get(&year) {
            return Ok(snapshot);
        }
        let fetched = self.client.procestypen(year).await?;
        tracing::debug!(year, count = fetched.len(), "fetched procestypen");
        Ok(self.procestypen.put(year, fetched))
    }

    /// All result definitions
    pub async fn resultaten(&self) -> Result<Arc<Vec<Resultaat>>, SelectielijstError> {
        if let Some(snapshot) = self.resultaten.get(&()) {
            return Ok(snapshot);
        }
        let fetched = self.client.resultaten().await?;
        tracing::debug!(count = fetched.len(), "fetched resultaten");
        Ok(self.resultaten.put((), fetched))
    }

    /// Generic result type descriptions
    pub async fn resultaattype_omschrijvingen(
        &self,
    ) -> Result<Arc<Vec<ResultaattypeOmschrijving>>, SelectielijstError> {
        if let Some(snapshot) = self.omschrijvingen.get(&()) {
            return Ok(snapshot);
        }
        let fetched = self.client.resultaattype_omschrijvingen().await?;
        tracing::debug!(count = fetched.len(), "fetched resultaattypeomschrijvingen");
        Ok(self.omschrijvingen.put((), fetched))
    }
}
