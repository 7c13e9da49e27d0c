//! Enrichment API endpoints.

use crate::PassiveTotalClient;
use passivetotal_core::{BulkEnrichment, Enrichment, MalwareResults, OsintResults, Result, Subdomains};
use serde::Serialize;

/// Enrichment API endpoints
pub struct EnrichmentApi<'a> {
    client: &'a PassiveTotalClient,
}

#[derive(Serialize)]
struct BulkQuery<'q> {
    query: &'q [&'q str],
}

impl<'a> EnrichmentApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Get enrichment metadata for a domain or IP
    pub async fn data(&self, query: &str) -> Result<Enrichment> {
        self.client
            .get_with_query("/enrichment", &[("query", query)])
            .await
    }

    /// Get enrichment metadata for many values in one request
    pub async fn bulk(&self, queries: &[&str]) -> Result<BulkEnrichment> {
        self.client
            .post("/enrichment/bulk", &BulkQuery { query: queries })
            .await
    }

    /// Get OSINT reports mentioning a value
    pub async fn osint(&self, query: &str) -> Result<OsintResults> {
        self.client
            .get_with_query("/enrichment/osint", &[("query", query)])
            .await
    }

    /// Get malware samples associated with a value
    pub async fn malware(&self, query: &str) -> Result<MalwareResults> {
        self.client
            .get_with_query("/enrichment/malware", &[("query", query)])
            .await
    }

    /// Get known subdomains of a domain
    pub async fn subdomains(&self, query: &str) -> Result<Subdomains> {
        self.client
            .get_with_query("/enrichment/subdomains", &[("query", query)])
            .await
    }
}
