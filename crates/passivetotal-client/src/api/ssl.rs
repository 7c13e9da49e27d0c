//! SSL certificate API endpoints.

use crate::PassiveTotalClient;
use passivetotal_core::{
    KeywordSearchResults, PassiveTotalError, Result, SslCertificate, SslCertificateResults,
    SslField, SslHistory, SslSearchResults,
};

/// SSL certificate API endpoints
pub struct SslApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> SslApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Get certificate details by SHA-1
    pub async fn certificate(&self, sha1: &str) -> Result<SslCertificate> {
        let response: SslCertificateResults = self
            .client
            .get_with_query("/ssl-certificate", &[("query", sha1)])
            .await?;

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| PassiveTotalError::NotFound {
                resource: format!("certificate {sha1}"),
            })
    }

    /// Get where a certificate (by SHA-1) or an IP's certificates were observed
    pub async fn history(&self, query: &str) -> Result<SslHistory> {
        self.client
            .get_with_query("/ssl-certificate/history", &[("query", query)])
            .await
    }

    /// Search certificates by a field value
    pub async fn search(&self, field: SslField, value: &str) -> Result<SslSearchResults> {
        self.client
            .get_with_query(
                "/ssl-certificate/search",
                &[("field", field.as_str()), ("query", value)],
            )
            .await
    }

    /// Search certificates by keyword
    pub async fn keyword(&self, query: &str) -> Result<KeywordSearchResults> {
        self.client
            .get_with_query("/ssl-certificate/search/keyword", &[("query", query)])
            .await
    }
}
