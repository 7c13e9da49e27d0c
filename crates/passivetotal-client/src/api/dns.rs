//! Passive DNS API endpoints.

use crate::PassiveTotalClient;
use passivetotal_core::{DateRange, KeywordSearchResults, PassiveDnsResults, Result, UniqueResolutions};

/// Passive DNS API endpoints
pub struct DnsApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> DnsApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Get passive DNS resolutions for a domain or IP
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let pdns = client.dns().passive("riskiq.net").send().await?;
    /// println!("{} records", pdns.total_records);
    /// ```
    #[must_use]
    pub fn passive(&self, query: impl Into<String>) -> PassiveDnsRequestBuilder<'a> {
        PassiveDnsRequestBuilder::new(self.client, query.into())
    }

    /// Get unique resolutions with their observation frequency
    pub async fn unique(&self, query: &str) -> Result<UniqueResolutions> {
        self.client
            .get_with_query("/dns/passive/unique", &[("query", query)])
            .await
    }

    /// Search passive DNS records by keyword
    pub async fn keyword(&self, query: &str) -> Result<KeywordSearchResults> {
        self.client
            .get_with_query("/dns/search/keyword", &[("query", query)])
            .await
    }
}

/// Builder for passive DNS requests
pub struct PassiveDnsRequestBuilder<'a> {
    client: &'a PassiveTotalClient,
    query: String,
    range: DateRange,
    timeout: Option<u32>,
    sources: Vec<String>,
}

impl<'a> PassiveDnsRequestBuilder<'a> {
    fn new(client: &'a PassiveTotalClient, query: String) -> Self {
        Self {
            client,
            query,
            range: DateRange::unbounded(),
            timeout: None,
            sources: Vec::new(),
        }
    }

    /// Only include records seen inside `range`
    #[must_use]
    pub const fn date_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Server-side timeout for querying sources, in seconds
    #[must_use]
    pub const fn timeout(mut self, seconds: u32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Restrict the sources consulted
    #[must_use]
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<PassiveDnsResults> {
        let mut params = vec![("query", self.query)];
        params.extend(self.range.query_params());

        if let Some(timeout) = self.timeout {
            params.push(("timeout", timeout.to_string()));
        }

        if !self.sources.is_empty() {
            params.push(("sources", self.sources.join(",")));
        }

        let params_ref: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .collect();

        self.client.get_with_query("/dns/passive", &params_ref).await
    }
}
