//! WHOIS API endpoints.

use crate::PassiveTotalClient;
use passivetotal_core::{KeywordSearchResults, Result, WhoisField, WhoisRecord, WhoisSearchResults};

/// WHOIS API endpoints
pub struct WhoisApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> WhoisApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Get the WHOIS record for a domain or IP
    #[must_use]
    pub fn details(&self, query: impl Into<String>) -> WhoisRequestBuilder<'a> {
        WhoisRequestBuilder::new(self.client, query.into())
    }

    /// Search WHOIS records by a field value
    pub async fn search(&self, field: WhoisField, value: &str) -> Result<WhoisSearchResults> {
        self.client
            .get_with_query(
                "/whois/search",
                &[("field", field.as_str()), ("query", value)],
            )
            .await
    }

    /// Search WHOIS records by keyword
    pub async fn keyword(&self, query: &str) -> Result<KeywordSearchResults> {
        self.client
            .get_with_query("/whois/search/keyword", &[("query", query)])
            .await
    }
}

/// Builder for WHOIS detail requests
pub struct WhoisRequestBuilder<'a> {
    client: &'a PassiveTotalClient,
    query: String,
    compact: bool,
    history: bool,
}

impl<'a> WhoisRequestBuilder<'a> {
    fn new(client: &'a PassiveTotalClient, query: String) -> Self {
        Self {
            client,
            query,
            compact: false,
            history: false,
        }
    }

    /// Ask the API to merge duplicate contact fields
    #[must_use]
    pub const fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Include historical records
    #[must_use]
    pub const fn history(mut self, include: bool) -> Self {
        self.history = include;
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<WhoisRecord> {
        let mut params = vec![("query", self.query.as_str())];
        if self.compact {
            params.push(("compact_record", "true"));
        }
        if self.history {
            params.push(("history", "true"));
        }

        self.client.get_with_query("/whois", &params).await
    }
}
