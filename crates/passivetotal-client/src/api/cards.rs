//! Summary card endpoint.

use crate::PassiveTotalClient;
use passivetotal_core::{Result, Summary};

/// Summary card endpoints
pub struct CardsApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> CardsApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Record counts per dataset for a hostname or IP
    pub async fn summary(&self, query: &str) -> Result<Summary> {
        self.client
            .get_with_query("/cards/summary", &[("query", query)])
            .await
    }
}
