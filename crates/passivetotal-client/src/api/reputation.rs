//! Illuminate reputation endpoint.

use crate::PassiveTotalClient;
use passivetotal_core::{Reputation, Result};

/// Reputation endpoints
pub struct ReputationApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> ReputationApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Reputation score and the rules that produced it
    pub async fn get(&self, query: &str) -> Result<Reputation> {
        self.client
            .get_with_query("/reputation", &[("query", query)])
            .await
    }
}
