//! Services API endpoints.

use crate::PassiveTotalClient;
use passivetotal_core::{Result, ServicesResults};

/// Services API endpoints
pub struct ServicesApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> ServicesApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Open services observed on an IP
    pub async fn services(&self, ip: &str) -> Result<ServicesResults> {
        self.client.get_with_query("/services", &[("query", ip)]).await
    }
}
