//! Account API endpoints.

use crate::PassiveTotalClient;
use passivetotal_core::{
    Account, AccountHistory, Monitors, Organization, Quota, Result, SourceConfigs, Teamstream,
};

/// Account API endpoints
pub struct AccountApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> AccountApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Get account profile information
    pub async fn info(&self) -> Result<Account> {
        self.client.get("/account").await
    }

    /// Get the account's search history
    pub async fn history(&self) -> Result<AccountHistory> {
        self.client.get("/account/history").await
    }

    /// Get values monitored by the account
    pub async fn monitors(&self) -> Result<Monitors> {
        self.client.get("/account/monitors").await
    }

    /// Get the account's organization
    pub async fn organization(&self) -> Result<Organization> {
        self.client.get("/account/organization").await
    }

    /// Get the organization activity feed
    pub async fn teamstream(&self) -> Result<Teamstream> {
        self.client.get("/account/organization/teamstream").await
    }

    /// Get data source configuration, optionally for one source
    pub async fn sources(&self, source: Option<&str>) -> Result<SourceConfigs> {
        match source {
            Some(source) => {
                self.client
                    .get_with_query("/account/sources", &[("source", source)])
                    .await
            }
            None => self.client.get("/account/sources").await,
        }
    }

    /// Get query quota usage
    pub async fn quota(&self) -> Result<Quota> {
        self.client.get("/account/quota").await
    }
}
