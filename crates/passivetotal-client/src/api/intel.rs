//! Illuminate CTI intel profile endpoints.

use super::{page_params, segment};
use crate::{collect_pages, PassiveTotalClient};
use passivetotal_core::{
    IndicatorProfiles, IntelIndicator, IntelIndicators, IntelProfile, IntelProfiles, Result,
};

/// Intel profile endpoints
pub struct IntelApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> IntelApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// List intel profiles available to the account
    pub async fn profiles(&self) -> Result<IntelProfiles> {
        self.client.get("/intel-profiles").await
    }

    /// Get a single intel profile
    pub async fn profile(&self, id: &str) -> Result<IntelProfile> {
        self.client.get(&format!("/intel-profiles/{}", segment(id))).await
    }

    /// Get one page of indicators for a profile
    pub async fn indicators(&self, profile_id: &str, page: u32) -> Result<IntelIndicators> {
        let params = page_params(page);
        let params_ref: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        self.client
            .get_with_query(&format!("/intel-profiles/{}/indicators", segment(profile_id)), &params_ref)
            .await
    }

    /// Get every indicator for a profile
    pub async fn all_indicators(&self, profile_id: &str) -> Result<Vec<IntelIndicator>> {
        collect_pages(None, |page| self.indicators(profile_id, page)).await
    }

    /// Intel profiles that list `query` as an indicator
    pub async fn profiles_for_indicator(&self, query: &str) -> Result<IndicatorProfiles> {
        self.client
            .get_with_query("/intel-profiles/indicators", &[("query", query)])
            .await
    }
}
