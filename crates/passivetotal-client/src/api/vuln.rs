//! Illuminate vulnerability intelligence endpoints.

use super::{page_params, segment};
use crate::PassiveTotalClient;
use passivetotal_core::{CveObservations, Result, VulnArticle};

/// Vulnerability intelligence endpoints
pub struct VulnIntelApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> VulnIntelApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Vulnerability article for a CVE
    pub async fn article(&self, cve: &str) -> Result<VulnArticle> {
        self.client.get(&format!("/vuln-intel/cves/{}", segment(cve))).await
    }

    /// One page of the account's assets affected by a CVE
    pub async fn observations(&self, cve: &str, page: u32) -> Result<CveObservations> {
        let params = page_params(page);
        let params_ref: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        self.client
            .get_with_query(&format!("/vuln-intel/cves/{}/observations", segment(cve)), &params_ref)
            .await
    }
}
