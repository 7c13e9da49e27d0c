//! Illuminate attack surface intelligence endpoints.

use super::{page_params, segment};
use crate::{collect_pages, PassiveTotalClient};
use passivetotal_core::{
    AttackSurface, AttackSurfaceCve, AttackSurfaceCves, AttackSurfaceInsights, AttackSurfaces,
    CveObservation, CveObservations, InsightPriority, Result,
};

/// Attack surface endpoints
pub struct AttackSurfaceApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> AttackSurfaceApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    async fn get_page<T: serde::de::DeserializeOwned>(&self, path: &str, page: u32) -> Result<T> {
        let params = page_params(page);
        let params_ref: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        self.client.get_with_query(path, &params_ref).await
    }

    /// The account's own attack surface
    pub async fn own(&self) -> Result<AttackSurface> {
        self.client.get("/attack-surface").await
    }

    /// One page of third-party (vendor) attack surfaces
    pub async fn third_party_page(&self, page: u32) -> Result<AttackSurfaces> {
        self.get_page("/attack-surface/third-party", page).await
    }

    /// Every third-party attack surface
    pub async fn third_party(&self) -> Result<Vec<AttackSurface>> {
        collect_pages(None, |page| self.third_party_page(page)).await
    }

    /// A third-party attack surface by id
    pub async fn get(&self, id: u64) -> Result<AttackSurface> {
        self.client
            .get(&format!("/attack-surface/third-party/{id}"))
            .await
    }

    /// Insights of one priority level
    pub async fn insights(
        &self,
        id: u64,
        priority: InsightPriority,
    ) -> Result<AttackSurfaceInsights> {
        self.client
            .get(&format!("/attack-surface/{id}/insights/{}", priority.as_str()))
            .await
    }

    /// One page of CVEs impacting an attack surface
    pub async fn cves(&self, id: u64, page: u32) -> Result<AttackSurfaceCves> {
        self.get_page(&format!("/attack-surface/{id}/cves"), page)
            .await
    }

    /// Every CVE impacting an attack surface
    pub async fn all_cves(&self, id: u64) -> Result<Vec<AttackSurfaceCve>> {
        collect_pages(None, |page| self.cves(id, page)).await
    }

    /// One page of assets on which a CVE was observed
    pub async fn cve_observations(
        &self,
        id: u64,
        cve: &str,
        page: u32,
    ) -> Result<CveObservations> {
        self.get_page(&format!("/attack-surface/{id}/cve/{}/observations", segment(cve)), page)
            .await
    }

    /// Every asset on which a CVE was observed
    pub async fn all_cve_observations(&self, id: u64, cve: &str) -> Result<Vec<CveObservation>> {
        collect_pages(None, |page| self.cve_observations(id, cve, page)).await
    }
}
