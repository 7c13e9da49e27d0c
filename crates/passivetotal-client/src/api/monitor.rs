//! Monitor alert endpoints.

use crate::{collect_pages, PassiveTotalClient};
use passivetotal_core::{DateRange, MonitorAlert, MonitorAlerts, Result};

/// Monitor alert endpoints
pub struct MonitorApi<'a> {
    client: &'a PassiveTotalClient,
}

/// What a set of alerts is scoped to
#[derive(Debug, Clone, Copy)]
pub enum AlertScope<'q> {
    /// Every artifact in a project
    Project(&'q str),
    /// A single artifact
    Artifact(&'q str),
}

impl AlertScope<'_> {
    fn param(&self) -> (&'static str, String) {
        match self {
            Self::Project(guid) => ("project", (*guid).to_string()),
            Self::Artifact(guid) => ("artifact", (*guid).to_string()),
        }
    }
}

impl<'a> MonitorApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Fetch one page of alerts
    pub async fn alerts_page(
        &self,
        scope: AlertScope<'_>,
        range: DateRange,
        page: u32,
    ) -> Result<MonitorAlerts> {
        let mut params = vec![scope.param()];
        params.extend(range.query_params());
        if page > 0 {
            params.push(("page", page.to_string()));
        }

        let params_ref: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        self.client.get_with_query("/monitor", &params_ref).await
    }

    /// Fetch every alert for a project or artifact inside `range`
    pub async fn alerts(&self, scope: AlertScope<'_>, range: DateRange) -> Result<Vec<MonitorAlert>> {
        collect_pages(None, |page| self.alerts_page(scope, range, page)).await
    }
}
