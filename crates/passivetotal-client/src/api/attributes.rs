//! Host attribute API endpoints: components, trackers, host pairs and cookies.

use super::segment;
use crate::{collect_pages, PassiveTotalClient};
use passivetotal_core::{
    AttributeResults, Component, Cookie, DateRange, HostPair, HostPairDirection, Result, Tracker,
    TrackerSearchResults,
};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Host attribute API endpoints
pub struct AttributesApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> AttributesApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Web components observed on a host
    #[must_use]
    pub fn components(&self, query: impl Into<String>) -> AttributeRequestBuilder<'a, Component> {
        AttributeRequestBuilder::new(self.client, "/host-attributes/components", query.into())
    }

    /// Trackers observed on a host
    #[must_use]
    pub fn trackers(&self, query: impl Into<String>) -> AttributeRequestBuilder<'a, Tracker> {
        AttributeRequestBuilder::new(self.client, "/host-attributes/trackers", query.into())
    }

    /// Hosts linked to a host in the given direction
    #[must_use]
    pub fn host_pairs(
        &self,
        query: impl Into<String>,
        direction: HostPairDirection,
    ) -> AttributeRequestBuilder<'a, HostPair> {
        let mut builder =
            AttributeRequestBuilder::new(self.client, "/host-attributes/pairs", query.into());
        builder.extra.push(("direction", direction.as_str().to_string()));
        builder
    }

    /// Cookies observed on a host
    #[must_use]
    pub fn cookies(&self, query: impl Into<String>) -> AttributeRequestBuilder<'a, Cookie> {
        AttributeRequestBuilder::new(self.client, "/host-attributes/cookies", query.into())
    }

    /// Hosts carrying a tracker value of the given type
    pub async fn tracker_search(
        &self,
        value: &str,
        tracker_type: &str,
    ) -> Result<TrackerSearchResults> {
        self.client
            .get_with_query("/trackers/search", &[("query", value), ("type", tracker_type)])
            .await
    }

    /// Hosts setting a cookie with the given name
    pub async fn cookie_hosts_by_name(&self, name: &str) -> Result<AttributeResults<Cookie>> {
        self.client.get(&format!("/cookies/name/{}", segment(name))).await
    }

    /// Hosts setting cookies for the given domain
    pub async fn cookie_hosts_by_domain(&self, domain: &str) -> Result<AttributeResults<Cookie>> {
        self.client.get(&format!("/cookies/domain/{}", segment(domain))).await
    }
}

/// Builder for paged host attribute requests
pub struct AttributeRequestBuilder<'a, T> {
    client: &'a PassiveTotalClient,
    path: &'static str,
    query: String,
    range: DateRange,
    page: u32,
    max_pages: Option<u32>,
    extra: Vec<(&'static str, String)>,
    _record: PhantomData<T>,
}

impl<'a, T: DeserializeOwned> AttributeRequestBuilder<'a, T> {
    fn new(client: &'a PassiveTotalClient, path: &'static str, query: String) -> Self {
        Self {
            client,
            path,
            query,
            range: DateRange::unbounded(),
            page: 0,
            max_pages: None,
            extra: Vec::new(),
            _record: PhantomData,
        }
    }

    /// Only include records seen inside `range`
    #[must_use]
    pub const fn date_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Set the page number (0-indexed) for [`send`](Self::send)
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Cap the number of pages fetched by [`all`](Self::all)
    #[must_use]
    pub const fn max_pages(mut self, max: u32) -> Self {
        self.max_pages = Some(max);
        self
    }

    fn params_for(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("query", self.query.clone())];
        params.extend(self.range.query_params());
        params.extend(self.extra.iter().cloned());
        if page > 0 {
            params.push(("page", page.to_string()));
        }
        params
    }

    /// Fetch a single page
    pub async fn send(self) -> Result<AttributeResults<T>> {
        fetch_page(self.client, self.path, self.params_for(self.page)).await
    }

    /// Fetch every page and return all records
    pub async fn all(self) -> Result<Vec<T>> {
        collect_pages(self.max_pages, |page| {
            fetch_page::<T>(self.client, self.path, self.params_for(page))
        })
        .await
    }
}

async fn fetch_page<T: DeserializeOwned>(
    client: &PassiveTotalClient,
    path: &str,
    params: Vec<(&'static str, String)>,
) -> Result<AttributeResults<T>> {
    let params_ref: Vec<(&str, &str)> = params
        .iter()
        .map(|(k, v)| (*k, v.as_str()))
        .collect();

    client.get_with_query(path, &params_ref).await
}
