//! Threat intelligence article endpoints.

use super::segment;
use crate::PassiveTotalClient;
use passivetotal_core::{Article, ArticlesResults, Result};

/// Article endpoints
pub struct ArticlesApi<'a> {
    client: &'a PassiveTotalClient,
}

impl<'a> ArticlesApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// List published articles
    pub async fn list(&self) -> Result<ArticlesResults> {
        self.client.get("/articles").await
    }

    /// Get a single article with its indicators
    pub async fn get(&self, id: &str) -> Result<Article> {
        self.client.get(&format!("/articles/{}", segment(id))).await
    }

    /// Articles that reference an indicator
    pub async fn for_indicator(&self, query: &str) -> Result<ArticlesResults> {
        self.client
            .get_with_query("/articles/indicators", &[("query", query)])
            .await
    }
}
