//! Action API endpoints: tags, classification and boolean flags.

use crate::PassiveTotalClient;
use passivetotal_core::{
    BulkClassification, BulkClassificationRequest, Classification, ClassificationRequest,
    ClassificationStatus, DynamicDns, EverCompromised, FlagRequest, MonitorStatus, Result,
    Sinkhole, TagSearchResults, TagsRequest, TagsResponse,
};

/// Action API endpoints
pub struct ActionsApi<'a> {
    client: &'a PassiveTotalClient,
}

fn tags_request(query: &str, tags: &[&str]) -> TagsRequest {
    TagsRequest {
        query: query.to_string(),
        tags: tags.iter().map(ToString::to_string).collect(),
    }
}

impl<'a> ActionsApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// Tags attached to a value
    pub async fn tags(&self, query: &str) -> Result<TagsResponse> {
        self.client
            .get_with_query("/actions/tags", &[("query", query)])
            .await
    }

    /// Add tags to a value
    pub async fn add_tags(&self, query: &str, tags: &[&str]) -> Result<TagsResponse> {
        self.client
            .post("/actions/tags", &tags_request(query, tags))
            .await
    }

    /// Replace the tags on a value
    pub async fn set_tags(&self, query: &str, tags: &[&str]) -> Result<TagsResponse> {
        self.client
            .put("/actions/tags", &tags_request(query, tags))
            .await
    }

    /// Remove tags from a value
    pub async fn remove_tags(&self, query: &str, tags: &[&str]) -> Result<TagsResponse> {
        self.client
            .delete("/actions/tags", &tags_request(query, tags))
            .await
    }

    /// Values carrying a tag
    pub async fn search_tags(&self, tag: &str) -> Result<TagSearchResults> {
        self.client
            .get_with_query("/actions/tags/search", &[("query", tag)])
            .await
    }

    /// Classification of a value
    pub async fn classification(&self, query: &str) -> Result<ClassificationStatus> {
        self.client
            .get_with_query("/actions/classification", &[("query", query)])
            .await
    }

    /// Classify a value
    pub async fn set_classification(
        &self,
        query: &str,
        classification: Classification,
    ) -> Result<ClassificationStatus> {
        let body = ClassificationRequest {
            query: query.to_string(),
            classification,
        };
        self.client.post("/actions/classification", &body).await
    }

    /// Classify many values at once
    pub async fn set_bulk_classification(
        &self,
        queries: &[&str],
        classification: Classification,
    ) -> Result<BulkClassification> {
        let body = BulkClassificationRequest {
            query: queries.iter().map(ToString::to_string).collect(),
            classification,
        };
        self.client
            .post("/actions/bulk/classification", &body)
            .await
    }

    /// Whether a value was ever compromised
    pub async fn ever_compromised(&self, query: &str) -> Result<EverCompromised> {
        self.client
            .get_with_query("/actions/ever-compromised", &[("query", query)])
            .await
    }

    /// Set the ever-compromised flag
    pub async fn set_ever_compromised(&self, query: &str, value: bool) -> Result<EverCompromised> {
        self.client
            .post(
                "/actions/ever-compromised",
                &FlagRequest::new(query, "status", value),
            )
            .await
    }

    /// Whether a value is a dynamic DNS host
    pub async fn dynamic_dns(&self, query: &str) -> Result<DynamicDns> {
        self.client
            .get_with_query("/actions/dynamic-dns", &[("query", query)])
            .await
    }

    /// Set the dynamic DNS flag
    pub async fn set_dynamic_dns(&self, query: &str, value: bool) -> Result<DynamicDns> {
        self.client
            .post("/actions/dynamic-dns", &FlagRequest::new(query, "status", value))
            .await
    }

    /// Whether a value is monitored
    pub async fn monitor(&self, query: &str) -> Result<MonitorStatus> {
        self.client
            .get_with_query("/actions/monitor", &[("query", query)])
            .await
    }

    /// Turn monitoring on or off
    pub async fn set_monitor(&self, query: &str, value: bool) -> Result<MonitorStatus> {
        self.client
            .post("/actions/monitor", &FlagRequest::new(query, "status", value))
            .await
    }

    /// Whether an IP is a known sinkhole
    pub async fn sinkhole(&self, query: &str) -> Result<Sinkhole> {
        self.client
            .get_with_query("/actions/sinkhole", &[("query", query)])
            .await
    }

    /// Set the sinkhole flag
    pub async fn set_sinkhole(&self, query: &str, value: bool) -> Result<Sinkhole> {
        self.client
            .post("/actions/sinkhole", &FlagRequest::new(query, "status", value))
            .await
    }
}
