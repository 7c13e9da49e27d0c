//! Artifact API endpoints.

use crate::PassiveTotalClient;
use passivetotal_core::{
    Artifact, ArtifactTags, Artifacts, BulkArtifactRequest, CreateArtifactRequest,
    PassiveTotalError, Result, TagsResponse, UpdateArtifactRequest,
};
use serde::Serialize;

/// Artifact API endpoints
pub struct ArtifactApi<'a> {
    client: &'a PassiveTotalClient,
}

#[derive(Serialize)]
struct ArtifactRef<'q> {
    artifact: &'q str,
}

impl<'a> ArtifactApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// List artifacts in a project
    pub async fn list(&self, project: &str) -> Result<Artifacts> {
        self.client
            .get_with_query("/artifact", &[("project", project)])
            .await
    }

    /// Get an artifact by GUID
    pub async fn get(&self, guid: &str) -> Result<Artifact> {
        let artifacts: Artifacts = self
            .client
            .get_with_query("/artifact", &[("artifact", guid)])
            .await?;

        artifacts
            .artifacts
            .into_iter()
            .next()
            .ok_or_else(|| PassiveTotalError::NotFound {
                resource: format!("artifact {guid}"),
            })
    }

    /// Create an artifact
    pub async fn create(&self, request: &CreateArtifactRequest) -> Result<Artifact> {
        self.client.put("/artifact", request).await
    }

    /// Create several artifacts in one request
    pub async fn bulk_create(&self, requests: Vec<CreateArtifactRequest>) -> Result<Artifacts> {
        self.client
            .put(
                "/artifact/bulk",
                &BulkArtifactRequest {
                    artifacts: requests,
                },
            )
            .await
    }

    /// Update monitoring or tags on an artifact
    pub async fn update(&self, request: &UpdateArtifactRequest) -> Result<Artifact> {
        self.client.post("/artifact", request).await
    }

    /// Delete an artifact
    pub async fn delete(&self, guid: &str) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .delete("/artifact", &ArtifactRef { artifact: guid })
            .await?;
        Ok(())
    }

    /// Add tags to an artifact, returning the artifact's tags
    pub async fn add_tags(&self, guid: &str, tags: &[&str]) -> Result<TagsResponse> {
        let body = ArtifactTags {
            artifact: guid.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
        };
        self.client.post("/artifact/tag", &body).await
    }
}
