//! Project API endpoints.

use crate::PassiveTotalClient;
use passivetotal_core::{
    CreateProjectRequest, PassiveTotalError, Project, ProjectTags, Projects, Result,
    TagsResponse, UpdateProjectRequest,
};
use serde::Serialize;

/// Project API endpoints
pub struct ProjectApi<'a> {
    client: &'a PassiveTotalClient,
}

#[derive(Serialize)]
struct ProjectRef<'q> {
    project: &'q str,
}

fn project_tags(project: &str, tags: &[&str]) -> ProjectTags {
    ProjectTags {
        project: project.to_string(),
        tags: tags.iter().map(ToString::to_string).collect(),
    }
}

impl<'a> ProjectApi<'a> {
    pub(crate) fn new(client: &'a PassiveTotalClient) -> Self {
        Self { client }
    }

    /// List projects visible to the account
    pub async fn list(&self) -> Result<Projects> {
        self.client.get("/project").await
    }

    /// Get a project by GUID
    pub async fn get(&self, guid: &str) -> Result<Project> {
        let projects: Projects = self
            .client
            .get_with_query("/project", &[("project", guid)])
            .await?;

        projects
            .results
            .into_iter()
            .next()
            .ok_or_else(|| PassiveTotalError::NotFound {
                resource: format!("project {guid}"),
            })
    }

    /// Create a project
    pub async fn create(&self, request: &CreateProjectRequest) -> Result<Project> {
        self.client.put("/project", request).await
    }

    /// Update a project
    pub async fn update(&self, request: &UpdateProjectRequest) -> Result<Project> {
        self.client.post("/project", request).await
    }

    /// Delete a project
    pub async fn delete(&self, guid: &str) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .delete("/project", &ProjectRef { project: guid })
            .await?;
        Ok(())
    }

    /// Add tags to a project, returning the project's tags
    pub async fn add_tags(&self, guid: &str, tags: &[&str]) -> Result<TagsResponse> {
        self.client
            .post("/project/tag", &project_tags(guid, tags))
            .await
    }

    /// Remove tags from a project, returning the remaining tags
    pub async fn remove_tags(&self, guid: &str, tags: &[&str]) -> Result<TagsResponse> {
        self.client
            .delete("/project/tag", &project_tags(guid, tags))
            .await
    }
}
