use super::common::{impl_first_last_seen, Paginated};
use serde::{Deserialize, Serialize};

/// Who can see a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectVisibility {
    /// Everyone
    Public,
    /// Only the owner
    #[default]
    Private,
    /// The owner's organization
    Analyst,
}

/// A project grouping tracked artifacts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project id
    #[serde(default)]
    pub guid: String,

    /// Project name
    #[serde(default)]
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Visibility
    #[serde(default)]
    pub visibility: ProjectVisibility,

    /// Whether the project is featured
    #[serde(default)]
    pub featured: bool,

    /// Owner username
    #[serde(default)]
    pub owner: Option<String>,

    /// Creator username
    #[serde(default)]
    pub creator: Option<String>,

    /// Owning organization
    #[serde(default)]
    pub organization: Option<String>,

    /// Project tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Collaborator usernames
    #[serde(default)]
    pub collaborators: Vec<serde_json::Value>,

    /// Creation timestamp
    #[serde(default)]
    pub created: Option<String>,

    /// Last update timestamp
    #[serde(default)]
    pub updated: Option<String>,
}

/// Project list response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Projects {
    /// Projects visible to the account
    #[serde(default)]
    pub results: Vec<Project>,
}

/// Request body for creating a project
#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectRequest {
    /// Project name
    pub name: String,
    /// Visibility
    pub visibility: ProjectVisibility,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial tags
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether the project is featured
    pub featured: bool,
}

/// Request body for updating a project
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProjectRequest {
    /// Project id
    pub project: String,
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New visibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<ProjectVisibility>,
    /// New featured flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Request body for adding or removing project tags
#[derive(Debug, Clone, Serialize)]
pub struct ProjectTags {
    /// Project id
    pub project: String,
    /// Tags
    pub tags: Vec<String>,
}

/// Kind of artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
    /// Domain or hostname
    Domain,
    /// IP address
    Ip,
    /// Email address
    Email,
    /// File hash
    Hash,
    /// Anything else the service tracks
    #[serde(other)]
    Other,
}

/// A tracked indicator inside a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Artifact id
    #[serde(default)]
    pub guid: String,

    /// Tracked value
    #[serde(default)]
    pub query: String,

    /// Kind of value
    #[serde(default, rename = "type")]
    pub kind: Option<ArtifactType>,

    /// Owning project id
    #[serde(default)]
    pub project: Option<String>,

    /// Whether changes are monitored
    #[serde(default)]
    pub monitor: bool,

    /// All tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Tags added by users
    #[serde(default)]
    pub user_tags: Vec<String>,

    /// Tags added by the service
    #[serde(default)]
    pub system_tags: Vec<String>,

    /// Creator username
    #[serde(default)]
    pub creator: Option<String>,

    /// Creation timestamp
    #[serde(default)]
    pub created: Option<String>,
}

/// Artifact list response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artifacts {
    /// Artifacts
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

/// Request body for creating an artifact
#[derive(Debug, Clone, Serialize)]
pub struct CreateArtifactRequest {
    /// Owning project id
    pub project: String,
    /// Value to track
    pub query: String,
    /// Kind of value, when it should not be inferred
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ArtifactType>,
    /// Initial tags
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Request body for creating many artifacts
#[derive(Debug, Clone, Serialize)]
pub struct BulkArtifactRequest {
    /// Artifacts to create
    pub artifacts: Vec<CreateArtifactRequest>,
}

/// Request body for updating an artifact
#[derive(Debug, Clone, Serialize)]
pub struct UpdateArtifactRequest {
    /// Artifact id
    pub artifact: String,
    /// New monitor flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<bool>,
    /// Replacement tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Request body for adding tags to an artifact
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactTags {
    /// Artifact id
    pub artifact: String,
    /// Tags
    pub tags: Vec<String>,
}

/// Change detected on a monitored artifact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorAlert {
    /// Project id
    #[serde(default)]
    pub project: Option<String>,

    /// Artifact id
    #[serde(default)]
    pub artifact: Option<String>,

    /// Monitored value
    #[serde(default)]
    pub query: Option<String>,

    /// Dataset that changed (e.g. "resolution", "whois")
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// New value observed
    #[serde(default)]
    pub value: Option<String>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,
}

impl_first_last_seen!(MonitorAlert);

/// Monitor alerts page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorAlerts {
    /// Alerts across all pages, when reported
    #[serde(default)]
    pub total_records: Option<u64>,

    /// Alerts on this page
    #[serde(default)]
    pub results: Vec<MonitorAlert>,
}

impl Paginated for MonitorAlerts {
    type Item = MonitorAlert;

    fn total(&self) -> Option<usize> {
        self.total_records.and_then(|t| usize::try_from(t).ok())
    }

    fn into_items(self) -> Vec<MonitorAlert> {
        self.results
    }
}
