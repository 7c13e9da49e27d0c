use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Community classification of a value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Known bad
    Malicious,
    /// Possibly bad
    Suspicious,
    /// Known good
    NonMalicious,
    /// Not classified
    #[default]
    #[serde(other)]
    Unknown,
}

impl Classification {
    /// Classification name as expected by the API
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Malicious => "malicious",
            Self::Suspicious => "suspicious",
            Self::NonMalicious => "non-malicious",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags attached to a value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsResponse {
    /// Tag names
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Values carrying a tag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagSearchResults {
    /// Tagged values
    #[serde(default)]
    pub results: Vec<String>,
}

/// Classification of a single value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationStatus {
    /// Current classification
    #[serde(default)]
    pub classification: Classification,
}

/// Classification of many values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkClassification {
    /// Classification keyed by value
    #[serde(default)]
    pub results: HashMap<String, ClassificationStatus>,
}

/// Ever-compromised flag
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EverCompromised {
    /// Flag value
    #[serde(default)]
    pub ever_compromised: bool,
}

/// Dynamic DNS flag
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicDns {
    /// Flag value
    #[serde(default)]
    pub dynamic_dns: bool,
}

/// Monitoring flag
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MonitorStatus {
    /// Flag value
    #[serde(default)]
    pub monitor: bool,
}

/// Sinkhole flag
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Sinkhole {
    /// Flag value
    #[serde(default)]
    pub sinkhole: bool,
}

/// Request body for tag mutations
#[derive(Debug, Clone, Serialize)]
pub struct TagsRequest {
    /// Value to tag
    pub query: String,
    /// Tags to add, set or remove
    pub tags: Vec<String>,
}

/// Request body for setting a classification
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRequest {
    /// Value to classify
    pub query: String,
    /// New classification
    pub classification: Classification,
}

/// Request body for classifying many values
#[derive(Debug, Clone, Serialize)]
pub struct BulkClassificationRequest {
    /// Values to classify
    pub query: Vec<String>,
    /// New classification
    pub classification: Classification,
}

/// Request body for setting a boolean flag
#[derive(Debug, Clone, Serialize)]
pub struct FlagRequest {
    /// Value to update
    pub query: String,
    /// Flag value, keyed by the flag's wire name
    #[serde(flatten)]
    pub flag: HashMap<&'static str, bool>,
}

impl FlagRequest {
    /// Build a request setting `name` to `value` on `query`
    #[must_use]
    pub fn new(query: impl Into<String>, name: &'static str, value: bool) -> Self {
        Self {
            query: query.into(),
            flag: HashMap::from([(name, value)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_wire_names() {
        assert_eq!(
            serde_json::to_string(&Classification::NonMalicious).unwrap(),
            "\"non-malicious\""
        );
        let parsed: Classification = serde_json::from_str("\"suspicious\"").unwrap();
        assert_eq!(parsed, Classification::Suspicious);
        let unknown: Classification = serde_json::from_str("\"something-new\"").unwrap();
        assert_eq!(unknown, Classification::Unknown);
    }

    #[test]
    fn test_flag_request_body() {
        let body = serde_json::to_value(FlagRequest::new("riskiq.net", "everCompromised", true))
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"query": "riskiq.net", "everCompromised": true})
        );
    }
}
