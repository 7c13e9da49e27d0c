use serde::{Deserialize, Serialize};

/// Summary card for a domain or IP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    /// The value summarized
    #[serde(default)]
    pub name: Option<String>,

    /// Kind of value
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Link to the web UI
    #[serde(default)]
    pub link: Option<String>,

    /// Network block (IPs only)
    #[serde(default)]
    pub netblock: Option<String>,

    /// Autonomous system (IPs only)
    #[serde(default)]
    pub asn: Option<String>,

    /// Hosting provider (IPs only)
    #[serde(default)]
    pub hosting_provider: Option<String>,

    /// Record counts per dataset
    #[serde(default)]
    pub data_summary: DataSummary,
}

/// Record counts per dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSummary {
    /// Passive DNS resolutions
    #[serde(default)]
    pub resolutions: SummaryCount,
    /// SSL certificates
    #[serde(default)]
    pub certificates: SummaryCount,
    /// Malware hashes
    #[serde(default)]
    pub hashes: SummaryCount,
    /// Projects containing the value
    #[serde(default)]
    pub projects: SummaryCount,
    /// Articles mentioning the value
    #[serde(default)]
    pub articles: SummaryCount,
    /// Trackers
    #[serde(default)]
    pub trackers: SummaryCount,
    /// Components
    #[serde(default)]
    pub components: SummaryCount,
    /// Host pairs
    #[serde(default)]
    pub host_pairs: SummaryCount,
    /// Reverse DNS records
    #[serde(default)]
    pub reverse_dns: SummaryCount,
    /// Cookies
    #[serde(default)]
    pub cookies: SummaryCount,
    /// Open services
    #[serde(default)]
    pub services: SummaryCount,
}

impl DataSummary {
    /// Datasets with at least one record, by name
    #[must_use]
    pub fn non_empty(&self) -> Vec<(&'static str, u64)> {
        [
            ("resolutions", &self.resolutions),
            ("certificates", &self.certificates),
            ("hashes", &self.hashes),
            ("projects", &self.projects),
            ("articles", &self.articles),
            ("trackers", &self.trackers),
            ("components", &self.components),
            ("host_pairs", &self.host_pairs),
            ("reverse_dns", &self.reverse_dns),
            ("cookies", &self.cookies),
            ("services", &self.services),
        ]
        .into_iter()
        .filter(|(_, c)| c.count > 0)
        .map(|(name, c)| (name, c.count))
        .collect()
    }
}

/// Count of records in a dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryCount {
    /// Number of records
    #[serde(default)]
    pub count: u64,

    /// Link to the dataset in the web UI
    #[serde(default)]
    pub link: Option<String>,
}
