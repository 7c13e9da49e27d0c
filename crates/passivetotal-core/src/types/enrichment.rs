use super::actions::Classification;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Enrichment metadata for a domain or IP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrichment {
    /// The value that was queried
    #[serde(default)]
    pub query_value: Option<String>,

    /// Kind of value that was queried
    #[serde(default)]
    pub query_type: Option<String>,

    /// Top-level domain (domains only)
    #[serde(default)]
    pub tld: Option<String>,

    /// Registered domain (domains only)
    #[serde(default)]
    pub primary_domain: Option<String>,

    /// Known subdomain labels
    #[serde(default)]
    pub subdomains: Vec<String>,

    /// Whether the value was ever flagged as compromised
    #[serde(default)]
    pub ever_compromised: Option<bool>,

    /// Whether the value is a dynamic DNS host
    #[serde(default)]
    pub dynamic_dns: Option<bool>,

    /// Whether the value is a known sinkhole (IPs only)
    #[serde(default)]
    pub sinkhole: Option<bool>,

    /// Community classification
    #[serde(default)]
    pub classification: Option<Classification>,

    /// User and system tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Network block (IPs only)
    #[serde(default)]
    pub network: Option<String>,

    /// Autonomous system name (IPs only)
    #[serde(default)]
    pub autonomous_system_name: Option<String>,

    /// Autonomous system number (IPs only)
    #[serde(default)]
    pub autonomous_system_number: Option<u32>,

    /// Country (IPs only)
    #[serde(default)]
    pub country: Option<String>,
}

impl Enrichment {
    /// Returns true if the value was ever compromised
    #[must_use]
    pub fn was_compromised(&self) -> bool {
        self.ever_compromised.unwrap_or(false)
    }

    /// Returns true if the value is a dynamic DNS host
    #[must_use]
    pub fn is_dynamic_dns(&self) -> bool {
        self.dynamic_dns.unwrap_or(false)
    }

    /// Returns true if the value is a known sinkhole
    #[must_use]
    pub fn is_sinkhole(&self) -> bool {
        self.sinkhole.unwrap_or(false)
    }
}

/// Enrichment results for many queries at once
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkEnrichment {
    /// Enrichment keyed by query value
    #[serde(default)]
    pub results: HashMap<String, Enrichment>,
}

/// Open-source intelligence reports mentioning a value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OsintResults {
    /// OSINT records
    #[serde(default)]
    pub results: Vec<OsintRecord>,
}

/// A single OSINT report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsintRecord {
    /// Publisher of the report
    #[serde(default)]
    pub source: Option<String>,

    /// Link to the report
    #[serde(default)]
    pub source_url: Option<String>,

    /// Other indicators mentioned in the report
    #[serde(default)]
    pub in_report: Vec<String>,

    /// Tags assigned to the report
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Malware samples associated with a value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MalwareResults {
    /// Malware records
    #[serde(default)]
    pub results: Vec<MalwareRecord>,
}

/// A single malware sample
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MalwareRecord {
    /// Sample hash
    #[serde(default)]
    pub sample: String,

    /// Where the sample was reported
    #[serde(default)]
    pub source: Option<String>,

    /// Link to the source
    #[serde(default)]
    pub source_url: Option<String>,

    /// When the sample was collected
    #[serde(default)]
    pub collection_date: Option<String>,
}

/// Subdomains of a domain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subdomains {
    /// The value that was queried
    #[serde(default)]
    pub query_value: Option<String>,

    /// Registered domain the labels belong to
    #[serde(default)]
    pub primary_domain: Option<String>,

    /// Subdomain labels (without the primary domain)
    #[serde(default)]
    pub subdomains: Vec<String>,
}

impl Subdomains {
    /// Fully-qualified subdomain names
    #[must_use]
    pub fn fqdns(&self) -> Vec<String> {
        match self.primary_domain.as_deref() {
            Some(domain) => self
                .subdomains
                .iter()
                .map(|label| format!("{label}.{domain}"))
                .collect(),
            None => self.subdomains.clone(),
        }
    }
}
