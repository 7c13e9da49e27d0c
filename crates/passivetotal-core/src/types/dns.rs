use super::common::impl_first_last_seen;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Passive DNS results for a domain or IP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassiveDnsResults {
    /// Number of records the API reports
    #[serde(default)]
    pub total_records: u64,

    /// The value that was queried
    #[serde(default)]
    pub query_value: Option<String>,

    /// Kind of value that was queried
    #[serde(default)]
    pub query_type: Option<String>,

    /// Earliest observation across all records
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Latest observation across all records
    #[serde(default)]
    pub last_seen: Option<String>,

    /// Individual resolutions
    #[serde(default)]
    pub results: Vec<Resolution>,
}

impl PassiveDnsResults {
    /// Distinct resolved values in the order they first appear
    #[must_use]
    pub fn unique_resolves(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.results
            .iter()
            .map(|r| r.resolve.as_str())
            .filter(|v| seen.insert(*v))
            .collect()
    }
}

impl_first_last_seen!(PassiveDnsResults);

/// A single passive DNS observation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// The queried side of the record
    #[serde(default)]
    pub value: String,

    /// The resolved side of the record
    #[serde(default)]
    pub resolve: String,

    /// Kind of the resolved value (ip, domain, email)
    #[serde(default)]
    pub resolve_type: Option<String>,

    /// DNS record type (A, AAAA, CNAME, MX, NS, SOA, TXT)
    #[serde(default)]
    pub record_type: Option<String>,

    /// Stable hash identifying the record
    #[serde(default)]
    pub record_hash: Option<String>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,

    /// When the record was collected
    #[serde(default)]
    pub collected: Option<String>,

    /// Data sources that observed the record
    #[serde(default)]
    pub source: Vec<String>,
}

impl Resolution {
    /// Try to parse the resolved value as an IP address
    #[must_use]
    pub fn resolve_ip(&self) -> Option<IpAddr> {
        self.resolve.parse().ok()
    }

    /// Returns true if this is an A or AAAA record
    #[must_use]
    pub fn is_address_record(&self) -> bool {
        matches!(self.record_type.as_deref(), Some("A" | "AAAA"))
    }

    /// Returns true if the record has the given type (case-insensitive)
    #[must_use]
    pub fn has_type(&self, record_type: &str) -> bool {
        self.record_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(record_type))
    }
}

impl_first_last_seen!(Resolution);

/// Unique resolutions with observation frequency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueResolutions {
    /// Number of unique values
    #[serde(default)]
    pub total: u64,

    /// The value that was queried
    #[serde(default)]
    pub query_value: Option<String>,

    /// `(value, count)` pairs
    #[serde(default)]
    pub frequency: Vec<(String, u64)>,

    /// Unique resolved values
    #[serde(default)]
    pub results: Vec<String>,
}

impl UniqueResolutions {
    /// The most frequently observed value
    #[must_use]
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.frequency
            .iter()
            .max_by_key(|(_, count)| *count)
            .map(|(value, count)| (value.as_str(), *count))
    }
}

/// Keyword search results (shared by DNS, WHOIS and SSL keyword search)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordSearchResults {
    /// Matching records
    #[serde(default)]
    pub results: Vec<KeywordMatch>,
}

/// A single keyword search match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMatch {
    /// The value that matched
    #[serde(default)]
    pub focus: String,

    /// How it matched
    #[serde(default)]
    pub match_type: Option<String>,

    /// Field the keyword was found in
    #[serde(default)]
    pub field_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FirstLastSeen;

    const PDNS: &str = r#"{
        "totalRecords": 2,
        "queryValue": "riskiq.net",
        "queryType": "domain",
        "firstSeen": "2014-04-08 00:00:00",
        "lastSeen": "2024-01-02 03:04:05",
        "results": [
            {
                "value": "riskiq.net",
                "resolve": "104.18.1.1",
                "resolveType": "ip",
                "recordType": "A",
                "recordHash": "abc",
                "firstSeen": "2020-01-01 00:00:00",
                "lastSeen": "2024-01-02 03:04:05",
                "collected": "2024-01-03 00:00:00",
                "source": ["riskiq", "pingly"]
            },
            {
                "value": "riskiq.net",
                "resolve": "ns1.riskiq.net",
                "resolveType": "domain",
                "recordType": "NS",
                "firstSeen": "2014-04-08 00:00:00",
                "lastSeen": "2023-01-01 00:00:00"
            }
        ]
    }"#;

    #[test]
    fn test_parse_passive_dns() {
        let pdns: PassiveDnsResults = serde_json::from_str(PDNS).unwrap();
        assert_eq!(pdns.total_records, 2);
        assert_eq!(pdns.results.len(), 2);

        let first = &pdns.results[0];
        assert!(first.is_address_record());
        assert!(first.has_type("a"));
        assert_eq!(first.resolve_ip(), "104.18.1.1".parse().ok());
        assert_eq!(first.source, vec!["riskiq", "pingly"]);

        let second = &pdns.results[1];
        assert!(!second.is_address_record());
        assert!(second.resolve_ip().is_none());
        assert!(second.source.is_empty());
        assert!(pdns.first_seen().is_some());
    }

    #[test]
    fn test_unique_resolves_preserves_order() {
        let mut pdns: PassiveDnsResults = serde_json::from_str(PDNS).unwrap();
        pdns.results.push(pdns.results[0].clone());
        assert_eq!(pdns.unique_resolves(), vec!["104.18.1.1", "ns1.riskiq.net"]);
    }

    #[test]
    fn test_unique_resolutions_frequency() {
        let json = r#"{"total": 2, "frequency": [["1.1.1.1", 3], ["2.2.2.2", 9]], "results": ["1.1.1.1", "2.2.2.2"]}"#;
        let unique: UniqueResolutions = serde_json::from_str(json).unwrap();
        assert_eq!(unique.most_frequent(), Some(("2.2.2.2", 9)));
    }
}
