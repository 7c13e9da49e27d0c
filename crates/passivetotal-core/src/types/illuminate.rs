//! Illuminate product types: reputation, intel profiles, attack surface
//! and vulnerability intelligence.

use super::common::{impl_first_last_seen, Paginated};
use serde::{Deserialize, Serialize};

fn page_total(total: Option<u64>) -> Option<usize> {
    total.and_then(|t| usize::try_from(t).ok())
}

/// Reputation verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReputationClassification {
    /// Known bad
    Malicious,
    /// Possibly bad
    Suspicious,
    /// Known good
    Good,
    /// No verdict
    #[default]
    #[serde(other)]
    Unknown,
}

/// Reputation score for a domain or IP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reputation {
    /// Score from 0 (benign) to 100 (malicious)
    #[serde(default)]
    pub score: u8,

    /// Verdict
    #[serde(default)]
    pub classification: ReputationClassification,

    /// Rules that contributed to the score
    #[serde(default)]
    pub rules: Vec<ReputationRule>,
}

impl Reputation {
    /// Returns true if the verdict is malicious or suspicious
    #[must_use]
    pub const fn is_risky(&self) -> bool {
        matches!(
            self.classification,
            ReputationClassification::Malicious | ReputationClassification::Suspicious
        )
    }

    /// The highest-severity rule
    #[must_use]
    pub fn top_rule(&self) -> Option<&ReputationRule> {
        self.rules.iter().max_by_key(|r| r.severity)
    }
}

/// A rule contributing to a reputation score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReputationRule {
    /// Rule name
    #[serde(default)]
    pub name: String,

    /// What the rule detected
    #[serde(default)]
    pub description: Option<String>,

    /// Severity, higher is worse
    #[serde(default)]
    pub severity: u8,

    /// Supporting link
    #[serde(default)]
    pub link: Option<String>,
}

/// Threat-actor intel profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelProfile {
    /// Profile id
    #[serde(default)]
    pub id: String,

    /// Profile title
    #[serde(default)]
    pub title: String,

    /// Other names for the actor
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Profile tags
    #[serde(default)]
    pub tags: Vec<IntelProfileTag>,

    /// Indicators attached to the profile
    #[serde(default)]
    pub indicator_count: Option<u64>,

    /// Of which public (OSINT)
    #[serde(default)]
    pub osint_indicator_count: Option<u64>,
}

/// Intel profile tag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelProfileTag {
    /// Tag label
    #[serde(default)]
    pub label: String,

    /// Country the tag refers to, if any
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Intel profile list response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelProfiles {
    /// Profiles across all pages, when reported
    #[serde(default)]
    pub total_count: Option<u64>,

    /// Profiles
    #[serde(default)]
    pub results: Vec<IntelProfile>,
}

/// Indicator attached to an intel profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelIndicator {
    /// Indicator id
    #[serde(default)]
    pub id: Option<String>,

    /// Kind of indicator (domain, ip, hash, ...)
    #[serde(default)]
    pub artifact_type: Option<String>,

    /// Indicator value
    #[serde(default)]
    pub value: String,

    /// Source of the indicator
    #[serde(default)]
    pub source: Option<String>,

    /// Whether the indicator is public
    #[serde(default)]
    pub osint: bool,

    /// Public reference, when public
    #[serde(default)]
    pub osint_url: Option<String>,

    /// Owning profile id
    #[serde(default)]
    pub profile_id: Option<String>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,
}

/// Intel profile indicators page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelIndicators {
    /// Indicators across all pages, when reported
    #[serde(default)]
    pub total_count: Option<u64>,

    /// Indicators on this page
    #[serde(default)]
    pub results: Vec<IntelIndicator>,
}

impl Paginated for IntelIndicators {
    type Item = IntelIndicator;

    fn total(&self) -> Option<usize> {
        page_total(self.total_count)
    }

    fn into_items(self) -> Vec<IntelIndicator> {
        self.results
    }
}

/// Profiles that list a given indicator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorProfiles {
    /// One entry per matched indicator
    #[serde(default)]
    pub results: Vec<IndicatorProfileMatch>,
}

impl IndicatorProfiles {
    /// Every matched profile, flattened
    #[must_use]
    pub fn profiles(&self) -> Vec<&IntelProfile> {
        self.results.iter().flat_map(|m| m.profiles.iter()).collect()
    }
}

/// Profiles matching one indicator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorProfileMatch {
    /// The matched indicator
    #[serde(default)]
    pub artifact: Option<String>,

    /// Profiles listing it
    #[serde(default)]
    pub profiles: Vec<IntelProfile>,
}

/// Insight priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    /// High priority
    #[serde(alias = "HIGH")]
    High,
    /// Medium priority
    #[serde(alias = "MEDIUM")]
    Medium,
    /// Low priority
    #[serde(alias = "LOW")]
    Low,
}

impl InsightPriority {
    /// All levels, most urgent first
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Level name as expected by the API
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Counts for one priority level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityCounts {
    /// Insights at this level
    #[serde(default)]
    pub insight_count: u64,

    /// Observations behind those insights
    #[serde(default)]
    pub observation_count: u64,
}

/// Counts for every priority level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Priorities {
    /// High priority
    #[serde(default)]
    pub high: PriorityCounts,
    /// Medium priority
    #[serde(default)]
    pub medium: PriorityCounts,
    /// Low priority
    #[serde(default)]
    pub low: PriorityCounts,
}

impl Priorities {
    /// Counts for `priority`
    #[must_use]
    pub const fn get(&self, priority: InsightPriority) -> &PriorityCounts {
        match priority {
            InsightPriority::High => &self.high,
            InsightPriority::Medium => &self.medium,
            InsightPriority::Low => &self.low,
        }
    }
}

/// An organization's attack surface
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackSurface {
    /// Attack surface id
    #[serde(default)]
    pub id: u64,

    /// Organization name
    #[serde(default)]
    pub name: String,

    /// Insight counts per priority
    #[serde(default)]
    pub priorities: Priorities,
}

/// Third-party attack surfaces page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackSurfaces {
    /// Attack surfaces across all pages, when reported
    #[serde(default)]
    pub total_count: Option<u64>,

    /// Attack surfaces on this page
    #[serde(default, alias = "vendors")]
    pub results: Vec<AttackSurface>,
}

impl Paginated for AttackSurfaces {
    type Item = AttackSurface;

    fn total(&self) -> Option<usize> {
        page_total(self.total_count)
    }

    fn into_items(self) -> Vec<AttackSurface> {
        self.results
    }
}

/// A single attack-surface insight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackSurfaceInsight {
    /// Insight id
    #[serde(default)]
    pub insight_id: Option<String>,

    /// Insight name
    #[serde(default)]
    pub name: String,

    /// What the insight means
    #[serde(default)]
    pub description: Option<String>,

    /// Assets affected
    #[serde(default)]
    pub observation_count: u64,
}

/// Insights for one priority level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackSurfaceInsights {
    /// Level these insights belong to
    #[serde(default)]
    pub priority_level: Option<InsightPriority>,

    /// Insights
    #[serde(default)]
    pub insights: Vec<AttackSurfaceInsight>,
}

impl AttackSurfaceInsights {
    /// Insights with at least one observation
    #[must_use]
    pub fn active(&self) -> Vec<&AttackSurfaceInsight> {
        self.insights
            .iter()
            .filter(|i| i.observation_count > 0)
            .collect()
    }
}

/// Weakness category attached to a CVE
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cwe {
    /// CWE id
    #[serde(default)]
    pub cwe_id: String,

    /// CWE name
    #[serde(default)]
    pub cwe_name: Option<String>,
}

/// CVE affecting an attack surface
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackSurfaceCve {
    /// CVE id
    #[serde(default)]
    pub cve_id: String,

    /// Weakness categories
    #[serde(default)]
    pub cwes: Vec<Cwe>,

    /// Priority score
    #[serde(default)]
    pub priority_score: Option<f64>,

    /// Assets affected
    #[serde(default)]
    pub observation_count: u64,

    /// Link to the CVE in the web UI
    #[serde(default)]
    pub cve_link: Option<String>,
}

/// Attack-surface CVEs page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackSurfaceCves {
    /// CVEs across all pages, when reported
    #[serde(default)]
    pub total_count: Option<u64>,

    /// CVEs on this page
    #[serde(default)]
    pub cves: Vec<AttackSurfaceCve>,
}

impl Paginated for AttackSurfaceCves {
    type Item = AttackSurfaceCve;

    fn total(&self) -> Option<usize> {
        page_total(self.total_count)
    }

    fn into_items(self) -> Vec<AttackSurfaceCve> {
        self.cves
    }
}

/// Asset on which a CVE was observed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveObservation {
    /// Asset kind (HOST, IP_ADDRESS, ...)
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// Asset name
    #[serde(default)]
    pub name: String,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,
}

impl_first_last_seen!(CveObservation, IntelIndicator);

/// CVE observations page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CveObservations {
    /// Observations across all pages, when reported
    #[serde(default)]
    pub total_count: Option<u64>,

    /// Observations on this page
    #[serde(default, alias = "assets")]
    pub results: Vec<CveObservation>,
}

impl Paginated for CveObservations {
    type Item = CveObservation;

    fn total(&self) -> Option<usize> {
        page_total(self.total_count)
    }

    fn into_items(self) -> Vec<CveObservation> {
        self.results
    }
}

/// Vulnerability intelligence article for a CVE
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnArticle {
    /// CVE id
    #[serde(default)]
    pub cve_id: String,

    /// Vulnerability description
    #[serde(default)]
    pub description: Option<String>,

    /// Priority score
    #[serde(default)]
    pub priority_score: Option<f64>,

    /// Weakness categories
    #[serde(default)]
    pub cwes: Vec<Cwe>,

    /// Publication date
    #[serde(default)]
    pub published_date: Option<String>,

    /// Last modification date
    #[serde(default)]
    pub last_modified_date: Option<String>,

    /// External references
    #[serde(default)]
    pub references: Vec<VulnReference>,

    /// Affected components
    #[serde(default)]
    pub components: Vec<VulnComponent>,

    /// Assets affected across all attack surfaces
    #[serde(default)]
    pub observation_count: Option<u64>,
}

/// Reference attached to a vulnerability article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VulnReference {
    /// Reference URL
    #[serde(default)]
    pub url: String,

    /// Reference title
    #[serde(default)]
    pub name: Option<String>,
}

/// Component affected by a vulnerability
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VulnComponent {
    /// Component name
    #[serde(default)]
    pub name: String,

    /// Component description
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reputation() {
        let json = r#"{
            "score": 88,
            "classification": "MALICIOUS",
            "rules": [
                {"name": "Blocklist", "severity": 5},
                {"name": "Young domain", "severity": 2}
            ]
        }"#;
        let rep: Reputation = serde_json::from_str(json).unwrap();
        assert!(rep.is_risky());
        assert_eq!(rep.top_rule().map(|r| r.name.as_str()), Some("Blocklist"));

        let unknown: Reputation = serde_json::from_str(r#"{"classification": "NEW_VALUE"}"#).unwrap();
        assert_eq!(unknown.classification, ReputationClassification::Unknown);
        assert!(!unknown.is_risky());
    }

    #[test]
    fn test_parse_attack_surface() {
        let json = r#"{
            "id": 88256,
            "name": "RiskIQ, Inc.",
            "priorities": {
                "high": {"insightCount": 2, "observationCount": 7},
                "low": {"insightCount": 1, "observationCount": 1}
            }
        }"#;
        let asi: AttackSurface = serde_json::from_str(json).unwrap();
        assert_eq!(asi.priorities.get(InsightPriority::High).observation_count, 7);
        assert_eq!(asi.priorities.get(InsightPriority::Medium).insight_count, 0);
    }

    #[test]
    fn test_third_party_vendors_alias() {
        let page: AttackSurfaces =
            serde_json::from_str(r#"{"totalCount": 5, "vendors": [{"id": 1, "name": "Vendor"}]}"#)
                .unwrap();
        assert_eq!(page.total(), Some(5));
        assert_eq!(page.into_items()[0].name, "Vendor");
    }

    #[test]
    fn test_active_insights() {
        let insights: AttackSurfaceInsights = serde_json::from_str(
            r#"{"priorityLevel": "high", "insights": [
                {"name": "Expired certificates", "observationCount": 3},
                {"name": "Open RDP", "observationCount": 0}
            ]}"#,
        )
        .unwrap();
        assert_eq!(insights.priority_level, Some(InsightPriority::High));
        assert_eq!(insights.active().len(), 1);
    }
}
