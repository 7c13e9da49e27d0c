//! Hostname objects.

use crate::analyzer::{Analyzer, AnalyzerInner};
use crate::article::Article;
use crate::certificate::Certificate;
use crate::illuminate::IntelProfile;
use crate::ip::IpAddress;
use crate::memo::Memo;
use crate::records::RecordList;
use crate::relations::Relations;
use passivetotal_core::{
    Component, Cookie, Enrichment, HostPair, HostPairDirection, MalwareRecord, OsintRecord,
    Reputation, Resolution, Result, SslField, Summary, Tracker, WhoisRecord,
};
use std::collections::HashSet;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Second-level labels that act as public suffixes under a country code.
const SECOND_LEVEL_SUFFIXES: &[&str] = &[
    "ac", "co", "com", "edu", "gov", "net", "org", "ltd", "plc", "gob", "gouv", "nic", "mil",
    "ne", "or", "go", "sch", "nhs", "police",
];

/// A DNS hostname and everything known about it.
///
/// Obtained from [`Analyzer::hostname`]; handles are cheap to clone and
/// share memoized data.
#[derive(Clone)]
pub struct Hostname {
    inner: Arc<HostnameInner>,
}

struct HostnameInner {
    name: String,
    analyzer: Weak<AnalyzerInner>,
    relations: Relations,
    ips: Memo<RecordList<IpAddress>>,
    subdomains: Memo<RecordList<Hostname>>,
    certificates: Memo<RecordList<Certificate>>,
}

impl std::fmt::Debug for Hostname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Hostname").field(&self.inner.name).finish()
    }
}

impl std::fmt::Display for Hostname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner.name)
    }
}

impl Hostname {
    pub(crate) fn new(name: String, analyzer: Weak<AnalyzerInner>) -> Self {
        Self {
            inner: Arc::new(HostnameInner {
                name,
                analyzer,
                relations: Relations::default(),
                ips: Memo::new(),
                subdomains: Memo::new(),
                certificates: Memo::new(),
            }),
        }
    }

    fn analyzer(&self) -> Result<Analyzer> {
        Analyzer::upgrade(&self.inner.analyzer)
    }

    /// Returns true if both handles refer to the same object
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Normalized hostname
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Top-level domain
    #[must_use]
    pub fn tld(&self) -> &str {
        self.inner.name.rsplit('.').next().unwrap_or(&self.inner.name)
    }

    /// Registrable domain, e.g. `example.co.uk` for `www.example.co.uk`
    #[must_use]
    pub fn registered_domain(&self) -> &str {
        registered_domain(&self.inner.name)
    }

    /// Returns true if the hostname is itself a registrable domain
    #[must_use]
    pub fn is_registered_domain(&self) -> bool {
        self.registered_domain() == self.inner.name
    }

    /// Passive DNS resolutions in the analyzer's date range
    pub async fn resolutions(&self) -> Result<RecordList<Resolution>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.resolutions(&analyzer, self.name()).await
    }

    /// IP addresses this hostname resolved to (A and AAAA records)
    pub async fn ips(&self) -> Result<RecordList<IpAddress>> {
        let analyzer = self.analyzer()?;
        self.inner
            .ips
            .get_or_try_init(|| async {
                let resolutions = self.inner.relations.resolutions(&analyzer, self.name()).await?;
                let mut seen = HashSet::new();
                Ok(resolutions
                    .iter()
                    .filter(|r| r.is_address_record())
                    .filter_map(Resolution::resolve_ip)
                    .filter(|ip| seen.insert(*ip))
                    .map(|ip| analyzer.ip_addr(ip))
                    .collect())
            })
            .await
    }

    /// Current WHOIS record
    pub async fn whois(&self) -> Result<Arc<WhoisRecord>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.whois(&analyzer, self.name()).await
    }

    /// Record counts per dataset
    pub async fn summary(&self) -> Result<Arc<Summary>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.summary(&analyzer, self.name()).await
    }

    /// Illuminate reputation score
    pub async fn reputation(&self) -> Result<Arc<Reputation>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.reputation(&analyzer, self.name()).await
    }

    /// Enrichment metadata
    pub async fn enrichment(&self) -> Result<Arc<Enrichment>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.enrichment(&analyzer, self.name()).await
    }

    /// OSINT reports mentioning the hostname
    pub async fn osint(&self) -> Result<RecordList<OsintRecord>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.osint(&analyzer, self.name()).await
    }

    /// Malware samples associated with the hostname
    pub async fn malware(&self) -> Result<RecordList<MalwareRecord>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.malware(&analyzer, self.name()).await
    }

    /// Known subdomains as hostname objects
    pub async fn subdomains(&self) -> Result<RecordList<Hostname>> {
        let analyzer = self.analyzer()?;
        self.inner
            .subdomains
            .get_or_try_init(|| async {
                debug!(hostname = %self.name(), relation = "subdomains", "fetching");
                let subdomains = analyzer.client().enrichment().subdomains(self.name()).await?;
                Ok(subdomains
                    .fqdns()
                    .iter()
                    .filter_map(|fqdn| analyzer.hostname(fqdn).ok())
                    .collect())
            })
            .await
    }

    /// Certificates listing this hostname as a subject alternative name
    pub async fn certificates(&self) -> Result<RecordList<Certificate>> {
        let analyzer = self.analyzer()?;
        self.inner
            .certificates
            .get_or_try_init(|| async {
                debug!(hostname = %self.name(), relation = "certificates", "fetching");
                analyzer
                    .search_certificates(SslField::SubjectAlternativeName, self.name())
                    .await
            })
            .await
    }

    /// Trackers observed on the hostname
    pub async fn trackers(&self) -> Result<RecordList<Tracker>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.trackers(&analyzer, self.name()).await
    }

    /// Web components observed on the hostname
    pub async fn components(&self) -> Result<RecordList<Component>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.components(&analyzer, self.name()).await
    }

    /// Cookies observed on the hostname
    pub async fn cookies(&self) -> Result<RecordList<Cookie>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.cookies(&analyzer, self.name()).await
    }

    /// Hosts this hostname links or redirects to
    pub async fn hostpair_children(&self) -> Result<RecordList<HostPair>> {
        let analyzer = self.analyzer()?;
        self.inner
            .relations
            .host_pairs(&analyzer, self.name(), HostPairDirection::Children)
            .await
    }

    /// Hosts that link or redirect to this hostname
    pub async fn hostpair_parents(&self) -> Result<RecordList<HostPair>> {
        let analyzer = self.analyzer()?;
        self.inner
            .relations
            .host_pairs(&analyzer, self.name(), HostPairDirection::Parents)
            .await
    }

    /// Articles listing the hostname as an indicator
    pub async fn articles(&self) -> Result<RecordList<Article>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.articles(&analyzer, self.name()).await
    }

    /// Intel profiles listing the hostname as an indicator
    pub async fn intel_profiles(&self) -> Result<RecordList<IntelProfile>> {
        let analyzer = self.analyzer()?;
        self.inner
            .relations
            .intel_profiles(&analyzer, self.name())
            .await
    }

    /// Forget everything fetched for this hostname
    pub async fn reset(&self) {
        self.inner.relations.reset().await;
        self.inner.ips.reset().await;
        self.inner.subdomains.reset().await;
        self.inner.certificates.reset().await;
    }

    pub(crate) fn release(&self) {
        self.inner.relations.release();
        self.inner.ips.try_reset();
        self.inner.subdomains.try_reset();
        self.inner.certificates.try_reset();
    }
}

/// Last two labels, or last three when the second-to-last label is a
/// common second-level suffix under a two-letter country code.
fn registered_domain(name: &str) -> &str {
    let labels: Vec<&str> = name.split('.').collect();
    let keep = match labels.as_slice() {
        [.., second, tld] if tld.len() == 2 && SECOND_LEVEL_SUFFIXES.contains(second) => 3,
        _ => 2,
    };
    if labels.len() <= keep {
        return name;
    }

    let skip: usize = labels[..labels.len() - keep]
        .iter()
        .map(|label| label.len() + 1)
        .sum();
    &name[skip..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_domain() {
        assert_eq!(registered_domain("www.example.org"), "example.org");
        assert_eq!(registered_domain("example.org"), "example.org");
        assert_eq!(registered_domain("a.b.example.co.uk"), "example.co.uk");
        assert_eq!(registered_domain("shop.example.com.au"), "example.com.au");
        assert_eq!(registered_domain("co.uk"), "co.uk");
        assert_eq!(registered_domain("mail.example.de"), "example.de");
    }

    #[test]
    fn test_name_properties() {
        let host = Hostname::new("login.example.co.uk".to_string(), Weak::new());
        assert_eq!(host.tld(), "uk");
        assert_eq!(host.registered_domain(), "example.co.uk");
        assert!(!host.is_registered_domain());
        assert_eq!(host.to_string(), "login.example.co.uk");
    }

    #[tokio::test]
    async fn test_pivot_cycle_released_with_analyzer() {
        use passivetotal_client::{Credentials, PassiveTotalClient, RetryConfig};
        use serde_json::json;
        use wiremock::matchers::{path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(path("/dns/passive"))
            .and(query_param("query", "example.org"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"resolve": "198.51.100.7", "resolveType": "ip", "recordType": "A"}]
            })))
            .mount(&server)
            .await;
        Mock::given(path("/dns/passive"))
            .and(query_param("query", "198.51.100.7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"resolve": "example.org", "resolveType": "domain", "recordType": "A"}]
            })))
            .mount(&server)
            .await;

        let client = PassiveTotalClient::builder(Credentials::new("user", "key"))
            .base_url(server.uri())
            .retry(RetryConfig::disabled())
            .build();
        let analyzer = Analyzer::new(client);

        let host = analyzer.hostname("example.org").unwrap();
        let ips = host.ips().await.unwrap();
        let back = ips.first().unwrap().hostnames().await.unwrap();
        assert!(back.first().unwrap().ptr_eq(&host));

        let weak = Arc::downgrade(&host.inner);
        drop((back, ips, host));
        drop(analyzer);

        assert!(weak.upgrade().is_none());
    }

    #[tokio::test]
    async fn test_dropped_analyzer() {
        let host = Hostname::new("example.org".to_string(), Weak::new());
        let err = host.resolutions().await.unwrap_err();
        assert!(matches!(
            err,
            passivetotal_core::PassiveTotalError::AnalyzerDropped
        ));
    }
}
