//! IP address objects.

use crate::analyzer::{Analyzer, AnalyzerInner};
use crate::article::Article;
use crate::certificate::Certificate;
use crate::hostname::Hostname;
use crate::illuminate::IntelProfile;
use crate::memo::Memo;
use crate::records::RecordList;
use crate::relations::Relations;
use passivetotal_core::{
    Component, Cookie, Enrichment, HostPair, HostPairDirection, MalwareRecord, OsintRecord,
    Reputation, Resolution, Result, Service, Summary, Tracker, WhoisRecord,
};
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, Weak};
use tracing::debug;

/// An IPv4 or IPv6 address and everything known about it
#[derive(Clone)]
pub struct IpAddress {
    inner: Arc<IpInner>,
}

struct IpInner {
    address: IpAddr,
    query: String,
    analyzer: Weak<AnalyzerInner>,
    relations: Relations,
    hostnames: Memo<RecordList<Hostname>>,
    services: Memo<RecordList<Service>>,
    certificates: Memo<RecordList<Certificate>>,
}

impl std::fmt::Debug for IpAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IpAddress").field(&self.inner.address).finish()
    }
}

impl std::fmt::Display for IpAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.inner.address, f)
    }
}

impl IpAddress {
    pub(crate) fn new(address: IpAddr, analyzer: Weak<AnalyzerInner>) -> Self {
        Self {
            inner: Arc::new(IpInner {
                address,
                query: address.to_string(),
                analyzer,
                relations: Relations::default(),
                hostnames: Memo::new(),
                services: Memo::new(),
                certificates: Memo::new(),
            }),
        }
    }

    fn analyzer(&self) -> Result<Analyzer> {
        Analyzer::upgrade(&self.inner.analyzer)
    }

    fn query(&self) -> &str {
        &self.inner.query
    }

    /// Returns true if both handles refer to the same object
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The address
    #[must_use]
    pub fn address(&self) -> IpAddr {
        self.inner.address
    }

    /// Returns true for publicly routable addresses
    #[must_use]
    pub fn is_routable(&self) -> bool {
        match self.inner.address {
            IpAddr::V4(v4) => is_routable_v4(v4),
            IpAddr::V6(v6) => is_routable_v6(v6),
        }
    }

    /// Passive DNS resolutions in the analyzer's date range
    pub async fn resolutions(&self) -> Result<RecordList<Resolution>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.resolutions(&analyzer, self.query()).await
    }

    /// Hostnames that resolved to this address
    pub async fn hostnames(&self) -> Result<RecordList<Hostname>> {
        let analyzer = self.analyzer()?;
        self.inner
            .hostnames
            .get_or_try_init(|| async {
                let resolutions = self.inner.relations.resolutions(&analyzer, self.query()).await?;
                let mut seen = HashSet::new();
                Ok(resolutions
                    .iter()
                    .filter(|r| r.resolve_type.as_deref() != Some("ip"))
                    .filter_map(|r| analyzer.hostname(&r.resolve).ok())
                    .filter(|host| seen.insert(host.name().to_string()))
                    .collect())
            })
            .await
    }

    /// Current WHOIS record for the netblock
    pub async fn whois(&self) -> Result<Arc<WhoisRecord>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.whois(&analyzer, self.query()).await
    }

    /// Services observed on the address
    pub async fn services(&self) -> Result<RecordList<Service>> {
        let analyzer = self.analyzer()?;
        self.inner
            .services
            .get_or_try_init(|| async {
                debug!(ip = %self.inner.address, relation = "services", "fetching");
                let services = analyzer.client().services().services(self.query()).await?;
                Ok(services.results.into())
            })
            .await
    }

    /// Certificates the address has presented
    pub async fn certificates(&self) -> Result<RecordList<Certificate>> {
        let analyzer = self.analyzer()?;
        self.inner
            .certificates
            .get_or_try_init(|| async {
                debug!(ip = %self.inner.address, relation = "certificates", "fetching");
                let history = analyzer.client().ssl().history(self.query()).await?;
                let mut seen = HashSet::new();
                Ok(history
                    .results
                    .iter()
                    .filter(|entry| seen.insert(entry.sha1.to_ascii_lowercase()))
                    .filter_map(|entry| analyzer.certificate(&entry.sha1).ok())
                    .collect())
            })
            .await
    }

    /// Record counts per dataset
    pub async fn summary(&self) -> Result<Arc<Summary>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.summary(&analyzer, self.query()).await
    }

    /// Illuminate reputation score
    pub async fn reputation(&self) -> Result<Arc<Reputation>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.reputation(&analyzer, self.query()).await
    }

    /// Enrichment metadata
    pub async fn enrichment(&self) -> Result<Arc<Enrichment>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.enrichment(&analyzer, self.query()).await
    }

    /// OSINT reports mentioning the address
    pub async fn osint(&self) -> Result<RecordList<OsintRecord>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.osint(&analyzer, self.query()).await
    }

    /// Malware samples associated with the address
    pub async fn malware(&self) -> Result<RecordList<MalwareRecord>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.malware(&analyzer, self.query()).await
    }

    /// Trackers observed on the address
    pub async fn trackers(&self) -> Result<RecordList<Tracker>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.trackers(&analyzer, self.query()).await
    }

    /// Web components observed on the address
    pub async fn components(&self) -> Result<RecordList<Component>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.components(&analyzer, self.query()).await
    }

    /// Cookies observed on the address
    pub async fn cookies(&self) -> Result<RecordList<Cookie>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.cookies(&analyzer, self.query()).await
    }

    /// Hosts this address links or redirects to
    pub async fn hostpair_children(&self) -> Result<RecordList<HostPair>> {
        let analyzer = self.analyzer()?;
        self.inner
            .relations
            .host_pairs(&analyzer, self.query(), HostPairDirection::Children)
            .await
    }

    /// Hosts that link or redirect to this address
    pub async fn hostpair_parents(&self) -> Result<RecordList<HostPair>> {
        let analyzer = self.analyzer()?;
        self.inner
            .relations
            .host_pairs(&analyzer, self.query(), HostPairDirection::Parents)
            .await
    }

    /// Articles listing the address as an indicator
    pub async fn articles(&self) -> Result<RecordList<Article>> {
        let analyzer = self.analyzer()?;
        self.inner.relations.articles(&analyzer, self.query()).await
    }

    /// Intel profiles listing the address as an indicator
    pub async fn intel_profiles(&self) -> Result<RecordList<IntelProfile>> {
        let analyzer = self.analyzer()?;
        self.inner
            .relations
            .intel_profiles(&analyzer, self.query())
            .await
    }

    /// Forget everything fetched for this address
    pub async fn reset(&self) {
        self.inner.relations.reset().await;
        self.inner.hostnames.reset().await;
        self.inner.services.reset().await;
        self.inner.certificates.reset().await;
    }

    pub(crate) fn release(&self) {
        self.inner.relations.release();
        self.inner.hostnames.try_reset();
        self.inner.services.try_reset();
        self.inner.certificates.try_reset();
    }
}

fn is_routable_v4(ip: Ipv4Addr) -> bool {
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_multicast()
        || ip.is_unspecified()
        || ip.is_documentation()
        || ip.is_broadcast())
}

fn is_routable_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    let unique_local = first & 0xfe00 == 0xfc00;
    let link_local = first & 0xffc0 == 0xfe80;
    let documentation = first == 0x2001 && ip.segments()[1] == 0x0db8;

    !(ip.is_loopback()
        || ip.is_unspecified()
        || ip.is_multicast()
        || unique_local
        || link_local
        || documentation)
}
