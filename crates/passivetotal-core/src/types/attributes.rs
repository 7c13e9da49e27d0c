use super::common::{impl_first_last_seen, Paginated};
use serde::{Deserialize, Serialize};

/// One page of host-attribute records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeResults<T> {
    /// Records across all pages, when reported
    #[serde(default)]
    pub total_records: Option<u64>,

    /// Records on this page
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for AttributeResults<T> {
    fn default() -> Self {
        Self {
            total_records: None,
            results: Vec::new(),
        }
    }
}

impl<T> Paginated for AttributeResults<T> {
    type Item = T;

    fn total(&self) -> Option<usize> {
        self.total_records.and_then(|t| usize::try_from(t).ok())
    }

    fn into_items(self) -> Vec<T> {
        self.results
    }
}

/// Web component (framework, server, library) observed on a host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Host the component was observed on
    #[serde(default)]
    pub hostname: Option<String>,

    /// IP address the host resolved to
    #[serde(default)]
    pub address: Option<String>,

    /// Component category (e.g. "Server", "Framework")
    #[serde(default)]
    pub category: Option<String>,

    /// Component name
    #[serde(default)]
    pub label: Option<String>,

    /// Component version
    #[serde(default)]
    pub version: Option<String>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,
}

/// Analytics or tracking identifier observed on a host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    /// Host the tracker was observed on
    #[serde(default)]
    pub hostname: Option<String>,

    /// IP address the host resolved to
    #[serde(default)]
    pub address: Option<String>,

    /// Tracker type (e.g. "GoogleAnalyticsTrackingId")
    #[serde(default)]
    pub attribute_type: Option<String>,

    /// Tracker value
    #[serde(default)]
    pub attribute_value: Option<String>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,
}

/// Relationship between two hosts observed while crawling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostPair {
    /// Referring host
    #[serde(default)]
    pub parent: Option<String>,

    /// Referred host
    #[serde(default)]
    pub child: Option<String>,

    /// What linked them (e.g. "redirect", "iframe")
    #[serde(default)]
    pub cause: Option<String>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,
}

/// Direction of a host pair lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostPairDirection {
    /// Hosts the query refers to
    Children,
    /// Hosts referring to the query
    Parents,
}

impl HostPairDirection {
    /// Direction name as expected by the API
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Children => "children",
            Self::Parents => "parents",
        }
    }
}

/// Cookie observed on a host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    /// Host the cookie was set by
    #[serde(default)]
    pub hostname: Option<String>,

    /// Cookie name
    #[serde(default)]
    pub cookie_name: Option<String>,

    /// Cookie domain
    #[serde(default)]
    pub cookie_domain: Option<String>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,
}

impl_first_last_seen!(Component, Tracker, HostPair, Cookie);

/// Host found by tracker search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSearchHit {
    /// Host carrying the tracker
    #[serde(default)]
    pub hostname: Option<String>,

    /// Whether the host was ever blacklisted
    #[serde(default)]
    pub ever_blacklisted: Option<bool>,

    /// Alexa rank of the host
    #[serde(default)]
    pub alexa_rank: Option<u64>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,
}

impl_first_last_seen!(TrackerSearchHit);

/// Tracker search response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerSearchResults {
    /// Hosts carrying the tracker
    #[serde(default)]
    pub results: Vec<TrackerSearchHit>,
}

/// Open service on an IP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Port number
    #[serde(default)]
    pub port_number: u16,

    /// Transport protocol
    #[serde(default)]
    pub protocol: Option<String>,

    /// Port status (open, filtered, ...)
    #[serde(default)]
    pub status: Option<String>,

    /// Times the service was observed
    #[serde(default)]
    pub count: Option<u64>,

    /// Most recent scan
    #[serde(default)]
    pub last_scan: Option<String>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,

    /// Captured banners
    #[serde(default)]
    pub banners: Vec<Banner>,

    /// Software currently identified on the port
    #[serde(default)]
    pub current_services: Vec<ServiceSoftware>,
}

impl Service {
    /// Returns true if the port was last seen open
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("open"))
    }
}

/// Service banner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    /// Banner text
    #[serde(default)]
    pub banner: Option<String>,

    /// Scan that captured it
    #[serde(default)]
    pub scan_type: Option<String>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,
}

/// Software identified on a port
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceSoftware {
    /// Software name
    #[serde(default)]
    pub label: Option<String>,

    /// Software version
    #[serde(default)]
    pub version: Option<String>,

    /// Software category
    #[serde(default)]
    pub category: Option<String>,
}

impl_first_last_seen!(Service, Banner);

/// Services response for an IP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesResults {
    /// IP that was queried
    #[serde(default)]
    pub ip: Option<String>,

    /// Number of services reported
    #[serde(default)]
    pub total_count: Option<u64>,

    /// Services
    #[serde(default)]
    pub results: Vec<Service>,
}

impl ServicesResults {
    /// Ports currently open
    #[must_use]
    pub fn open_ports(&self) -> Vec<u16> {
        let mut ports: Vec<u16> = self
            .results
            .iter()
            .filter(|s| s.is_open())
            .map(|s| s.port_number)
            .collect();
        ports.sort_unstable();
        ports.dedup();
        ports
    }
}
