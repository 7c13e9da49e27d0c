//! Objects reachable from a free-form query.

use crate::hostname::Hostname;
use crate::ip::IpAddress;
use crate::records::RecordList;
use passivetotal_core::{Reputation, Resolution, Result, Summary, WhoisRecord};
use std::sync::Arc;

/// A hostname or an IP address
#[derive(Debug, Clone)]
pub enum AnalyzerObject {
    /// A DNS hostname
    Hostname(Hostname),
    /// An IPv4 or IPv6 address
    Ip(IpAddress),
}

impl std::fmt::Display for AnalyzerObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hostname(host) => std::fmt::Display::fmt(host, f),
            Self::Ip(ip) => std::fmt::Display::fmt(ip, f),
        }
    }
}

impl From<Hostname> for AnalyzerObject {
    fn from(host: Hostname) -> Self {
        Self::Hostname(host)
    }
}

impl From<IpAddress> for AnalyzerObject {
    fn from(ip: IpAddress) -> Self {
        Self::Ip(ip)
    }
}

impl AnalyzerObject {
    /// The hostname, if this is one
    #[must_use]
    pub fn as_hostname(&self) -> Option<&Hostname> {
        match self {
            Self::Hostname(host) => Some(host),
            Self::Ip(_) => None,
        }
    }

    /// The IP address, if this is one
    #[must_use]
    pub fn as_ip(&self) -> Option<&IpAddress> {
        match self {
            Self::Ip(ip) => Some(ip),
            Self::Hostname(_) => None,
        }
    }

    /// Passive DNS resolutions
    pub async fn resolutions(&self) -> Result<RecordList<Resolution>> {
        match self {
            Self::Hostname(host) => host.resolutions().await,
            Self::Ip(ip) => ip.resolutions().await,
        }
    }

    /// Current WHOIS record
    pub async fn whois(&self) -> Result<Arc<WhoisRecord>> {
        match self {
            Self::Hostname(host) => host.whois().await,
            Self::Ip(ip) => ip.whois().await,
        }
    }

    /// Record counts per dataset
    pub async fn summary(&self) -> Result<Arc<Summary>> {
        match self {
            Self::Hostname(host) => host.summary().await,
            Self::Ip(ip) => ip.summary().await,
        }
    }

    /// Illuminate reputation score
    pub async fn reputation(&self) -> Result<Arc<Reputation>> {
        match self {
            Self::Hostname(host) => host.reputation().await,
            Self::Ip(ip) => ip.reputation().await,
        }
    }

    /// Forget everything fetched for the object
    pub async fn reset(&self) {
        match self {
            Self::Hostname(host) => host.reset().await,
            Self::Ip(ip) => ip.reset().await,
        }
    }
}
