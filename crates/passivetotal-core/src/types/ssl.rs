use super::common::{impl_first_last_seen, parse_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Date format used on certificate validity fields
const CERT_DATE_FORMAT: &str = "%b %d %H:%M:%S %Y GMT";

fn parse_cert_date(value: Option<&str>) -> Option<NaiveDateTime> {
    let value = value?.trim();
    NaiveDateTime::parse_from_str(value, CERT_DATE_FORMAT)
        .ok()
        .or_else(|| parse_timestamp(value))
}

/// SSL certificate details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslCertificate {
    /// SHA-1 fingerprint, the certificate's identity in the API
    #[serde(default)]
    pub sha1: String,

    /// Certificate serial number
    #[serde(default)]
    pub serial_number: Option<String>,

    /// Start of validity
    #[serde(default)]
    pub issue_date: Option<String>,

    /// End of validity
    #[serde(default)]
    pub expiration_date: Option<String>,

    /// SSL/TLS version
    #[serde(default)]
    pub ssl_version: Option<String>,

    /// Fingerprint as reported by the API
    #[serde(default)]
    pub fingerprint: Option<String>,

    /// Issuer common name
    #[serde(default)]
    pub issuer_common_name: Option<String>,

    /// Issuer organization
    #[serde(default)]
    pub issuer_organization_name: Option<String>,

    /// Issuer country
    #[serde(default)]
    pub issuer_country: Option<String>,

    /// Issuer email address
    #[serde(default)]
    pub issuer_email_address: Option<String>,

    /// Subject common name
    #[serde(default)]
    pub subject_common_name: Option<String>,

    /// Subject organization
    #[serde(default)]
    pub subject_organization_name: Option<String>,

    /// Subject country
    #[serde(default)]
    pub subject_country: Option<String>,

    /// Subject email address
    #[serde(default)]
    pub subject_email_address: Option<String>,

    /// Subject alternative names
    #[serde(default)]
    pub subject_alternative_names: Vec<String>,
}

impl SslCertificate {
    /// Parsed start of validity
    #[must_use]
    pub fn issued(&self) -> Option<NaiveDateTime> {
        parse_cert_date(self.issue_date.as_deref())
    }

    /// Parsed end of validity
    #[must_use]
    pub fn expires(&self) -> Option<NaiveDateTime> {
        parse_cert_date(self.expiration_date.as_deref())
    }

    /// Returns true if the certificate expired before `now`
    #[must_use]
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires().is_some_and(|e| e < now)
    }

    /// Returns true if subject and issuer common names match
    #[must_use]
    pub fn is_self_signed(&self) -> bool {
        matches!(
            (&self.subject_common_name, &self.issuer_common_name),
            (Some(s), Some(i)) if s == i
        )
    }

    /// Returns true if the certificate names `hostname` (wildcards honored)
    #[must_use]
    pub fn covers(&self, hostname: &str) -> bool {
        let hostname = hostname.to_ascii_lowercase();
        self.subject_common_name
            .iter()
            .chain(self.subject_alternative_names.iter())
            .any(|name| {
                let name = name.to_ascii_lowercase();
                name.strip_prefix("*.").map_or(name == hostname, |suffix| {
                    hostname
                        .split_once('.')
                        .is_some_and(|(_, rest)| rest == suffix)
                })
            })
    }
}

/// Certificate details response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SslCertificateResults {
    /// Matching certificates
    #[serde(default)]
    pub results: Vec<SslCertificate>,
}

/// Where and when a certificate was observed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslHistoryEntry {
    /// Certificate SHA-1
    #[serde(default)]
    pub sha1: String,

    /// IP addresses presenting the certificate
    #[serde(default)]
    pub ip_addresses: Vec<String>,

    /// First observation
    #[serde(default)]
    pub first_seen: Option<String>,

    /// Last observation
    #[serde(default)]
    pub last_seen: Option<String>,
}

impl SslHistoryEntry {
    /// Parsed IP addresses, skipping invalid entries
    #[must_use]
    pub fn ips(&self) -> Vec<IpAddr> {
        self.ip_addresses
            .iter()
            .filter_map(|ip| ip.parse().ok())
            .collect()
    }
}

impl_first_last_seen!(SslHistoryEntry);

/// Certificate history response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SslHistory {
    /// History entries
    #[serde(default)]
    pub results: Vec<SslHistoryEntry>,
}

/// Certificate search response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SslSearchResults {
    /// Matching certificates
    #[serde(default)]
    pub results: Vec<SslCertificate>,
}

/// Field used for certificate search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SslField {
    /// Issuer common name
    IssuerCommonName,
    /// Issuer organization
    IssuerOrganizationName,
    /// Issuer email address
    IssuerEmailAddress,
    /// Subject common name
    SubjectCommonName,
    /// Subject organization
    SubjectOrganizationName,
    /// Subject email address
    SubjectEmailAddress,
    /// Subject alternative name
    SubjectAlternativeName,
    /// Serial number
    SerialNumber,
    /// SHA-1 fingerprint
    Sha1,
}

impl SslField {
    /// Field name as expected by the API
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IssuerCommonName => "issuerCommonName",
            Self::IssuerOrganizationName => "issuerOrganizationName",
            Self::IssuerEmailAddress => "issuerEmailAddress",
            Self::SubjectCommonName => "subjectCommonName",
            Self::SubjectOrganizationName => "subjectOrganizationName",
            Self::SubjectEmailAddress => "subjectEmailAddress",
            Self::SubjectAlternativeName => "subjectAlternativeName",
            Self::SerialNumber => "serialNumber",
            Self::Sha1 => "sha1",
        }
    }
}

impl std::fmt::Display for SslField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cert() -> SslCertificate {
        serde_json::from_str(
            r#"{
                "sha1": "e9a6cf9b5d1d1e0f3f6b3c0f1d7a2b4c5d6e7f80",
                "issueDate": "Jan 01 00:00:00 2020 GMT",
                "expirationDate": "Jan 01 00:00:00 2021 GMT",
                "issuerCommonName": "R3",
                "subjectCommonName": "riskiq.net",
                "subjectAlternativeNames": ["riskiq.net", "*.riskiq.net"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_certificate_dates() {
        let cert = cert();
        let now = parse_timestamp("2022-06-01 00:00:00").unwrap();
        assert!(cert.issued().is_some());
        assert!(cert.is_expired(now));
        assert!(!cert.is_self_signed());
    }

    #[test]
    fn test_certificate_covers_wildcards() {
        let cert = cert();
        assert!(cert.covers("riskiq.net"));
        assert!(cert.covers("WWW.riskiq.net"));
        assert!(!cert.covers("a.b.riskiq.net"));
        assert!(!cert.covers("example.com"));
    }

    #[test]
    fn test_history_entry_ips() {
        let entry: SslHistoryEntry = serde_json::from_str(
            r#"{"sha1": "abc", "ipAddresses": ["1.2.3.4", "bogus", "2001:db8::1"]}"#,
        )
        .unwrap();
        assert_eq!(entry.ips().len(), 2);
    }

    #[test]
    fn test_ssl_field_names() {
        assert_eq!(SslField::SubjectAlternativeName.as_str(), "subjectAlternativeName");
        assert_eq!(
            serde_json::to_string(&SslField::SerialNumber).unwrap(),
            "\"serialNumber\""
        );
    }
}
