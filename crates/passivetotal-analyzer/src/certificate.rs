//! SSL certificate objects.

use crate::analyzer::{Analyzer, AnalyzerInner};
use crate::ip::IpAddress;
use crate::memo::Memo;
use crate::records::RecordList;
use chrono::NaiveDateTime;
use passivetotal_core::{Result, SslCertificate, SslHistoryEntry};
use std::collections::HashSet;
use std::sync::{Arc, Weak};
use tracing::debug;

/// An SSL certificate identified by its SHA-1 fingerprint.
///
/// Certificates reached through a search already carry their details.
/// Certificates reached by fingerprint alone fetch details the first time
/// something needs them.
#[derive(Clone)]
pub struct Certificate {
    inner: Arc<CertificateInner>,
}

struct CertificateInner {
    sha1: String,
    analyzer: Weak<AnalyzerInner>,
    details: Memo<Arc<SslCertificate>>,
    history: Memo<RecordList<SslHistoryEntry>>,
    ips: Memo<RecordList<IpAddress>>,
}

impl std::fmt::Debug for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Certificate")
            .field("sha1", &self.inner.sha1)
            .field("details", &self.inner.details)
            .finish_non_exhaustive()
    }
}

impl Certificate {
    pub(crate) fn new(sha1: String, analyzer: Weak<AnalyzerInner>) -> Self {
        Self::build(sha1, Memo::new(), analyzer)
    }

    pub(crate) fn with_details(
        sha1: String,
        details: Arc<SslCertificate>,
        analyzer: Weak<AnalyzerInner>,
    ) -> Self {
        Self::build(sha1, Memo::with_value(details), analyzer)
    }

    fn build(sha1: String, details: Memo<Arc<SslCertificate>>, analyzer: Weak<AnalyzerInner>) -> Self {
        Self {
            inner: Arc::new(CertificateInner {
                sha1,
                analyzer,
                details,
                history: Memo::new(),
                ips: Memo::new(),
            }),
        }
    }

    pub(crate) async fn seed(&self, details: Arc<SslCertificate>) {
        self.inner.details.set_if_empty(details).await;
    }

    fn analyzer(&self) -> Result<Analyzer> {
        Analyzer::upgrade(&self.inner.analyzer)
    }

    /// Returns true if both handles refer to the same object
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Lowercase hex SHA-1 fingerprint
    #[must_use]
    pub fn sha1(&self) -> &str {
        &self.inner.sha1
    }

    /// Returns true once certificate details are held locally
    pub async fn is_fetched(&self) -> bool {
        self.inner.details.is_set().await
    }

    /// Full certificate record, fetched on first use
    pub async fn details(&self) -> Result<Arc<SslCertificate>> {
        self.inner
            .details
            .get_or_try_init(|| async {
                let analyzer = self.analyzer()?;
                debug!(sha1 = %self.sha1(), "fetching certificate details");
                let record = analyzer.client().ssl().certificate(self.sha1()).await?;
                Ok(Arc::new(record))
            })
            .await
    }

    /// Subject alternative names
    pub async fn subject_alternative_names(&self) -> Result<Vec<String>> {
        Ok(self.details().await?.subject_alternative_names.clone())
    }

    /// Expiration timestamp
    pub async fn expires(&self) -> Result<Option<NaiveDateTime>> {
        Ok(self.details().await?.expires())
    }

    /// Returns true if the certificate expired before `now`
    pub async fn is_expired(&self, now: NaiveDateTime) -> Result<bool> {
        Ok(self.details().await?.is_expired(now))
    }

    /// Where and when the certificate was observed
    pub async fn history(&self) -> Result<RecordList<SslHistoryEntry>> {
        self.inner
            .history
            .get_or_try_init(|| async {
                let analyzer = self.analyzer()?;
                let history = analyzer.client().ssl().history(self.sha1()).await?;
                Ok(history.results.into())
            })
            .await
    }

    /// IP addresses that presented the certificate
    pub async fn ips(&self) -> Result<RecordList<IpAddress>> {
        let analyzer = self.analyzer()?;
        self.inner
            .ips
            .get_or_try_init(|| async {
                let history = self.history().await?;
                let mut seen = HashSet::new();
                Ok(history
                    .iter()
                    .flat_map(SslHistoryEntry::ips)
                    .filter(|ip| seen.insert(*ip))
                    .map(|ip| analyzer.ip_addr(ip))
                    .collect())
            })
            .await
    }

    /// Forget fetched details and history
    pub async fn reset(&self) {
        self.inner.details.reset().await;
        self.inner.history.reset().await;
        self.inner.ips.reset().await;
    }

    pub(crate) fn release(&self) {
        self.inner.history.try_reset();
        self.inner.ips.try_reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passivetotal_core::PassiveTotalError;

    const SHA1: &str = "2d3f1a7c9b0e8d6f5a4b3c2d1e0f9a8b7c6d5e4f";

    #[tokio::test]
    async fn test_seeded_certificate_is_fetched() {
        let record = SslCertificate {
            sha1: SHA1.to_string(),
            subject_alternative_names: vec!["example.org".to_string()],
            ..SslCertificate::default()
        };
        let cert = Certificate::with_details(SHA1.to_string(), Arc::new(record), Weak::new());

        assert!(cert.is_fetched().await);
        assert_eq!(
            cert.subject_alternative_names().await.unwrap(),
            vec!["example.org"]
        );
    }

    #[tokio::test]
    async fn test_unfetched_without_analyzer() {
        let cert = Certificate::new(SHA1.to_string(), Weak::new());
        assert!(!cert.is_fetched().await);
        assert!(matches!(
            cert.details().await,
            Err(PassiveTotalError::AnalyzerDropped)
        ));
    }
}
