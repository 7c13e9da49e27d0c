//! Threat-intelligence article objects.

use crate::analyzer::{Analyzer, AnalyzerInner};
use crate::hostname::Hostname;
use crate::ip::IpAddress;
use crate::memo::Memo;
use crate::records::RecordList;
use passivetotal_core::{Article as ArticleRecord, Result};
use std::sync::{Arc, Weak};
use tracing::debug;

/// A published article and the indicators it lists
#[derive(Clone)]
pub struct Article {
    inner: Arc<ArticleInner>,
}

struct ArticleInner {
    listing: ArticleRecord,
    analyzer: Weak<AnalyzerInner>,
    details: Memo<Arc<ArticleRecord>>,
    hostnames: Memo<RecordList<Hostname>>,
    ips: Memo<RecordList<IpAddress>>,
}

impl std::fmt::Debug for Article {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Article")
            .field("id", &self.inner.listing.guid)
            .field("title", &self.inner.listing.title)
            .finish_non_exhaustive()
    }
}

impl Article {
    pub(crate) fn new(listing: ArticleRecord, analyzer: Weak<AnalyzerInner>) -> Self {
        Self {
            inner: Arc::new(ArticleInner {
                listing,
                analyzer,
                details: Memo::new(),
                hostnames: Memo::new(),
                ips: Memo::new(),
            }),
        }
    }

    pub(crate) async fn seed(&self, details: ArticleRecord) {
        self.inner.details.set_if_empty(Arc::new(details)).await;
    }

    fn analyzer(&self) -> Result<Analyzer> {
        Analyzer::upgrade(&self.inner.analyzer)
    }

    /// Returns true if both handles refer to the same object
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Article id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.listing.guid
    }

    /// Article title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.inner.listing.title
    }

    /// The listing record the article was first seen in
    #[must_use]
    pub fn listing(&self) -> &ArticleRecord {
        &self.inner.listing
    }

    /// Full article with every indicator, fetched on first use
    pub async fn details(&self) -> Result<Arc<ArticleRecord>> {
        self.inner
            .details
            .get_or_try_init(|| async {
                let analyzer = self.analyzer()?;
                debug!(article = %self.id(), "fetching article details");
                Ok(Arc::new(analyzer.client().articles().get(self.id()).await?))
            })
            .await
    }

    /// Hostnames listed as indicators
    pub async fn indicator_hostnames(&self) -> Result<RecordList<Hostname>> {
        let analyzer = self.analyzer()?;
        self.inner
            .hostnames
            .get_or_try_init(|| async {
                let details = self.details().await?;
                Ok(details
                    .indicator_values("domain")
                    .into_iter()
                    .filter_map(|value| analyzer.hostname(value).ok())
                    .collect())
            })
            .await
    }

    /// IP addresses listed as indicators
    pub async fn indicator_ips(&self) -> Result<RecordList<IpAddress>> {
        let analyzer = self.analyzer()?;
        self.inner
            .ips
            .get_or_try_init(|| async {
                let details = self.details().await?;
                Ok(details
                    .indicator_values("ip")
                    .into_iter()
                    .filter_map(|value| analyzer.ip(value).ok())
                    .collect())
            })
            .await
    }

    /// Forget fetched details and indicator objects
    pub async fn reset(&self) {
        self.inner.details.reset().await;
        self.inner.hostnames.reset().await;
        self.inner.ips.reset().await;
    }

    pub(crate) fn release(&self) {
        self.inner.hostnames.try_reset();
        self.inner.ips.try_reset();
    }
}
