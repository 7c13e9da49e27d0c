//! Relationships shared by hostnames and IP addresses.

use crate::analyzer::Analyzer;
use crate::article::Article;
use crate::illuminate::IntelProfile;
use crate::memo::Memo;
use crate::records::RecordList;
use passivetotal_core::{
    Component, Cookie, Enrichment, HostPair, HostPairDirection, MalwareRecord, OsintRecord,
    Reputation, Resolution, Result, Summary, Tracker, WhoisRecord,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Memoized data every queryable object carries
#[derive(Debug, Default)]
pub(crate) struct Relations {
    resolutions: Memo<RecordList<Resolution>>,
    whois: Memo<Arc<WhoisRecord>>,
    summary: Memo<Arc<Summary>>,
    reputation: Memo<Arc<Reputation>>,
    enrichment: Memo<Arc<Enrichment>>,
    osint: Memo<RecordList<OsintRecord>>,
    malware: Memo<RecordList<MalwareRecord>>,
    trackers: Memo<RecordList<Tracker>>,
    components: Memo<RecordList<Component>>,
    cookies: Memo<RecordList<Cookie>>,
    hostpair_children: Memo<RecordList<HostPair>>,
    hostpair_parents: Memo<RecordList<HostPair>>,
    articles: Memo<RecordList<Article>>,
    intel_profiles: Memo<RecordList<IntelProfile>>,
}

impl Relations {
    pub(crate) async fn resolutions(
        &self,
        analyzer: &Analyzer,
        query: &str,
    ) -> Result<RecordList<Resolution>> {
        self.resolutions
            .get_or_try_init(|| async {
                debug!(query, relation = "resolutions", "fetching");
                let results = analyzer
                    .client()
                    .dns()
                    .passive(query)
                    .date_range(analyzer.date_range())
                    .send()
                    .await?;
                Ok(results.results.into())
            })
            .await
    }

    pub(crate) async fn whois(&self, analyzer: &Analyzer, query: &str) -> Result<Arc<WhoisRecord>> {
        self.whois
            .get_or_try_init(|| async {
                debug!(query, relation = "whois", "fetching");
                let record = analyzer.client().whois().details(query).send().await?;
                Ok(Arc::new(record))
            })
            .await
    }

    pub(crate) async fn summary(&self, analyzer: &Analyzer, query: &str) -> Result<Arc<Summary>> {
        self.summary
            .get_or_try_init(|| async {
                debug!(query, relation = "summary", "fetching");
                Ok(Arc::new(analyzer.client().cards().summary(query).await?))
            })
            .await
    }

    pub(crate) async fn reputation(
        &self,
        analyzer: &Analyzer,
        query: &str,
    ) -> Result<Arc<Reputation>> {
        self.reputation
            .get_or_try_init(|| async {
                debug!(query, relation = "reputation", "fetching");
                Ok(Arc::new(analyzer.client().reputation().get(query).await?))
            })
            .await
    }

    pub(crate) async fn enrichment(
        &self,
        analyzer: &Analyzer,
        query: &str,
    ) -> Result<Arc<Enrichment>> {
        self.enrichment
            .get_or_try_init(|| async {
                debug!(query, relation = "enrichment", "fetching");
                Ok(Arc::new(analyzer.client().enrichment().data(query).await?))
            })
            .await
    }

    pub(crate) async fn osint(
        &self,
        analyzer: &Analyzer,
        query: &str,
    ) -> Result<RecordList<OsintRecord>> {
        self.osint
            .get_or_try_init(|| async {
                debug!(query, relation = "osint", "fetching");
                let results = analyzer.client().enrichment().osint(query).await?;
                Ok(results.results.into())
            })
            .await
    }

    pub(crate) async fn malware(
        &self,
        analyzer: &Analyzer,
        query: &str,
    ) -> Result<RecordList<MalwareRecord>> {
        self.malware
            .get_or_try_init(|| async {
                debug!(query, relation = "malware", "fetching");
                let results = analyzer.client().enrichment().malware(query).await?;
                Ok(results.results.into())
            })
            .await
    }

    pub(crate) async fn trackers(
        &self,
        analyzer: &Analyzer,
        query: &str,
    ) -> Result<RecordList<Tracker>> {
        self.trackers
            .get_or_try_init(|| async {
                debug!(query, relation = "trackers", "fetching");
                let records = analyzer
                    .client()
                    .attributes()
                    .trackers(query)
                    .date_range(analyzer.date_range())
                    .all()
                    .await?;
                Ok(records.into())
            })
            .await
    }

    pub(crate) async fn components(
        &self,
        analyzer: &Analyzer,
        query: &str,
    ) -> Result<RecordList<Component>> {
        self.components
            .get_or_try_init(|| async {
                debug!(query, relation = "components", "fetching");
                let records = analyzer
                    .client()
                    .attributes()
                    .components(query)
                    .date_range(analyzer.date_range())
                    .all()
                    .await?;
                Ok(records.into())
            })
            .await
    }

    pub(crate) async fn cookies(
        &self,
        analyzer: &Analyzer,
        query: &str,
    ) -> Result<RecordList<Cookie>> {
        self.cookies
            .get_or_try_init(|| async {
                debug!(query, relation = "cookies", "fetching");
                let records = analyzer
                    .client()
                    .attributes()
                    .cookies(query)
                    .date_range(analyzer.date_range())
                    .all()
                    .await?;
                Ok(records.into())
            })
            .await
    }

    pub(crate) async fn host_pairs(
        &self,
        analyzer: &Analyzer,
        query: &str,
        direction: HostPairDirection,
    ) -> Result<RecordList<HostPair>> {
        let memo = match direction {
            HostPairDirection::Children => &self.hostpair_children,
            HostPairDirection::Parents => &self.hostpair_parents,
        };
        memo.get_or_try_init(|| async {
            debug!(query, relation = direction.as_str(), "fetching host pairs");
            let records = analyzer
                .client()
                .attributes()
                .host_pairs(query, direction)
                .date_range(analyzer.date_range())
                .all()
                .await?;
            Ok(records.into())
        })
        .await
    }

    pub(crate) async fn articles(
        &self,
        analyzer: &Analyzer,
        query: &str,
    ) -> Result<RecordList<Article>> {
        self.articles
            .get_or_try_init(|| async {
                debug!(query, relation = "articles", "fetching");
                let results = analyzer.client().articles().for_indicator(query).await?;
                Ok(results
                    .articles
                    .into_iter()
                    .map(|r| analyzer.article_from(r))
                    .collect())
            })
            .await
    }

    pub(crate) async fn intel_profiles(
        &self,
        analyzer: &Analyzer,
        query: &str,
    ) -> Result<RecordList<IntelProfile>> {
        self.intel_profiles
            .get_or_try_init(|| async {
                debug!(query, relation = "intel_profiles", "fetching");
                let matches = analyzer
                    .client()
                    .intel()
                    .profiles_for_indicator(query)
                    .await?;
                let mut seen = HashSet::new();
                Ok(matches
                    .profiles()
                    .into_iter()
                    .filter(|p| seen.insert(p.id.clone()))
                    .map(|p| analyzer.intel_profile_from(p.clone()))
                    .collect())
            })
            .await
    }

    pub(crate) async fn reset(&self) {
        self.resolutions.reset().await;
        self.whois.reset().await;
        self.summary.reset().await;
        self.reputation.reset().await;
        self.enrichment.reset().await;
        self.osint.reset().await;
        self.malware.reset().await;
        self.trackers.reset().await;
        self.components.reset().await;
        self.cookies.reset().await;
        self.hostpair_children.reset().await;
        self.hostpair_parents.reset().await;
        self.articles.reset().await;
        self.intel_profiles.reset().await;
    }

    pub(crate) fn release(&self) {
        self.resolutions.try_reset();
        self.whois.try_reset();
        self.summary.try_reset();
        self.reputation.try_reset();
        self.enrichment.try_reset();
        self.osint.try_reset();
        self.malware.try_reset();
        self.trackers.try_reset();
        self.components.try_reset();
        self.cookies.try_reset();
        self.hostpair_children.try_reset();
        self.hostpair_parents.try_reset();
        self.articles.try_reset();
        self.intel_profiles.try_reset();
    }
}
