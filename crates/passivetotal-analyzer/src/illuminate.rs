//! Illuminate objects: attack surfaces and intel profiles.

use crate::analyzer::{Analyzer, AnalyzerInner};
use crate::memo::Memo;
use crate::records::RecordList;
use dashmap::DashMap;
use passivetotal_core::{
    AttackSurface as AttackSurfaceRecord, AttackSurfaceCve, AttackSurfaceInsights,
    CveObservation, InsightPriority, IntelIndicator, IntelProfile as IntelProfileRecord,
    Priorities, Result,
};
use std::sync::{Arc, Weak};
use tracing::debug;

/// An organization's attack surface, either the account's own or a vendor's
#[derive(Clone)]
pub struct AttackSurface {
    inner: Arc<AttackSurfaceInner>,
}

struct AttackSurfaceInner {
    record: AttackSurfaceRecord,
    analyzer: Weak<AnalyzerInner>,
    high: Memo<Arc<AttackSurfaceInsights>>,
    medium: Memo<Arc<AttackSurfaceInsights>>,
    low: Memo<Arc<AttackSurfaceInsights>>,
    cves: Memo<RecordList<AttackSurfaceCve>>,
    observations: DashMap<String, Arc<Memo<RecordList<CveObservation>>>>,
}

impl std::fmt::Debug for AttackSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttackSurface")
            .field("id", &self.inner.record.id)
            .field("name", &self.inner.record.name)
            .finish_non_exhaustive()
    }
}

impl AttackSurface {
    pub(crate) fn new(record: AttackSurfaceRecord, analyzer: Weak<AnalyzerInner>) -> Self {
        Self {
            inner: Arc::new(AttackSurfaceInner {
                record,
                analyzer,
                high: Memo::new(),
                medium: Memo::new(),
                low: Memo::new(),
                cves: Memo::new(),
                observations: DashMap::new(),
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

    /// Attack surface id
    #[must_use]
    pub fn id(&self) -> u64 {
        self.inner.record.id
    }

    /// Organization name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.record.name
    }

    /// Insight and observation counts per priority
    #[must_use]
    pub fn priorities(&self) -> &Priorities {
        &self.inner.record.priorities
    }

    /// The record this object was built from
    #[must_use]
    pub fn record(&self) -> &AttackSurfaceRecord {
        &self.inner.record
    }

    /// Insights of one priority level
    pub async fn insights(&self, priority: InsightPriority) -> Result<Arc<AttackSurfaceInsights>> {
        let memo = match priority {
            InsightPriority::High => &self.inner.high,
            InsightPriority::Medium => &self.inner.medium,
            InsightPriority::Low => &self.inner.low,
        };
        memo.get_or_try_init(|| async {
            let analyzer = self.analyzer()?;
            debug!(id = self.id(), priority = priority.as_str(), "fetching insights");
            let insights = analyzer
                .client()
                .attack_surface()
                .insights(self.id(), priority)
                .await?;
            Ok(Arc::new(insights))
        })
        .await
    }

    /// CVEs impacting the attack surface
    pub async fn cves(&self) -> Result<RecordList<AttackSurfaceCve>> {
        self.inner
            .cves
            .get_or_try_init(|| async {
                let analyzer = self.analyzer()?;
                let cves = analyzer.client().attack_surface().all_cves(self.id()).await?;
                Ok(cves.into())
            })
            .await
    }

    /// Assets on which a CVE was observed
    pub async fn cve_observations(&self, cve: &str) -> Result<RecordList<CveObservation>> {
        let cve = cve.trim().to_ascii_uppercase();
        let memo = Arc::clone(self.inner.observations.entry(cve.clone()).or_default().value());

        memo.get_or_try_init(|| async {
            let analyzer = self.analyzer()?;
            let observations = analyzer
                .client()
                .attack_surface()
                .all_cve_observations(self.id(), &cve)
                .await?;
            Ok(observations.into())
        })
        .await
    }

    /// Forget fetched insights, CVEs and observations
    pub async fn reset(&self) {
        self.inner.high.reset().await;
        self.inner.medium.reset().await;
        self.inner.low.reset().await;
        self.inner.cves.reset().await;
        self.inner.observations.clear();
    }
}

/// A threat-actor intel profile
#[derive(Clone)]
pub struct IntelProfile {
    inner: Arc<IntelProfileInner>,
}

struct IntelProfileInner {
    record: IntelProfileRecord,
    analyzer: Weak<AnalyzerInner>,
    indicators: Memo<RecordList<IntelIndicator>>,
}

impl std::fmt::Debug for IntelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntelProfile")
            .field("id", &self.inner.record.id)
            .field("title", &self.inner.record.title)
            .finish_non_exhaustive()
    }
}

impl IntelProfile {
    pub(crate) fn new(record: IntelProfileRecord, analyzer: Weak<AnalyzerInner>) -> Self {
        Self {
            inner: Arc::new(IntelProfileInner {
                record,
                analyzer,
                indicators: Memo::new(),
            }),
        }
    }

    /// Returns true if both handles refer to the same object
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Profile id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.record.id
    }

    /// Profile title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.inner.record.title
    }

    /// Other names for the actor
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.inner.record.aliases
    }

    /// The record this object was built from
    #[must_use]
    pub fn record(&self) -> &IntelProfileRecord {
        &self.inner.record
    }

    /// Every indicator attached to the profile
    pub async fn indicators(&self) -> Result<RecordList<IntelIndicator>> {
        self.inner
            .indicators
            .get_or_try_init(|| async {
                let analyzer = Analyzer::upgrade(&self.inner.analyzer)?;
                debug!(profile = %self.id(), "fetching indicators");
                let indicators = analyzer.client().intel().all_indicators(self.id()).await?;
                Ok(indicators.into())
            })
            .await
    }

    /// Forget fetched indicators
    pub async fn reset(&self) {
        self.inner.indicators.reset().await;
    }
}
