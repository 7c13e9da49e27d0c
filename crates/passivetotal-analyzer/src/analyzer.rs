//! The analyzer context: shared client, active date range and object caches.

use crate::article::Article;
use crate::certificate::Certificate;
use crate::hostname::Hostname;
use crate::illuminate::{AttackSurface, IntelProfile};
use crate::ip::IpAddress;
use crate::memo::Memo;
use crate::object::AnalyzerObject;
use crate::records::RecordList;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::join_all;
use passivetotal_client::{Credentials, PassiveTotalClient};
use passivetotal_core::{
    is_hostname, Article as ArticleRecord, AttackSurface as AttackSurfaceRecord, DateRange,
    IntelProfile as IntelProfileRecord, PassiveTotalError, Reputation, Result, SslCertificate,
    SslField, WhoisField, WhoisRecord,
};
use std::hash::Hash;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};
use tracing::debug;

/// Entry point for memoized, pivotable threat-intelligence objects.
///
/// Every object handed out is cached by its natural key (hostname, IP
/// address, certificate SHA-1, profile id, ...), so asking for the same
/// key twice, directly or through a pivot, returns the same underlying
/// object along with everything it has already fetched.
///
/// Cloning an `Analyzer` is cheap and shares the caches. Dropping the
/// last handle releases every memoized relationship; objects still held by
/// the caller then return `AnalyzerDropped` on their next fetch.
#[derive(Clone)]
pub struct Analyzer {
    inner: Arc<AnalyzerInner>,
}

pub(crate) struct AnalyzerInner {
    client: PassiveTotalClient,
    date_range: RwLock<DateRange>,
    hostnames: DashMap<String, Hostname>,
    ips: DashMap<IpAddr, IpAddress>,
    certificates: DashMap<String, Certificate>,
    attack_surfaces: DashMap<u64, AttackSurface>,
    intel_profiles: DashMap<String, IntelProfile>,
    articles: DashMap<String, Article>,
    own_attack_surface: Memo<AttackSurface>,
    third_party: Memo<RecordList<AttackSurface>>,
    profile_list: Memo<RecordList<IntelProfile>>,
    article_list: Memo<RecordList<Article>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Object cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a cache
    pub hits: u64,
    /// Lookups that created a new object
    pub misses: u64,
    /// Cached hostnames
    pub hostnames: usize,
    /// Cached IP addresses
    pub ips: usize,
    /// Cached certificates
    pub certificates: usize,
    /// Cached attack surfaces
    pub attack_surfaces: usize,
    /// Cached intel profiles
    pub intel_profiles: usize,
    /// Cached articles
    pub articles: usize,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("client", &self.inner.client)
            .field("date_range", &self.date_range())
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Create an analyzer around an existing client
    #[must_use]
    pub fn new(client: PassiveTotalClient) -> Self {
        Self {
            inner: Arc::new(AnalyzerInner {
                client,
                date_range: RwLock::new(DateRange::unbounded()),
                hostnames: DashMap::new(),
                ips: DashMap::new(),
                certificates: DashMap::new(),
                attack_surfaces: DashMap::new(),
                intel_profiles: DashMap::new(),
                articles: DashMap::new(),
                own_attack_surface: Memo::new(),
                third_party: Memo::new(),
                profile_list: Memo::new(),
                article_list: Memo::new(),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// Create an analyzer with credentials from the environment or config file
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::load()?;
        Ok(Self::new(PassiveTotalClient::builder(credentials).build()))
    }

    pub(crate) fn upgrade(weak: &Weak<AnalyzerInner>) -> Result<Self> {
        weak.upgrade()
            .map(|inner| Self { inner })
            .ok_or(PassiveTotalError::AnalyzerDropped)
    }

    pub(crate) fn downgrade(&self) -> Weak<AnalyzerInner> {
        Arc::downgrade(&self.inner)
    }

    /// The underlying API client
    #[must_use]
    pub fn client(&self) -> &PassiveTotalClient {
        &self.inner.client
    }

    /// Date range applied to relationships fetched from now on.
    ///
    /// Relationships that were already fetched keep their data; call
    /// `reset` on an object to refetch under the new range.
    pub fn set_date_range(&self, range: DateRange) {
        *self
            .inner
            .date_range
            .write()
            .unwrap_or_else(PoisonError::into_inner) = range;
        debug!(?range, "date range changed");
    }

    /// Active date range
    #[must_use]
    pub fn date_range(&self) -> DateRange {
        *self
            .inner
            .date_range
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn cached<K, V>(&self, map: &DashMap<K, V>, key: K, create: impl FnOnce() -> V) -> V
    where
        K: Eq + Hash,
        V: Clone,
    {
        match map.entry(key) {
            Entry::Occupied(entry) => {
                self.inner.hits.fetch_add(1, Ordering::Relaxed);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                self.inner.misses.fetch_add(1, Ordering::Relaxed);
                entry.insert(create()).clone()
            }
        }
    }

    /// Memoized hostname object.
    ///
    /// The name is trimmed, lowercased and stripped of a trailing dot.
    pub fn hostname(&self, name: &str) -> Result<Hostname> {
        let name = normalize_hostname(name);
        if !is_hostname(&name) {
            return Err(PassiveTotalError::InvalidHostname(name));
        }

        Ok(self.cached(&self.inner.hostnames, name.clone(), || {
            debug!(hostname = %name, "new hostname object");
            Hostname::new(name, self.downgrade())
        }))
    }

    /// Memoized IP address object from its textual form
    pub fn ip(&self, addr: &str) -> Result<IpAddress> {
        let addr: IpAddr = addr
            .trim()
            .parse()
            .map_err(|_| PassiveTotalError::InvalidIp(addr.to_string()))?;
        Ok(self.ip_addr(addr))
    }

    /// Memoized IP address object
    #[must_use]
    pub fn ip_addr(&self, addr: IpAddr) -> IpAddress {
        self.cached(&self.inner.ips, addr, || {
            debug!(ip = %addr, "new ip object");
            IpAddress::new(addr, self.downgrade())
        })
    }

    /// Memoized certificate object by SHA-1; details are fetched on first use
    pub fn certificate(&self, sha1: &str) -> Result<Certificate> {
        let sha1 = normalize_sha1(sha1)?;
        Ok(self.cached(&self.inner.certificates, sha1.clone(), || {
            Certificate::new(sha1, self.downgrade())
        }))
    }

    /// Certificate object for a record already in hand, marking it fetched
    pub(crate) async fn certificate_from_record(&self, record: SslCertificate) -> Result<Certificate> {
        let sha1 = normalize_sha1(&record.sha1)?;
        let record = Arc::new(record);

        let mut seeded = false;
        let cert = self.cached(&self.inner.certificates, sha1.clone(), || {
            seeded = true;
            Certificate::with_details(sha1, Arc::clone(&record), self.downgrade())
        });
        if !seeded {
            cert.seed(record).await;
        }
        Ok(cert)
    }

    /// Hostname or IP object depending on what `query` looks like
    pub fn object(&self, query: &str) -> Result<AnalyzerObject> {
        match query.trim().parse::<IpAddr>() {
            Ok(addr) => Ok(AnalyzerObject::Ip(self.ip_addr(addr))),
            Err(_) => self.hostname(query).map(AnalyzerObject::Hostname),
        }
    }

    pub(crate) fn attack_surface_from(&self, record: AttackSurfaceRecord) -> AttackSurface {
        self.cached(&self.inner.attack_surfaces, record.id, || {
            AttackSurface::new(record, self.downgrade())
        })
    }

    pub(crate) fn intel_profile_from(&self, record: IntelProfileRecord) -> IntelProfile {
        self.cached(&self.inner.intel_profiles, record.id.clone(), || {
            IntelProfile::new(record, self.downgrade())
        })
    }

    pub(crate) fn article_from(&self, record: ArticleRecord) -> Article {
        self.cached(&self.inner.articles, record.guid.clone(), || {
            Article::new(record, self.downgrade())
        })
    }

    /// The account's own attack surface
    pub async fn attack_surface(&self) -> Result<AttackSurface> {
        self.inner
            .own_attack_surface
            .get_or_try_init(|| async {
                let record = self.client().attack_surface().own().await?;
                Ok(self.attack_surface_from(record))
            })
            .await
    }

    /// Every third-party (vendor) attack surface
    pub async fn third_party_attack_surfaces(&self) -> Result<RecordList<AttackSurface>> {
        self.inner
            .third_party
            .get_or_try_init(|| async {
                let records = self.client().attack_surface().third_party().await?;
                Ok(records
                    .into_iter()
                    .map(|r| self.attack_surface_from(r))
                    .collect())
            })
            .await
    }

    /// A third-party attack surface by id
    pub async fn attack_surface_by_id(&self, id: u64) -> Result<AttackSurface> {
        if let Some(surface) = self.inner.attack_surfaces.get(&id) {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(surface.clone());
        }
        let record = self.client().attack_surface().get(id).await?;
        Ok(self.attack_surface_from(record))
    }

    /// Every intel profile available to the account
    pub async fn intel_profiles(&self) -> Result<RecordList<IntelProfile>> {
        self.inner
            .profile_list
            .get_or_try_init(|| async {
                let profiles = self.client().intel().profiles().await?;
                Ok(profiles
                    .results
                    .into_iter()
                    .map(|r| self.intel_profile_from(r))
                    .collect())
            })
            .await
    }

    /// An intel profile by id
    pub async fn intel_profile(&self, id: &str) -> Result<IntelProfile> {
        if let Some(profile) = self.inner.intel_profiles.get(id) {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(profile.clone());
        }
        let record = self.client().intel().profile(id).await?;
        Ok(self.intel_profile_from(record))
    }

    /// Published articles
    pub async fn articles(&self) -> Result<RecordList<Article>> {
        self.inner
            .article_list
            .get_or_try_init(|| async {
                let results = self.client().articles().list().await?;
                Ok(results
                    .articles
                    .into_iter()
                    .map(|r| self.article_from(r))
                    .collect())
            })
            .await
    }

    /// An article by id; the returned object already holds its details
    pub async fn article(&self, id: &str) -> Result<Article> {
        if let Some(article) = self.inner.articles.get(id) {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(article.clone());
        }
        let record = self.client().articles().get(id).await?;
        let article = self.article_from(record.clone());
        article.seed(record).await;
        Ok(article)
    }

    /// Reputation of many objects, fetched concurrently.
    ///
    /// Results are in input order; one failure does not affect the others.
    pub async fn reputations(&self, objects: &[AnalyzerObject]) -> Vec<Result<Arc<Reputation>>> {
        let futures: Vec<_> = objects.iter().map(|obj| obj.reputation()).collect();
        join_all(futures).await
    }

    /// WHOIS records matching a field value
    pub async fn search_whois(
        &self,
        field: WhoisField,
        value: &str,
    ) -> Result<RecordList<WhoisRecord>> {
        let results = self.client().whois().search(field, value).await?;
        Ok(results.results.into())
    }

    /// Certificates matching a field value.
    ///
    /// The returned certificates are cached with their details, so no
    /// second lookup happens when `details` is called on them.
    pub async fn search_certificates(
        &self,
        field: SslField,
        value: &str,
    ) -> Result<RecordList<Certificate>> {
        let results = self.client().ssl().search(field, value).await?;
        let mut certs = Vec::with_capacity(results.results.len());
        for record in results.results {
            match self.certificate_from_record(record).await {
                Ok(cert) => certs.push(cert),
                Err(err) => debug!(error = %err, "skipping certificate without usable sha1"),
            }
        }
        Ok(certs.into())
    }

    /// Drop every cached object and list.
    ///
    /// Objects still held by callers keep working but are reset, and new
    /// lookups create fresh objects.
    pub async fn clear_caches(&self) {
        // Pivots link objects to each other; reset them so the links are dropped.
        for host in snapshot(&self.inner.hostnames) {
            host.reset().await;
        }
        for ip in snapshot(&self.inner.ips) {
            ip.reset().await;
        }
        for cert in snapshot(&self.inner.certificates) {
            cert.reset().await;
        }
        for article in snapshot(&self.inner.articles) {
            article.reset().await;
        }

        self.inner.hostnames.clear();
        self.inner.ips.clear();
        self.inner.certificates.clear();
        self.inner.attack_surfaces.clear();
        self.inner.intel_profiles.clear();
        self.inner.articles.clear();
        self.inner.own_attack_surface.reset().await;
        self.inner.third_party.reset().await;
        self.inner.profile_list.reset().await;
        self.inner.article_list.reset().await;
        debug!("analyzer caches cleared");
    }

    /// Cache counters and sizes
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            hostnames: self.inner.hostnames.len(),
            ips: self.inner.ips.len(),
            certificates: self.inner.certificates.len(),
            attack_surfaces: self.inner.attack_surfaces.len(),
            intel_profiles: self.inner.intel_profiles.len(),
            articles: self.inner.articles.len(),
        }
    }
}

impl Drop for AnalyzerInner {
    // Pivot memos hold strong handles to other cached objects.
    fn drop(&mut self) {
        for host in self.hostnames.iter() {
            host.release();
        }
        for ip in self.ips.iter() {
            ip.release();
        }
        for cert in self.certificates.iter() {
            cert.release();
        }
        for article in self.articles.iter() {
            article.release();
        }
    }
}

fn snapshot<K: Eq + Hash, V: Clone>(map: &DashMap<K, V>) -> Vec<V> {
    map.iter().map(|entry| entry.value().clone()).collect()
}

fn normalize_hostname(name: &str) -> String {
    let name = name.trim().to_ascii_lowercase();
    match name.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

fn normalize_sha1(sha1: &str) -> Result<String> {
    let sha1 = sha1.trim().to_ascii_lowercase();
    if sha1.len() == 40 && sha1.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(sha1)
    } else {
        Err(PassiveTotalError::InvalidQuery(format!(
            "not a SHA-1 fingerprint: {sha1}"
        )))
    }
}
