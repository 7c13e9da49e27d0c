use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Wire format used by the API for dates in query parameters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format used by the API for most timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp as returned by the API.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, RFC 3339 and bare `YYYY-MM-DD` values.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        return Some(ts);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.naive_utc());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse an optional API timestamp field
#[must_use]
pub fn parse_optional_timestamp(value: Option<&str>) -> Option<NaiveDateTime> {
    value.and_then(parse_timestamp)
}

/// Kind of value submitted as a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    /// Domain or hostname
    Domain,
    /// IPv4 or IPv6 address
    Ip,
    /// Email address
    Email,
    /// MD5, SHA-1 or SHA-256 hash
    Hash,
    /// Anything else
    Unknown,
}

impl QueryKind {
    /// Guess the kind of a query value
    #[must_use]
    pub fn detect(query: &str) -> Self {
        let query = query.trim();
        if query.parse::<IpAddr>().is_ok() {
            return Self::Ip;
        }
        if query.contains('@') {
            return Self::Email;
        }
        if matches!(query.len(), 32 | 40 | 64) && query.chars().all(|c| c.is_ascii_hexdigit()) {
            return Self::Hash;
        }
        if is_hostname(query) {
            return Self::Domain;
        }
        Self::Unknown
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain => write!(f, "domain"),
            Self::Ip => write!(f, "ip"),
            Self::Email => write!(f, "email"),
            Self::Hash => write!(f, "hash"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Returns true if `value` looks like a DNS hostname with at least two labels
#[must_use]
pub fn is_hostname(value: &str) -> bool {
    let value = value.strip_suffix('.').unwrap_or(value);
    if value.is_empty() || value.len() > 253 || !value.contains('.') {
        return false;
    }
    value.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*')
    })
}

/// Inclusive date window applied to date-bounded queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included, or unbounded
    #[serde(default)]
    pub start: Option<NaiveDate>,

    /// Last day included, or unbounded
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// No bounds on either side
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Explicit start and end dates
    #[must_use]
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Everything since a given date
    #[must_use]
    pub const fn since(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// The last `days` days up to today (UTC)
    #[must_use]
    pub fn days_back(days: u64) -> Self {
        Self::days_back_from(days, Utc::now().date_naive())
    }

    /// The last `days` days up to `today`
    #[must_use]
    pub fn days_back_from(days: u64, today: NaiveDate) -> Self {
        Self {
            start: today.checked_sub_days(Days::new(days)),
            end: Some(today),
        }
    }

    /// Returns true if neither bound is set
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns true if `date` falls inside the window
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    /// Query parameters (`start`, `end`) for the set bounds
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(start) = self.start {
            params.push(("start", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            params.push(("end", end.format(DATE_FORMAT).to_string()));
        }
        params
    }
}

/// A response that is one page of a larger result set
pub trait Paginated {
    /// Record type carried by each page
    type Item;

    /// Total number of records across all pages, when the API reports it
    fn total(&self) -> Option<usize>;

    /// Consume the page and return its records
    fn into_items(self) -> Vec<Self::Item>;
}

/// Records that carry an observation window
pub trait FirstLastSeen {
    /// When the record was first observed
    fn first_seen(&self) -> Option<NaiveDateTime>;

    /// When the record was last observed
    fn last_seen(&self) -> Option<NaiveDateTime>;

    /// Returns true if the observation window intersects `range`.
    ///
    /// Records without dates are treated as overlapping.
    fn overlaps(&self, range: &DateRange) -> bool {
        if let (Some(start), Some(last)) = (range.start, self.last_seen()) {
            if last.date() < start {
                return false;
            }
        }
        if let (Some(end), Some(first)) = (range.end, self.first_seen()) {
            if first.date() > end {
                return false;
            }
        }
        true
    }
}

/// Implements [`FirstLastSeen`] for records with `first_seen`/`last_seen` string fields
macro_rules! impl_first_last_seen {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::types::FirstLastSeen for $ty {
                fn first_seen(&self) -> Option<chrono::NaiveDateTime> {
                    $crate::types::parse_optional_timestamp(self.first_seen.as_deref())
                }

                fn last_seen(&self) -> Option<chrono::NaiveDateTime> {
                    $crate::types::parse_optional_timestamp(self.last_seen.as_deref())
                }
            }
        )+
    };
}

pub(crate) use impl_first_last_seen;

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = date(2021, 3, 4).and_hms_opt(5, 6, 7).unwrap();
        assert_eq!(parse_timestamp("2021-03-04 05:06:07"), Some(expected));
        assert_eq!(parse_timestamp("2021-03-04T05:06:07+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2021-03-04T05:06:07.000"), Some(expected));
        assert_eq!(
            parse_timestamp("2021-03-04"),
            Some(date(2021, 3, 4).and_time(NaiveTime::MIN))
        );
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_query_kind_detection() {
        assert_eq!(QueryKind::detect("8.8.8.8"), QueryKind::Ip);
        assert_eq!(QueryKind::detect("2001:db8::1"), QueryKind::Ip);
        assert_eq!(QueryKind::detect("www.riskiq.net"), QueryKind::Domain);
        assert_eq!(QueryKind::detect("admin@riskiq.net"), QueryKind::Email);
        assert_eq!(
            QueryKind::detect("e9a6cf9b5d1d1e0f3f6b3c0f1d7a2b4c5d6e7f80"),
            QueryKind::Hash
        );
        assert_eq!(QueryKind::detect("not a query"), QueryKind::Unknown);
        assert_eq!(QueryKind::detect("localhost"), QueryKind::Unknown);
    }

    #[test]
    fn test_hostname_validation() {
        assert!(is_hostname("example.com"));
        assert!(is_hostname("example.com."));
        assert!(is_hostname("_dmarc.example.com"));
        assert!(!is_hostname("-bad.example.com"));
        assert!(!is_hostname("a..b"));
        assert!(!is_hostname("com"));
    }

    #[test]
    fn test_date_range_days_back() {
        let range = DateRange::days_back_from(30, date(2024, 3, 31));
        assert_eq!(range.start, Some(date(2024, 3, 1)));
        assert_eq!(range.end, Some(date(2024, 3, 31)));
        assert!(range.contains(date(2024, 3, 15)));
        assert!(!range.contains(date(2024, 2, 29)));
        assert_eq!(
            range.query_params(),
            vec![
                ("start", "2024-03-01".to_string()),
                ("end", "2024-03-31".to_string())
            ]
        );
    }

    #[test]
    fn test_unbounded_range_has_no_params() {
        let range = DateRange::unbounded();
        assert!(range.is_unbounded());
        assert!(range.query_params().is_empty());
        assert!(range.contains(date(1999, 1, 1)));
    }

    struct Seen(Option<&'static str>, Option<&'static str>);

    impl FirstLastSeen for Seen {
        fn first_seen(&self) -> Option<NaiveDateTime> {
            parse_optional_timestamp(self.0)
        }

        fn last_seen(&self) -> Option<NaiveDateTime> {
            parse_optional_timestamp(self.1)
        }
    }

    #[test]
    fn test_overlaps() {
        let range = DateRange::between(date(2020, 1, 1), date(2020, 12, 31));
        assert!(Seen(Some("2019-06-01 00:00:00"), Some("2020-02-01 00:00:00")).overlaps(&range));
        assert!(!Seen(Some("2018-01-01 00:00:00"), Some("2019-12-31 23:59:59")).overlaps(&range));
        assert!(!Seen(Some("2021-01-01 00:00:00"), Some("2021-06-01 00:00:00")).overlaps(&range));
        assert!(Seen(None, None).overlaps(&range));
    }
}
