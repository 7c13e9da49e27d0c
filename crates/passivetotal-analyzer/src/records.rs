//! Shared, immutable record lists returned by analyzer relationships.

use chrono::NaiveDateTime;
use passivetotal_core::{DateRange, FirstLastSeen, Resolution};
use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Cheaply cloned, read-only list of API records.
///
/// Clones share the same allocation, so memoized relationships can hand
/// out copies without duplicating data. Filtering and sorting return new
/// lists and leave the original untouched.
#[derive(Debug)]
pub struct RecordList<T> {
    records: Arc<[T]>,
}

impl<T> Clone for RecordList<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }
}

impl<T> From<Vec<T>> for RecordList<T> {
    fn from(records: Vec<T>) -> Self {
        Self {
            records: Arc::from(records),
        }
    }
}

impl<T> FromIterator<T> for RecordList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<'a, T> IntoIterator for &'a RecordList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<T> RecordList<T> {
    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// First record, if any
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.records.first()
    }

    /// Records as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    /// Returns true if both lists share one allocation
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl<T: Clone> RecordList<T> {
    /// Records matching `predicate`
    #[must_use]
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Self {
        self.iter().filter(|r| predicate(r)).cloned().collect()
    }

    /// Records sorted by a key, stable for equal keys
    #[must_use]
    pub fn sorted_by_key<K: Ord>(&self, key: impl FnMut(&T) -> K) -> Self {
        let mut records = self.to_vec();
        records.sort_by_key(key);
        records.into()
    }

    /// Owned copy of the records
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.records.to_vec()
    }
}

impl<T: Clone + FirstLastSeen> RecordList<T> {
    /// Records whose observation window overlaps `range`
    #[must_use]
    pub fn within(&self, range: &DateRange) -> Self {
        self.filter(|r| r.overlaps(range))
    }

    /// Earliest first-seen timestamp across the records
    #[must_use]
    pub fn earliest_seen(&self) -> Option<NaiveDateTime> {
        self.iter().filter_map(FirstLastSeen::first_seen).min()
    }

    /// Latest last-seen timestamp across the records
    #[must_use]
    pub fn latest_seen(&self) -> Option<NaiveDateTime> {
        self.iter().filter_map(FirstLastSeen::last_seen).max()
    }

    /// Records ordered most recently seen first; undated records go last
    #[must_use]
    pub fn sorted_by_last_seen(&self) -> Self {
        self.sorted_by_key(|r| Reverse(r.last_seen()))
    }
}

impl RecordList<Resolution> {
    /// Resolutions of one DNS record type (case-insensitive)
    #[must_use]
    pub fn only_type(&self, record_type: &str) -> Self {
        self.filter(|r| r.has_type(record_type))
    }

    /// Distinct resolved values in the order they first appear
    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.iter()
            .map(|r| r.resolve.as_str())
            .filter(|v| seen.insert(*v))
            .collect()
    }

    /// Distinct DNS record types present, sorted
    #[must_use]
    pub fn record_types(&self) -> Vec<&str> {
        self.iter()
            .filter_map(|r| r.record_type.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
