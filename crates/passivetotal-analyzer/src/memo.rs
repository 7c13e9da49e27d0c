//! Async memoization cells.

use passivetotal_core::Result;
use std::future::Future;
use tokio::sync::Mutex;

/// A value computed on first use and kept until [`reset`](Memo::reset).
///
/// Concurrent callers wait for the first computation instead of starting
/// their own. A failed computation leaves the cell empty.
pub(crate) struct Memo<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Memo<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.slot.try_lock() {
            Ok(slot) if slot.is_some() => "set",
            Ok(_) => "empty",
            Err(_) => "busy",
        };
        f.debug_tuple("Memo").field(&state).finish()
    }
}

impl<T> Memo<T> {
    pub(crate) fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    pub(crate) fn with_value(value: T) -> Self {
        Self {
            slot: Mutex::new(Some(value)),
        }
    }

    /// Store `value` unless a value is already present
    pub(crate) async fn set_if_empty(&self, value: T) {
        let mut slot = self.slot.lock().await;
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    pub(crate) async fn is_set(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    pub(crate) async fn reset(&self) {
        *self.slot.lock().await = None;
    }

    /// Empty the cell without waiting; a cell in use is left as is
    pub(crate) fn try_reset(&self) {
        if let Ok(mut slot) = self.slot.try_lock() {
            *slot = None;
        }
    }
}

impl<T: Clone> Memo<T> {
    pub(crate) async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(value) = slot.as_ref() {
            return Ok(value.clone());
        }

        let value = init().await?;
        *slot = Some(value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passivetotal_core::PassiveTotalError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_computes_once() {
        let memo = Memo::new();
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let value = memo
                .get_or_try_init(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                })
                .await;
            assert_eq!(value.unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_stored() {
        let memo = Memo::new();

        let first = memo
            .get_or_try_init(|| async { Err::<u8, _>(PassiveTotalError::Timeout(5)) })
            .await;
        assert!(matches!(first, Err(PassiveTotalError::Timeout(5))));
        assert!(!memo.is_set().await);

        let second = memo.get_or_try_init(|| async { Ok(7) }).await;
        assert_eq!(second.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_reset_recomputes() {
        let memo = Memo::with_value(1);
        memo.reset().await;

        let value = memo.get_or_try_init(|| async { Ok(2) }).await;
        assert_eq!(value.unwrap(), 2);

        memo.set_if_empty(3).await;
        assert_eq!(memo.get_or_try_init(|| async { Ok(4) }).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_computation() {
        let memo = Memo::new();
        let calls = AtomicU32::new(0);

        let callers = (0..8).map(|_| {
            memo.get_or_try_init(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                Ok(99u32)
            })
        });
        let results = futures_util::future::join_all(callers).await;

        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|r| matches!(r, Ok(99))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_try_reset_skips_busy_cell() {
        let memo = Memo::with_value(5u8);
        memo.try_reset();
        assert!(!memo.is_set().await);

        let busy = Memo::with_value(6u8);
        let held = busy.slot.lock().await;
        busy.try_reset();
        drop(held);
        assert!(busy.is_set().await);
    }
}
