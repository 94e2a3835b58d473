//! Per-product write locks
//!
//! Matching is read-then-write with no version token, so every mutating
//! engine operation for one product runs under that product's mutex.
//! Different products never contend.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Clone, Default)]
pub struct ProductLocks {
    inner: Arc<DashMap<i64, Arc<Mutex<()>>>>,
}

impl ProductLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive write access to `product_id`
    pub async fn lock(&self, product_id: i64) -> OwnedMutexGuard<()> {
        // Clone the Arc so the map shard is not held across the await
        let mutex = self.inner.entry(product_id).or_default().clone();
        mutex.lock_owned().await
    }

    /// Drop the mutex of a deleted product
    pub fn forget(&self, product_id: i64) {
        self.inner
            .remove_if(&product_id, |_, m| Arc::strong_count(m) == 1);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_product_serializes() {
        let locks = ProductLocks::new();
        let guard = locks.lock(1).await;

        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _g = contender.lock(1).await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiting)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_products_do_not_block() {
        let locks = ProductLocks::new();
        let _a = locks.lock(1).await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.lock(2)).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn test_forget_keeps_held_locks() {
        let locks = ProductLocks::new();
        let guard = locks.lock(7).await;
        locks.forget(7);
        assert_eq!(locks.len(), 1);
        drop(guard);
        locks.forget(7);
        assert!(locks.is_empty());
    }
}
