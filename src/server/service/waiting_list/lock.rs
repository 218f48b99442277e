use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-session async mutexes.
///
/// Every operation that reads a session, changes its enrolled set or waiting list and
/// writes it back holds the session's guard for the whole cycle. Entries are dropped once
/// nobody holds or waits for them.
#[derive(Clone, Default)]
pub struct SessionLocks {
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until the session is free and returns its guard.
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(session_id.to_string()).or_default().clone()
        };

        lock.lock_owned().await
    }

    /// Number of sessions currently tracked.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Expected: a second acquire on the same session waits for the first guard
    #[tokio::test]
    async fn serializes_same_session() {
        let locks = SessionLocks::new();
        let guard = locks.acquire("s1").await;

        let contender = locks.clone();
        let handle = tokio::spawn(async move {
            let _guard = contender.acquire("s1").await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished());

        drop(guard);
        handle.await.unwrap();
    }

    /// Expected: different sessions do not block each other
    #[tokio::test]
    async fn independent_sessions_do_not_block() {
        let locks = SessionLocks::new();
        let _first = locks.acquire("s1").await;

        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire("s2")).await;

        assert!(second.is_ok());
    }

    /// Expected: released entries are pruned on the next acquire
    #[tokio::test]
    async fn prunes_released_sessions() {
        let locks = SessionLocks::new();
        drop(locks.acquire("s1").await);
        drop(locks.acquire("s2").await);

        assert_eq!(locks.len().await, 1);
    }
}
