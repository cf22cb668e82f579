//! services/api/src/adapters/memory_sessions.rs
//!
//! An in-process implementation of the `SessionStore` port. Sessions live in a
//! map owned by the process, so they vanish on restart and are not shared
//! between instances.

use async_trait::async_trait;
use food_api_core::domain::SessionData;
use food_api_core::ports::{PortResult, SessionStore};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

struct StoredSession {
    data: SessionData,
    expires_at: Option<Instant>,
}

impl StoredSession {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// A session store backed by a `HashMap` behind an async `RwLock`.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, StoredSession>>,
    ttl: Option<Duration>,
}

impl MemorySessionStore {
    /// Creates an empty store. With a `ttl`, each session expires that long
    /// after it was last written.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of sessions currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes every expired session and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| !stored.is_expired(now));
        before - sessions.len()
    }

    /// Spawns a task that purges expired sessions every `period`, so sessions
    /// nobody reads again do not accumulate.
    pub fn spawn_expiry_sweep(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            loop {
                ticks.tick().await;
                let purged = self.purge_expired().await;
                if purged > 0 {
                    debug!(purged, "Expired sessions purged");
                }
            }
        })
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str) -> PortResult<Option<SessionData>> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                None => return Ok(None),
                Some(stored) if !stored.is_expired(now) => return Ok(Some(stored.data.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it unless a concurrent write refreshed it meanwhile.
        let mut sessions = self.sessions.write().await;
        if sessions
            .get(session_id)
            .is_some_and(|stored| stored.is_expired(now))
        {
            sessions.remove(session_id);
            debug!(session_id, "Expired session dropped");
        }
        Ok(None)
    }

    async fn set(&self, session_id: &str, data: SessionData) -> PortResult<()> {
        let expires_at = self.ttl.map(|ttl| Instant::now() + ttl);
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), StoredSession { data, expires_at });
        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> PortResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_and_destroy() {
        let store = MemorySessionStore::new(None);
        assert_eq!(store.get("abc").await.unwrap(), None);

        store
            .set("abc", SessionData { user_id: Some(3) })
            .await
            .unwrap();
        assert_eq!(
            store.get("abc").await.unwrap(),
            Some(SessionData { user_id: Some(3) })
        );

        store.destroy("abc").await.unwrap();
        assert_eq!(store.get("abc").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn destroying_an_unknown_session_is_not_an_error() {
        let store = MemorySessionStore::new(None);
        assert!(store.destroy("missing").await.is_ok());
    }

    #[tokio::test]
    async fn expired_sessions_are_dropped_on_read() {
        let store = MemorySessionStore::new(Some(Duration::ZERO));
        store.set("abc", SessionData::default()).await.unwrap();
        assert_eq!(store.len().await, 1);

        assert_eq!(store.get("abc").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn purge_drops_only_expired_sessions() {
        let expiring = MemorySessionStore::new(Some(Duration::ZERO));
        expiring.set("a", SessionData::default()).await.unwrap();
        expiring.set("b", SessionData::default()).await.unwrap();
        assert_eq!(expiring.purge_expired().await, 2);
        assert!(expiring.is_empty().await);

        let lasting = MemorySessionStore::new(Some(Duration::from_secs(3600)));
        lasting.set("a", SessionData::default()).await.unwrap();
        assert_eq!(lasting.purge_expired().await, 0);
        assert_eq!(lasting.len().await, 1);
    }

    #[tokio::test]
    async fn sweep_removes_sessions_that_are_never_read_again() {
        let store = Arc::new(MemorySessionStore::new(Some(Duration::ZERO)));
        for id in ["a", "b", "c"] {
            store.set(id, SessionData::default()).await.unwrap();
        }

        let sweep = store.clone().spawn_expiry_sweep(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        sweep.abort();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn sessions_without_ttl_do_not_expire() {
        let store = MemorySessionStore::new(None);
        store.set("abc", SessionData::default()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(store.get("abc").await.unwrap(), Some(SessionData::default()));
    }
}
