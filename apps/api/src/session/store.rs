use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::session::Session;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    NotFound(Uuid),

    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed session store: `<dir>/<id>.json`, fronted by an in-memory
/// cache of at most `capacity` sessions. The least recently used entry is
/// dropped when the cache is full; it reloads from disk on next access.
///
/// Writes go through a single lock so a read-modify-write on one session can
/// never interleave with another.
pub struct SessionStore {
    dir: PathBuf,
    capacity: usize,
    clock: AtomicU64,
    cache: RwLock<HashMap<Uuid, Cached>>,
}

struct Cached {
    session: Session,
    last_used: AtomicU64,
}

impl SessionStore {
    pub async fn open(dir: impl Into<PathBuf>, capacity: usize) -> Result<Self, SessionError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        info!("Session store at {} (cache capacity {capacity})", dir.display());
        Ok(Self {
            dir,
            capacity: capacity.max(1),
            clock: AtomicU64::new(0),
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub async fn create(&self) -> Result<Session, SessionError> {
        let session = Session::new();
        let mut cache = self.cache.write().await;
        write_session(&self.path_for(session.id), &session).await?;
        self.remember(&mut cache, session.clone());
        debug!(session_id = %session.id, "Created session");
        Ok(session)
    }

    /// Returns a snapshot of the session.
    pub async fn load(&self, id: Uuid) -> Result<Session, SessionError> {
        if let Some(session) = self.cached(&*self.cache.read().await, id) {
            return Ok(session);
        }
        let mut cache = self.cache.write().await;
        if let Some(session) = self.cached(&cache, id) {
            return Ok(session);
        }
        let session = read_session(&self.path_for(id), id).await?;
        self.remember(&mut cache, session.clone());
        Ok(session)
    }

    /// Applies `mutate` to a copy of the session and persists the result.
    /// If `mutate` fails nothing is written.
    pub async fn update<F, E>(&self, id: Uuid, mutate: F) -> Result<Session, E>
    where
        F: FnOnce(&mut Session) -> Result<(), E>,
        E: From<SessionError>,
    {
        let mut cache = self.cache.write().await;
        let mut session = match self.cached(&cache, id) {
            Some(session) => session,
            None => read_session(&self.path_for(id), id).await?,
        };

        mutate(&mut session)?;
        session.updated_at = Utc::now();

        write_session(&self.path_for(id), &session).await?;
        self.remember(&mut cache, session.clone());
        Ok(session)
    }

    fn cached(&self, cache: &HashMap<Uuid, Cached>, id: Uuid) -> Option<Session> {
        let entry = cache.get(&id)?;
        entry.last_used.store(self.tick(), Ordering::Relaxed);
        Some(entry.session.clone())
    }

    fn remember(&self, cache: &mut HashMap<Uuid, Cached>, session: Session) {
        let id = session.id;
        let entry = Cached {
            session,
            last_used: AtomicU64::new(self.tick()),
        };
        cache.insert(id, entry);

        while cache.len() > self.capacity {
            let oldest = cache
                .iter()
                .min_by_key(|(_, entry)| entry.last_used.load(Ordering::Relaxed))
                .map(|(id, _)| *id);
            let Some(oldest) = oldest else { break };
            cache.remove(&oldest);
            debug!(session_id = %oldest, "Evicted session from cache");
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

async fn read_session(path: &Path, id: Uuid) -> Result<Session, SessionError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SessionError::NotFound(id))
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Writes to a sibling temp file and renames it into place.
async fn write_session(path: &Path, session: &Session) -> Result<(), SessionError> {
    let json = serde_json::to_vec_pretty(session)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path(), 16).await.unwrap();
        let created = store.create().await.unwrap();

        let reopened = SessionStore::open(dir.path(), 16).await.unwrap();
        let loaded = reopened.load(created.id).await.unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path(), 16).await.unwrap();
        let err = store.load(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, SessionError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_failed_update_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path(), 16).await.unwrap();
        let created = store.create().await.unwrap();

        let result: Result<Session, SessionError> = store
            .update(created.id, |s| {
                s.document.contact.name = "Discarded".into();
                Err(SessionError::NotFound(s.id))
            })
            .await;
        assert!(result.is_err());
        let loaded = store.load(created.id).await.unwrap();
        assert!(loaded.document.contact.name.is_empty());
    }

    #[tokio::test]
    async fn test_update_persists_and_bumps_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path(), 16).await.unwrap();
        let created = store.create().await.unwrap();

        let updated: Session = store
            .update(created.id, |s| {
                s.entitlements.unlock("tech-paid");
                Ok::<_, SessionError>(())
            })
            .await
            .unwrap();
        assert!(updated.updated_at >= created.updated_at);

        let reopened = SessionStore::open(dir.path(), 16).await.unwrap();
        let loaded = reopened.load(created.id).await.unwrap();
        assert!(loaded.entitlements.is_unlocked("tech-paid"));
    }

    #[tokio::test]
    async fn test_cache_evicts_least_recently_used() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path(), 2).await.unwrap();
        let first = store.create().await.unwrap();
        let second = store.create().await.unwrap();

        // Touching `first` makes `second` the eviction candidate.
        store.load(first.id).await.unwrap();
        let third = store.create().await.unwrap();
        {
            let cache = store.cache.read().await;
            assert_eq!(cache.len(), 2);
            assert!(cache.contains_key(&first.id));
            assert!(!cache.contains_key(&second.id));
            assert!(cache.contains_key(&third.id));
        }

        let reloaded = store.load(second.id).await.unwrap();
        assert_eq!(reloaded, second);
        assert_eq!(store.cache.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_cache_stays_bounded_under_many_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path(), 8).await.unwrap();
        let mut ids = Vec::new();
        for _ in 0..50 {
            ids.push(store.create().await.unwrap().id);
        }
        assert_eq!(store.cache.read().await.len(), 8);

        let updated: Session = store
            .update(ids[0], |s| {
                s.document.contact.name = "Jane Doe".into();
                Ok::<_, SessionError>(())
            })
            .await
            .unwrap();
        assert_eq!(updated.document.contact.name, "Jane Doe");
        assert_eq!(store.cache.read().await.len(), 8);
    }
}
