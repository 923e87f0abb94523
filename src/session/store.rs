//! Session storage.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::session::record::{SessionId, SessionRecord};

/// Errors from loading or persisting sessions.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session store {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("session store has no persistence path")]
    NotPersistent,
}

/// Read access to sessions established elsewhere (e.g. by a login flow).
pub trait SessionStore: Send + Sync {
    /// Fetch a session by id.
    fn load(&self, id: &SessionId) -> Option<SessionRecord>;
}

/// A thread-safe in-memory session store with optional JSON persistence.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<DashMap<SessionId, SessionRecord>>,
    persistence_path: Option<PathBuf>,
}

impl MemorySessionStore {
    /// Create a new empty store.
    pub fn new(persistence_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path,
        }
    }

    /// Load from file if it exists; a missing file yields an empty store.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let store = Self::new(Some(path.to_path_buf()));
        if path.exists() {
            let file = File::open(path).map_err(|source| SessionError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let map: BTreeMap<SessionId, SessionRecord> =
                serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                    SessionError::Json {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;

            for (k, v) in map {
                store.inner.insert(k, v);
            }
            tracing::info!(path = %path.display(), sessions = store.inner.len(), "Loaded sessions");
        }
        Ok(store)
    }

    /// Write all sessions to the persistence path.
    pub fn save(&self) -> Result<(), SessionError> {
        let path = self.persistence_path.as_ref().ok_or(SessionError::NotPersistent)?;
        let map: BTreeMap<SessionId, SessionRecord> = self
            .inner
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        let file = File::create(path).map_err(|source| SessionError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), &map).map_err(|source| {
            SessionError::Json {
                path: path.clone(),
                source,
            }
        })?;
        Ok(())
    }

    pub fn insert(&self, id: SessionId, record: SessionRecord) {
        self.inner.insert(id, record);
    }

    pub fn remove(&self, id: &SessionId) -> Option<SessionRecord> {
        self.inner.remove(id).map(|(_, record)| record)
    }

    /// All session ids, sorted.
    pub fn ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.inner.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, id: &SessionId) -> Option<SessionRecord> {
        self.inner.get(id).map(|entry| entry.value().clone())
    }
}
