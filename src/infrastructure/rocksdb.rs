use crate::domain::ports::SessionStore;
use crate::domain::session::{SessionId, SessionState};
use crate::error::{DicepayError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing session state.
pub const CF_SESSIONS: &str = "sessions";

/// A persistent session store backed by RocksDB.
///
/// Sessions live in their own Column Family, keyed by the raw bytes of the
/// session id, with the `SessionState` JSON-encoded as the value.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "sessions" column family exists.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the database will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_sessions = ColumnFamilyDescriptor::new(CF_SESSIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_sessions])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn sessions_cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_SESSIONS)
            .ok_or_else(|| DicepayError::Storage("Sessions column family not found".to_string()))
    }
}

#[async_trait]
impl SessionStore for RocksDBStore {
    async fn get(&self, session: &SessionId) -> Result<Option<SessionState>> {
        let cf = self.sessions_cf()?;
        match self.db.get_cf(cf, session.as_str().as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, state: SessionState) -> Result<()> {
        let cf = self.sessions_cf()?;
        let value = serde_json::to_vec(&state)?;
        self.db.put_cf(cf, state.session.as_str().as_bytes(), value)?;
        Ok(())
    }

    async fn all_sessions(&self) -> Result<Vec<SessionState>> {
        let cf = self.sessions_cf()?;
        let mut sessions = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            sessions.push(serde_json::from_slice(&value)?);
        }
        Ok(sessions)
    }
}
