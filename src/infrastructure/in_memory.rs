use crate::domain::ports::SessionStore;
use crate::domain::session::{SessionId, SessionState};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for session state.
///
/// Uses `Arc<RwLock<HashMap<SessionId, SessionState>>>` to allow shared concurrent access.
/// Everything is lost when the process exits.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionState>>>,
}

impl InMemorySessionStore {
    /// Creates a new, empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session: &SessionId) -> Result<Option<SessionState>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session).cloned())
    }

    async fn put(&self, state: SessionState) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(state.session.clone(), state);
        Ok(())
    }

    async fn all_sessions(&self) -> Result<Vec<SessionState>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.values().cloned().collect())
    }
}
