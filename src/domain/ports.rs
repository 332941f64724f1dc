use super::audit::AuditEntry;
use super::dice::DiceRoll;
use super::session::{SessionId, SessionState};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session: &SessionId) -> Result<Option<SessionState>>;
    async fn put(&self, state: SessionState) -> Result<()>;
    async fn all_sessions(&self) -> Result<Vec<SessionState>>;
}

pub type SessionStoreBox = Box<dyn SessionStore>;

pub trait DiceSource: Send + Sync {
    fn roll(&self) -> DiceRoll;
}

pub type DiceSourceBox = Box<dyn DiceSource>;

/// Append-only record of every roll. Never read back by the table.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(&self, entry: &AuditEntry) -> Result<()>;
}

pub type AuditLogBox = Box<dyn AuditLog>;
