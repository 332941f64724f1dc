use super::dice::DiceRoll;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One line of the roll audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub die1: u8,
    pub die2: u8,
}

impl AuditEntry {
    pub fn new(timestamp: u64, roll: DiceRoll) -> Self {
        let [die1, die2] = roll.dice();
        Self {
            timestamp,
            die1,
            die2,
        }
    }

    /// Stamps a roll with the current wall-clock time.
    pub fn now(roll: DiceRoll) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self::new(timestamp, roll)
    }
}
