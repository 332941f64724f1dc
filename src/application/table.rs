use crate::domain::audit::AuditEntry;
use crate::domain::bet::BetKind;
use crate::domain::dice::DiceSum;
use crate::domain::outcome::Outcome;
use crate::domain::ports::{AuditLogBox, DiceSourceBox, SessionStoreBox};
use crate::domain::session::{Balance, STARTING_BALANCE, SessionId, SessionState};
use crate::domain::settlement::settle_slip;
use crate::domain::wager::{RawWagers, WagerSlip};
use crate::error::{DicepayError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Table-wide settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Balance a session gets before its first round.
    pub starting_balance: Balance,
}

impl TableConfig {
    pub fn new(starting_balance: Decimal) -> Result<Self> {
        if starting_balance < Decimal::ZERO {
            return Err(DicepayError::InvalidConfig(format!(
                "starting balance must not be negative, got {starting_balance}"
            )));
        }
        Ok(Self {
            starting_balance: Balance::new(starting_balance),
        })
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_balance: Balance::new(STARTING_BALANCE),
        }
    }
}

/// What a client gets back after a roll.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub session: SessionId,
    pub dice: [u8; 2],
    pub sum: DiceSum,
    pub results: BTreeMap<BetKind, Outcome>,
    pub new_balance: Balance,
    pub total_stakes_this_round: Decimal,
    pub net_change_this_round: Decimal,
}

/// Runs rounds for any number of sessions against one dice source.
///
/// `CrapsTable` owns the session store, the dice, and the optional audit log.
/// A round on a session holds that session's lock from the roll until its new
/// state is stored, so concurrent rounds on one session never interleave while
/// different sessions proceed independently.
pub struct CrapsTable {
    store: SessionStoreBox,
    dice: DiceSourceBox,
    audit_log: Option<AuditLogBox>,
    config: TableConfig,
    session_locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl CrapsTable {
    /// Creates a table with the default configuration and no audit log.
    ///
    /// # Arguments
    ///
    /// * `store` - Where session balances and stats live.
    /// * `dice` - The source of every roll.
    pub fn new(store: SessionStoreBox, dice: DiceSourceBox) -> Self {
        Self {
            store,
            dice,
            audit_log: None,
            config: TableConfig::default(),
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_audit_log(mut self, audit_log: AuditLogBox) -> Self {
        self.audit_log = Some(audit_log);
        self
    }

    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Plays one round for `session`.
    ///
    /// Wagers are validated before the dice are thrown. A rejected round
    /// rolls nothing, logs nothing, and leaves the stored session untouched.
    pub async fn play_round(
        &self,
        session: &SessionId,
        wagers: &RawWagers,
    ) -> Result<RoundReport> {
        let slip = WagerSlip::parse(wagers)?;

        let lock = self.session_lock(session).await;
        let guard = lock.lock().await;
        let report = self.roll_and_settle(session, &slip).await;
        drop(guard);
        self.release_session_lock(session, lock).await;

        report
    }

    async fn roll_and_settle(&self, session: &SessionId, slip: &WagerSlip) -> Result<RoundReport> {
        let roll = self.dice.roll();
        if let Some(audit_log) = &self.audit_log {
            audit_log.record(&AuditEntry::now(roll)).await?;
        }

        let mut state = self.load(session).await?;
        let result = settle_slip(roll.sum(), slip);
        state.record_round(&result)?;
        self.store.put(state.clone()).await?;

        debug!(
            session = %session,
            roll = %roll,
            sum = %roll.sum(),
            bets = slip.len(),
            net_change = %result.net_change,
            balance = %state.balance,
            "round settled"
        );

        Ok(RoundReport {
            session: session.clone(),
            dice: roll.dice(),
            sum: roll.sum(),
            results: result.outcomes,
            new_balance: state.balance,
            total_stakes_this_round: result.total_stakes,
            net_change_this_round: result.net_change,
        })
    }

    /// Current balance, or the starting balance for a session that has not played.
    pub async fn balance(&self, session: &SessionId) -> Result<Balance> {
        Ok(self.load(session).await?.balance)
    }

    /// Balance plus the previous round's totals. Reading does not create the session.
    pub async fn stats(&self, session: &SessionId) -> Result<SessionState> {
        self.load(session).await
    }

    /// Consumes the table and returns every stored session.
    pub async fn into_sessions(self) -> Result<Vec<SessionState>> {
        self.store.all_sessions().await
    }

    async fn load(&self, session: &SessionId) -> Result<SessionState> {
        Ok(self
            .store
            .get(session)
            .await?
            .unwrap_or_else(|| SessionState::new(session.clone(), self.config.starting_balance)))
    }

    async fn session_lock(&self, session: &SessionId) -> Arc<Mutex<()>> {
        let mut locks = self.session_locks.lock().await;
        locks.entry(session.clone()).or_default().clone()
    }

    /// Drops the registry entry once no other round holds or awaits it.
    async fn release_session_lock(&self, session: &SessionId, lock: Arc<Mutex<()>>) {
        let mut locks = self.session_locks.lock().await;
        // One reference in the registry, one held here.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bet::PointNumber;
    use crate::domain::dice::DiceRoll;
    use crate::domain::ports::{AuditLog, DiceSource};
    use crate::infrastructure::dice::ScriptedDice;
    use crate::infrastructure::in_memory::InMemorySessionStore;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn wagers(value: serde_json::Value) -> RawWagers {
        serde_json::from_value(value).unwrap()
    }

    fn table(rolls: &[(u8, u8)]) -> CrapsTable {
        let rolls = rolls
            .iter()
            .map(|&(d1, d2)| DiceRoll::new(d1, d2).unwrap())
            .collect();
        CrapsTable::new(
            Box::new(InMemorySessionStore::new()),
            Box::new(ScriptedDice::new(rolls).unwrap()),
        )
    }

    #[derive(Default, Clone)]
    struct RecordingLog {
        entries: Arc<std::sync::Mutex<Vec<AuditEntry>>>,
    }

    #[async_trait]
    impl AuditLog for RecordingLog {
        async fn record(&self, entry: &AuditEntry) -> Result<()> {
            self.entries.lock().unwrap().push(*entry);
            Ok(())
        }
    }

    struct CountingDice {
        rolls: std::sync::atomic::AtomicUsize,
    }

    impl DiceSource for CountingDice {
        fn roll(&self) -> DiceRoll {
            self.rolls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            DiceRoll::new(3, 4).unwrap()
        }
    }

    #[tokio::test]
    async fn test_new_session_starts_at_default_balance() {
        let table = table(&[(1, 1)]);
        let session = SessionId::from("fresh");

        assert_eq!(table.balance(&session).await.unwrap(), Balance::new(dec!(500)));
        let stats = table.stats(&session).await.unwrap();
        assert_eq!(stats.last_bet_total, Decimal::ZERO);
        assert!(table.into_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_play_round_updates_balance_and_stats() {
        let table = table(&[(3, 4)]);
        let session = SessionId::from("alice");

        let report = table
            .play_round(&session, &wagers(json!({ "seven": 10, "6": 10 })))
            .await
            .unwrap();

        assert_eq!(report.dice, [3, 4]);
        assert_eq!(report.sum, DiceSum::SEVEN);
        assert_eq!(report.total_stakes_this_round, dec!(20));
        assert_eq!(report.net_change_this_round, dec!(32));
        assert_eq!(report.new_balance, Balance::new(dec!(532)));
        assert!(report.results[&BetKind::Seven].won);
        assert!(!report.results[&BetKind::Point(PointNumber::new(6).unwrap())].won);

        let stats = table.stats(&session).await.unwrap();
        assert_eq!(stats.balance, Balance::new(dec!(532)));
        assert_eq!(stats.last_bet_total, dec!(20));
        assert_eq!(stats.last_win_amount, dec!(32));
    }

    #[tokio::test]
    async fn test_balance_carries_across_rounds() {
        let table = table(&[(1, 1), (2, 3)]);
        let session = SessionId::from("bob");

        table
            .play_round(&session, &wagers(json!({ "field": 10 })))
            .await
            .unwrap();
        let second = table
            .play_round(&session, &wagers(json!({ "field": 10, "6": 25 })))
            .await
            .unwrap();

        // +20 on the first roll, then -10 on the field with the 6 pushing.
        assert_eq!(second.new_balance, Balance::new(dec!(510)));
        assert_eq!(second.total_stakes_this_round, dec!(10));
        assert!(second.results[&BetKind::Point(PointNumber::new(6).unwrap())].pushed);
    }

    #[tokio::test]
    async fn test_rejected_round_changes_nothing() {
        let dice = CountingDice {
            rolls: Default::default(),
        };
        let log = RecordingLog::default();
        let table = CrapsTable::new(Box::new(InMemorySessionStore::new()), Box::new(dice))
            .with_audit_log(Box::new(log.clone()));
        let session = SessionId::from("carol");

        table
            .play_round(&session, &wagers(json!({ "seven": 10 })))
            .await
            .unwrap();
        let err = table
            .play_round(&session, &wagers(json!({ "seven": 10, "field": "lots" })))
            .await
            .unwrap_err();

        assert!(matches!(err, DicepayError::InvalidWager { .. }));
        let stats = table.stats(&session).await.unwrap();
        assert_eq!(stats.balance, Balance::new(dec!(542)));
        assert_eq!(stats.last_win_amount, dec!(42));
        assert_eq!(log.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_audit_log_records_each_roll() {
        let log = RecordingLog::default();
        let table = table(&[(6, 6), (2, 1)]).with_audit_log(Box::new(log.clone()));
        let session = SessionId::default();

        for _ in 0..2 {
            table.play_round(&session, &RawWagers::new()).await.unwrap();
        }

        let entries = log.entries.lock().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].die1, entries[0].die2), (6, 6));
        assert_eq!((entries[1].die1, entries[1].die2), (2, 1));
    }

    #[tokio::test]
    async fn test_custom_starting_balance() {
        let table = table(&[(5, 5)]).with_config(TableConfig::new(dec!(100)).unwrap());
        let report = table
            .play_round(&"dave".into(), &wagers(json!({ "highField": 2 })))
            .await
            .unwrap();
        assert_eq!(report.new_balance, Balance::new(dec!(109)));
    }

    #[test]
    fn test_negative_starting_balance_rejected() {
        assert!(matches!(
            TableConfig::new(dec!(-1)),
            Err(DicepayError::InvalidConfig(_))
        ));
        assert_eq!(
            TableConfig::default().starting_balance,
            Balance::new(dec!(500))
        );
    }

    #[tokio::test]
    async fn test_concurrent_rounds_on_one_session_serialize() {
        let table = Arc::new(table(&[(1, 2)]));
        let session = SessionId::from("busy");

        let mut handles = Vec::new();
        for _ in 0..20 {
            let table = Arc::clone(&table);
            let session = session.clone();
            handles.push(tokio::spawn(async move {
                table
                    .play_round(&session, &wagers(json!({ "field": 1 })))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Every roll is a 3, so each round wins 1; no update may be lost.
        let balance = table.balance(&session).await.unwrap();
        assert_eq!(balance, Balance::new(dec!(520)));
        assert!(table.session_locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_session_locks_released_after_rounds() {
        let table = table(&[(2, 2)]);

        for name in ["a", "b", "c"] {
            table
                .play_round(&name.into(), &wagers(json!({ "field": 1 })))
                .await
                .unwrap();
        }
        table
            .play_round(&"d".into(), &wagers(json!({ "field": "x" })))
            .await
            .unwrap_err();

        assert!(table.session_locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_balance_overflow_fails_round_without_saving() {
        let table = table(&[(3, 4)]).with_config(TableConfig::new(Decimal::MAX).unwrap());
        let session = SessionId::from("whale");

        let err = table
            .play_round(&session, &wagers(json!({ "seven": 10 })))
            .await
            .unwrap_err();

        assert!(matches!(err, DicepayError::BalanceOverflow { .. }));
        assert!(table.into_sessions().await.unwrap().is_empty());
    }
}
