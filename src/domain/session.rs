use super::outcome::RoundResult;
use crate::error::{DicepayError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Balance handed to a session the first time it plays.
pub const STARTING_BALANCE: Decimal = dec!(500);

/// A player's bankroll.
///
/// Unlike a stake, a balance may go negative: the table settles what was
/// wagered and leaves credit limits to the caller.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(pub Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn checked_add(self, rhs: Decimal) -> Option<Self> {
        self.0.checked_add(rhs).map(Self)
    }
}

impl Add<Decimal> for Balance {
    type Output = Self;
    fn add(self, rhs: Decimal) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub<Decimal> for Balance {
    type Output = Self;
    fn sub(self, rhs: Decimal) -> Self::Output {
        Self(self.0 - rhs)
    }
}

impl AddAssign<Decimal> for Balance {
    fn add_assign(&mut self, rhs: Decimal) {
        self.0 += rhs;
    }
}

impl SubAssign<Decimal> for Balance {
    fn sub_assign(&mut self, rhs: Decimal) {
        self.0 -= rhs;
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque key for a player's session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new("default")
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the table remembers about a session between rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session: SessionId,
    pub balance: Balance,
    /// Stake at risk in the most recent round.
    pub last_bet_total: Decimal,
    /// Net change of the most recent round.
    pub last_win_amount: Decimal,
}

impl SessionState {
    pub fn new(session: SessionId, starting_balance: Balance) -> Self {
        Self {
            session,
            balance: starting_balance,
            last_bet_total: Decimal::ZERO,
            last_win_amount: Decimal::ZERO,
        }
    }

    /// Applies a settled round to the balance and remembers its totals.
    ///
    /// Leaves the state untouched if the new balance does not fit.
    pub fn record_round(&mut self, result: &RoundResult) -> Result<()> {
        self.balance = result
            .apply_to(self.balance)
            .ok_or_else(|| DicepayError::BalanceOverflow {
                session: self.session.to_string(),
            })?;
        self.last_bet_total = result.total_stakes;
        self.last_win_amount = result.net_change;
        Ok(())
    }
}
