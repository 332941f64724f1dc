use super::bet::BetKind;
use crate::error::{DicepayError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Largest stake accepted on a single bet.
pub const MAX_STAKE: Decimal = dec!(1000000000000000000);

/// Wagers as a client submits them: bet identifier to an unvalidated stake.
pub type RawWagers = BTreeMap<String, Value>;

/// A strictly positive amount placed on a single bet.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Stake(Decimal);

impl Stake {
    /// Returns `None` for zero or negative amounts, which mean "no bet".
    pub fn new(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then_some(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl From<Stake> for Decimal {
    fn from(stake: Stake) -> Self {
        stake.0
    }
}

/// A validated set of wagers, at most one stake per recognized bet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WagerSlip {
    stakes: BTreeMap<BetKind, Stake>,
}

impl WagerSlip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a raw wager map.
    ///
    /// Unknown identifiers are ignored without looking at their values.
    /// Zero and negative stakes are dropped. A recognized bet whose stake is
    /// not a number (or a string holding one), or exceeds [`MAX_STAKE`],
    /// rejects the whole slip.
    pub fn parse(raw: &RawWagers) -> Result<Self> {
        let mut slip = Self::new();
        for (id, value) in raw {
            let Some(kind) = BetKind::from_id(id) else {
                continue;
            };
            if let Some(stake) = Stake::new(parse_stake(kind, value)?) {
                slip.place(kind, stake);
            }
        }
        Ok(slip)
    }

    /// Places a stake, replacing any previous stake on the same bet.
    pub fn place(&mut self, kind: BetKind, stake: Stake) {
        self.stakes.insert(kind, stake);
    }

    pub fn get(&self, kind: BetKind) -> Option<Stake> {
        self.stakes.get(&kind).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BetKind, Stake)> + '_ {
        self.stakes.iter().map(|(kind, stake)| (*kind, *stake))
    }

    pub fn len(&self) -> usize {
        self.stakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stakes.is_empty()
    }
}

fn parse_stake(kind: BetKind, value: &Value) -> Result<Decimal> {
    let invalid = || DicepayError::InvalidWager {
        bet: kind.id().to_string(),
        value: value.to_string(),
    };
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) if is_plain_number(text.trim()) => text.trim().to_string(),
        _ => return Err(invalid()),
    };
    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid())?;
    if amount > MAX_STAKE {
        return Err(invalid());
    }
    Ok(amount)
}

/// Accepts `[+-]digits[.digits][(e|E)[+-]digits]` with at least one mantissa
/// digit. `Decimal::from_str` alone tolerates separators such as `_`.
fn is_plain_number(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let mantissa_ok =
        digits(whole) && digits(fraction) && !(whole.is_empty() && fraction.is_empty());
    let exponent_ok = exponent.is_none_or(|exp| {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        !exp.is_empty() && digits(exp)
    });
    mantissa_ok && exponent_ok
}
