use super::bet::BetKind;
use super::session::Balance;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// How a single bet settled.
///
/// `payout` is the total credited back to the player, stake included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outcome {
    #[serde(rename = "bet")]
    pub stake: Decimal,
    pub payout: Decimal,
    #[serde(rename = "win")]
    pub won: bool,
    #[serde(rename = "push")]
    pub pushed: bool,
}

impl Outcome {
    pub fn win(stake: Decimal, payout: Decimal) -> Self {
        Self {
            stake,
            payout,
            won: true,
            pushed: false,
        }
    }

    pub fn push(stake: Decimal) -> Self {
        Self {
            stake,
            payout: stake,
            won: false,
            pushed: true,
        }
    }

    pub fn loss(stake: Decimal) -> Self {
        Self {
            stake,
            payout: Decimal::ZERO,
            won: false,
            pushed: false,
        }
    }
}

/// The settled state of one round.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub outcomes: BTreeMap<BetKind, Outcome>,
    /// Stakes at risk this round. Pushed point bets are not counted.
    pub total_stakes: Decimal,
    pub total_payouts: Decimal,
    pub net_change: Decimal,
}

impl RoundResult {
    /// Records a bet whose stake was at risk.
    pub(crate) fn post(&mut self, kind: BetKind, outcome: Outcome) {
        self.total_stakes += outcome.stake;
        self.total_payouts += outcome.payout;
        self.net_change = self.total_payouts - self.total_stakes;
        self.outcomes.insert(kind, outcome);
    }

    /// Records a pushed bet. It stays out of the round totals.
    pub(crate) fn post_push(&mut self, kind: BetKind, outcome: Outcome) {
        self.outcomes.insert(kind, outcome);
    }

    pub fn outcome(&self, kind: BetKind) -> Option<&Outcome> {
        self.outcomes.get(&kind)
    }

    /// The balance after crediting this round's net change, or `None` if it
    /// would leave the `Decimal` range.
    pub fn apply_to(&self, balance: Balance) -> Option<Balance> {
        balance.checked_add(self.net_change)
    }
}
