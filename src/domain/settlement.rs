//! Single-roll settlement of every bet on the table.
//!
//! Payout ratios are profit multiples with the stake excluded, kept as exact
//! fractions so that amounts stay decimal-exact. A winning bet is credited
//! `stake + stake * numerator / denominator`.

use super::bet::BetKind;
use super::dice::DiceSum;
use super::outcome::{Outcome, RoundResult};
use super::wager::{RawWagers, WagerSlip};
use crate::error::Result;
use rust_decimal::Decimal;

/// Field on 2 or 12.
pub const FIELD_DOUBLE: (u32, u32) = (2, 1);
/// Field on 3, 4, 9, 10 or 11.
pub const FIELD_EVEN: (u32, u32) = (1, 1);
/// Low field (2, 3, 4) and high field (10, 11, 12).
pub const FIELD_LONG_SHOT: (u32, u32) = (9, 2);
pub const ANY_SEVEN: (u32, u32) = (21, 5);

/// Settles raw wagers against a dice sum.
///
/// Fails with [`crate::error::DicepayError::InvalidWager`] if any recognized
/// bet carries a malformed stake; nothing is settled in that case.
pub fn settle(dice_sum: DiceSum, wagers: &RawWagers) -> Result<RoundResult> {
    let slip = WagerSlip::parse(wagers)?;
    Ok(settle_slip(dice_sum, &slip))
}

/// Settles an already validated slip.
pub fn settle_slip(dice_sum: DiceSum, slip: &WagerSlip) -> RoundResult {
    let mut result = RoundResult::default();

    for (kind, stake) in slip.iter() {
        let stake = stake.value();
        match kind {
            BetKind::Point(point) if dice_sum.value() == point.value() => {
                result.post(kind, Outcome::win(stake, credit(stake, point.ratio())));
            }
            BetKind::Point(_) if dice_sum == DiceSum::SEVEN => {
                result.post(kind, Outcome::loss(stake));
            }
            // Any other sum is a wash for a point bet.
            BetKind::Point(_) => result.post_push(kind, Outcome::push(stake)),
            _ => {
                let outcome = match single_roll_ratio(kind, dice_sum) {
                    Some(ratio) => Outcome::win(stake, credit(stake, ratio)),
                    None => Outcome::loss(stake),
                };
                result.post(kind, outcome);
            }
        }
    }

    result
}

fn single_roll_ratio(kind: BetKind, dice_sum: DiceSum) -> Option<(u32, u32)> {
    match kind {
        BetKind::Field if dice_sum.is_any_of(&[2, 12]) => Some(FIELD_DOUBLE),
        BetKind::Field if dice_sum.is_any_of(&[3, 4, 9, 10, 11]) => Some(FIELD_EVEN),
        BetKind::LowField if dice_sum.is_any_of(&[2, 3, 4]) => Some(FIELD_LONG_SHOT),
        BetKind::HighField if dice_sum.is_any_of(&[10, 11, 12]) => Some(FIELD_LONG_SHOT),
        BetKind::Seven if dice_sum == DiceSum::SEVEN => Some(ANY_SEVEN),
        _ => None,
    }
}

/// Stake plus profit.
fn credit(stake: Decimal, (numerator, denominator): (u32, u32)) -> Decimal {
    stake + stake * Decimal::from(numerator) / Decimal::from(denominator)
}
