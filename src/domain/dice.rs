use crate::error::{DicepayError, Result};
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Two six-sided dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceRoll {
    die1: u8,
    die2: u8,
}

impl DiceRoll {
    pub fn new(die1: u8, die2: u8) -> Result<Self> {
        for die in [die1, die2] {
            if !(1..=6).contains(&die) {
                return Err(DicepayError::InvalidRoll(format!(
                    "die face {die} is outside 1..=6"
                )));
            }
        }
        Ok(Self { die1, die2 })
    }

    /// Throws both dice, each uniform over 1..=6.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            die1: rng.gen_range(1..=6),
            die2: rng.gen_range(1..=6),
        }
    }

    pub fn dice(&self) -> [u8; 2] {
        [self.die1, self.die2]
    }

    pub fn sum(&self) -> DiceSum {
        DiceSum(self.die1 + self.die2)
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.die1, self.die2)
    }
}

/// Parses `"d1,d2"`, e.g. `"3,4"`.
impl FromStr for DiceRoll {
    type Err = DicepayError;

    fn from_str(s: &str) -> Result<Self> {
        let (first, second) = s
            .split_once(',')
            .ok_or_else(|| DicepayError::InvalidRoll(format!("expected 'd1,d2', got '{s}'")))?;
        let parse = |face: &str| {
            face.trim()
                .parse::<u8>()
                .map_err(|_| DicepayError::InvalidRoll(format!("'{face}' is not a die face")))
        };
        Self::new(parse(first)?, parse(second)?)
    }
}

/// The total of two dice, always within 2..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DiceSum(u8);

impl DiceSum {
    pub const SEVEN: DiceSum = DiceSum(7);

    pub fn new(value: u8) -> Result<Self> {
        if (2..=12).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DicepayError::InvalidRoll(format!(
                "dice sum {value} is outside 2..=12"
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_any_of(self, sums: &[u8]) -> bool {
        sums.contains(&self.0)
    }
}

impl TryFrom<u8> for DiceSum {
    type Error = DicepayError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for DiceSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
