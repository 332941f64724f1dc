use crate::domain::dice::DiceRoll;
use crate::domain::ports::DiceSource;
use crate::error::{DicepayError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Fair dice backed by a `StdRng`.
pub struct RandomDice {
    rng: Mutex<StdRng>,
}

impl RandomDice {
    /// Seeds from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible dice: the same seed always yields the same rolls.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl DiceSource for RandomDice {
    fn roll(&self) -> DiceRoll {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        DiceRoll::random(&mut *rng)
    }
}

/// Replays a fixed sequence of rolls, starting over once it runs out.
pub struct ScriptedDice {
    rolls: Vec<DiceRoll>,
    next: AtomicUsize,
}

impl ScriptedDice {
    pub fn new(rolls: Vec<DiceRoll>) -> Result<Self> {
        if rolls.is_empty() {
            return Err(DicepayError::InvalidRoll(
                "scripted dice need at least one roll".to_string(),
            ));
        }
        Ok(Self {
            rolls,
            next: AtomicUsize::new(0),
        })
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&self) -> DiceRoll {
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        self.rolls[index % self.rolls.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_dice_stay_in_range() {
        let dice = RandomDice::from_entropy();
        for _ in 0..1_000 {
            let roll = dice.roll();
            assert!((2..=12).contains(&roll.sum().value()));
        }
    }

    #[test]
    fn test_seeded_dice_are_reproducible() {
        let a = RandomDice::seeded(7);
        let b = RandomDice::seeded(7);
        let first: Vec<_> = (0..50).map(|_| a.roll()).collect();
        let second: Vec<_> = (0..50).map(|_| b.roll()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_dice_cover_every_face() {
        let dice = RandomDice::seeded(42);
        let mut seen = [false; 6];
        for _ in 0..600 {
            for face in dice.roll().dice() {
                seen[face as usize - 1] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_scripted_dice_cycle() {
        let rolls = vec![DiceRoll::new(1, 2).unwrap(), DiceRoll::new(6, 6).unwrap()];
        let dice = ScriptedDice::new(rolls.clone()).unwrap();
        assert_eq!(dice.roll(), rolls[0]);
        assert_eq!(dice.roll(), rolls[1]);
        assert_eq!(dice.roll(), rolls[0]);
    }

    #[test]
    fn test_scripted_dice_need_rolls() {
        assert!(matches!(
            ScriptedDice::new(Vec::new()),
            Err(DicepayError::InvalidRoll(_))
        ));
    }
}
