//! The dice collaborator.
//!
//! The engine only needs a source of faces in 1..=6. [`FairDice`] draws them
//! from a seedable `fastrand` generator; [`ScriptedDice`] replays a fixed
//! sequence and is what the tests use to stage exact positions.

use crate::constants::SIX;
use crate::player::PlayerIndex;

/// A single die result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiceRoll(u8);

impl DiceRoll {
    /// # Panics
    /// Panics if `face` is not in 1..=6.
    pub fn new(face: u8) -> Self {
        assert!((1..=SIX).contains(&face), "die face {face} out of range");
        Self(face)
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_six(self) -> bool {
        self.0 == SIX
    }
}

/// Source of die rolls.
pub trait Dice {
    /// Roll for the given seat.
    fn roll_for(&mut self, player: PlayerIndex) -> DiceRoll;

    /// Number of rolls made so far.
    fn roll_count(&self) -> u64;
}

/// Uniform die backed by `fastrand`.
pub struct FairDice {
    rng: fastrand::Rng,
    rolls: u64,
}

impl Default for FairDice {
    fn default() -> Self {
        Self::new()
    }
}

impl FairDice {
    /// Die seeded from system entropy.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
            rolls: 0,
        }
    }

    /// Die with a fixed seed, for reproducible matches.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            rolls: 0,
        }
    }
}

impl Dice for FairDice {
    fn roll_for(&mut self, _player: PlayerIndex) -> DiceRoll {
        self.rolls += 1;
        DiceRoll::new(self.rng.u8(1..=SIX))
    }

    fn roll_count(&self) -> u64 {
        self.rolls
    }
}

/// Replays a fixed sequence of faces, cycling when it runs out.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    next: usize,
    rolls: u64,
}

impl ScriptedDice {
    /// # Panics
    /// Panics if `faces` is empty or holds a value outside 1..=6.
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        let faces = faces.into();
        assert!(!faces.is_empty(), "scripted dice needs at least one face");
        assert!(faces.iter().all(|f| (1..=SIX).contains(f)));
        Self {
            faces,
            next: 0,
            rolls: 0,
        }
    }
}

impl Dice for ScriptedDice {
    fn roll_for(&mut self, _player: PlayerIndex) -> DiceRoll {
        let face = self.faces[self.next];
        self.next = (self.next + 1) % self.faces.len();
        self.rolls += 1;
        DiceRoll::new(face)
    }

    fn roll_count(&self) -> u64 {
        self.rolls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fair_dice_range_and_count() {
        let mut dice = FairDice::with_seed(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let r = dice.roll_for(0);
            seen[(r.value() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every face should appear");
        assert_eq!(dice.roll_count(), 600);
    }

    #[test]
    fn test_fair_dice_seed_reproducible() {
        let mut a = FairDice::with_seed(42);
        let mut b = FairDice::with_seed(42);
        for p in 0..50 {
            assert_eq!(a.roll_for(p % 4), b.roll_for(p % 4));
        }
    }

    #[test]
    fn test_scripted_dice_cycles() {
        let mut dice = ScriptedDice::new([6, 2]);
        assert!(dice.roll_for(0).is_six());
        assert_eq!(dice.roll_for(1).value(), 2);
        assert!(dice.roll_for(2).is_six());
        assert_eq!(dice.roll_count(), 3);
    }

    #[test]
    #[should_panic]
    fn test_roll_out_of_range() {
        DiceRoll::new(7);
    }
}
