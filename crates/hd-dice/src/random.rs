//! Uniform die rolls.

use rand::Rng;

use crate::dice::Die;
use crate::dice::roll::DieRoll;

/// Roll one die, uniformly over `1..=faces`.
pub fn roll_single_die<R: Rng + ?Sized>(die: Die, rng: &mut R) -> u32 {
    rng.random_range(1..=die.faces())
}

/// Roll `quantity` dice of one type, each drawn independently.
pub fn roll_dice<R: Rng + ?Sized>(die: Die, quantity: u32, rng: &mut R) -> Vec<DieRoll> {
    (0..quantity)
        .map(|_| DieRoll::new(die, roll_single_die(die, rng)))
        .collect()
}
