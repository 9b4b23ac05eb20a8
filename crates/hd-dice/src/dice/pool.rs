//! Working dice pool and its pure algebra.
//!
//! The pool stores one token per die in insertion order so the most recent
//! die can be taken back exactly. Grouping by type is a read-time projection.

use serde::{Deserialize, Serialize};

use super::Die;
use super::group::DiceGroup;

/// Most dice a single pool or group may hold.
pub const MAX_POOL_DICE: u32 = 1000;

/// An insertion-ordered multiset of dice staged for the next roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DicePool {
    dice: Vec<Die>,
}

impl DicePool {
    /// Create an empty dice pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` dice of the given type, returning the extended pool.
    pub fn add(mut self, die: Die, count: u32) -> Self {
        self.push(die, count);
        self
    }

    /// Append `count` dice of the given type to the end of the pool.
    pub fn push(&mut self, die: Die, count: u32) {
        self.dice.extend(std::iter::repeat_n(die, count as usize));
    }

    /// Remove and return the most recently appended die.
    pub fn remove_last(&mut self) -> Option<Die> {
        self.dice.pop()
    }

    /// Expand a grouped composition back into individual dice.
    pub fn from_groups(groups: &[DiceGroup]) -> Self {
        let mut pool = Self::new();
        for group in groups {
            pool.push(group.die(), group.quantity());
        }
        pool
    }

    /// The individual dice, oldest first.
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Returns how many dice are in the pool.
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Returns true if the pool has no dice.
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Remove every die.
    pub fn clear(&mut self) {
        self.dice.clear();
    }

    /// Dice grouped by type, in order of first appearance.
    pub fn groups(&self) -> Vec<DiceGroup> {
        group_dice_by_type(self.dice.iter().copied().map(DiceGroup::single))
    }

    /// Expected total of rolling this pool with the given modifier.
    pub fn average_total(&self, modifier: i64) -> f64 {
        calculate_average_total(&self.groups(), modifier)
    }
}

impl FromIterator<Die> for DicePool {
    fn from_iter<I: IntoIterator<Item = Die>>(iter: I) -> Self {
        Self {
            dice: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for DicePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_dice_pool(&self.groups()))
    }
}

/// Return a new pool with `quantity` dice of `die` appended.
pub fn add_dice_to_pool(pool: &DicePool, die: Die, quantity: u32) -> DicePool {
    pool.clone().add(die, quantity)
}

/// Return a new pool without its most recently appended die.
pub fn remove_last_die_from_pool(pool: &DicePool) -> DicePool {
    let mut next = pool.clone();
    next.remove_last();
    next
}

/// Merge groups by die type, summing quantities.
///
/// Output order is the order in which each type first appears in the input,
/// so the same input always yields the same output.
pub fn group_dice_by_type<I>(groups: I) -> Vec<DiceGroup>
where
    I: IntoIterator<Item = DiceGroup>,
{
    let mut merged: Vec<DiceGroup> = Vec::new();
    for group in groups {
        match merged.iter_mut().find(|g| g.die() == group.die()) {
            Some(existing) => existing.grow(group.quantity()),
            None => merged.push(group),
        }
    }
    merged
}

/// Render groups as `2d20 + d8`, or `Empty` when there are none.
pub fn format_dice_pool(groups: &[DiceGroup]) -> String {
    if groups.is_empty() {
        return "Empty".to_string();
    }
    groups
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Expected total of a composition plus modifier, rounded to one decimal.
pub fn calculate_average_total(groups: &[DiceGroup], modifier: i64) -> f64 {
    let dice: f64 = groups
        .iter()
        .map(|g| g.die().average() * f64::from(g.quantity()))
        .sum();
    ((dice + modifier as f64) * 10.0).round() / 10.0
}
