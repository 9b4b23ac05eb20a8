//! Roll results and the roll engine.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Die;
use super::group::DiceGroup;
use super::pool::{DicePool, format_dice_pool};
use crate::random::roll_single_die;

/// The realized roll of one die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DieRoll {
    /// The type of die that was rolled.
    #[serde(rename = "type")]
    pub die: Die,
    /// The value rolled (1 to die.faces()).
    pub value: u32,
    /// The die showed its highest face.
    pub is_crit: bool,
    /// The die showed a 1.
    pub is_fail: bool,
}

impl DieRoll {
    /// Annotate a rolled value with its crit and fail flags.
    pub fn new(die: Die, value: u32) -> Self {
        Self {
            die,
            value,
            is_crit: value == die.faces(),
            is_fail: value == 1,
        }
    }
}

/// An immutable record of one committed roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResult {
    /// Individual die results, in roll order.
    pub dice: Vec<DieRoll>,
    /// Sum of all die values.
    pub subtotal: i64,
    /// Modifier applied on top of the dice.
    pub modifier: i64,
    /// `subtotal + modifier`.
    pub total: i64,
    /// When the roll was made.
    pub timestamp: DateTime<Utc>,
    /// The grouped composition that produced this roll.
    pub dice_pool: Vec<DiceGroup>,
}

impl RollResult {
    /// The roll's composition as a working pool, for replaying it.
    pub fn to_pool(&self) -> DicePool {
        DicePool::from_groups(&self.dice_pool)
    }

    /// Whether any die came up on its highest face.
    pub fn has_crit(&self) -> bool {
        self.dice.iter().any(|d| d.is_crit)
    }

    /// Whether any die came up a 1.
    pub fn has_fail(&self) -> bool {
        self.dice.iter().any(|d| d.is_fail)
    }

    /// Die results grouped by type, in order of first appearance.
    pub fn rolls_by_type(&self) -> Vec<(Die, Vec<DieRoll>)> {
        let mut grouped: Vec<(Die, Vec<DieRoll>)> = Vec::new();
        for roll in &self.dice {
            match grouped.iter_mut().find(|(die, _)| *die == roll.die) {
                Some((_, rolls)) => rolls.push(*roll),
                None => grouped.push((roll.die, vec![*roll])),
            }
        }
        grouped
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_roll_result(self))
    }
}

/// Roll every die in the pool once and add the modifier.
///
/// Each die is drawn on its own, so crit and fail flags are independent.
/// An empty pool is legal and yields `total == modifier`.
pub fn roll_dice_pool<R: Rng + ?Sized>(
    pool: &DicePool,
    modifier: i64,
    rng: &mut R,
) -> RollResult {
    let dice: Vec<DieRoll> = pool
        .dice()
        .iter()
        .map(|&die| DieRoll::new(die, roll_single_die(die, rng)))
        .collect();
    let subtotal = dice.iter().map(|d| i64::from(d.value)).sum::<i64>();

    RollResult {
        dice,
        subtotal,
        modifier,
        total: subtotal.saturating_add(modifier),
        timestamp: Utc::now(),
        dice_pool: pool.groups(),
    }
}

/// Roll a grouped composition, e.g. a favorite or a history entry.
pub fn roll_groups<R: Rng + ?Sized>(
    groups: &[DiceGroup],
    modifier: i64,
    rng: &mut R,
) -> RollResult {
    roll_dice_pool(&DicePool::from_groups(groups), modifier, rng)
}

/// Render a composition as `2d20 + d8 -2`; a zero modifier is omitted.
pub fn format_formula(groups: &[DiceGroup], modifier: i64) -> String {
    let pool = format_dice_pool(groups);
    match modifier {
        0 => pool,
        m if m > 0 => format!("{pool} +{m}"),
        m => format!("{pool} {m}"),
    }
}

/// Render a result as `2d20 + d8 -2 = 17`.
pub fn format_roll_result(result: &RollResult) -> String {
    format!(
        "{} = {}",
        format_formula(&result.dice_pool, result.modifier),
        result.total
    )
}
