//! Dice engine for Hotdice.
//!
//! Provides the closed set of polyhedral dice (d4 through d100), dice groups,
//! the flat working pool with its grouping and formatting algebra, a uniform
//! randomizer, and the roll engine that turns a pool plus modifier into an
//! immutable [`RollResult`].

pub mod dice;
pub mod error;
pub mod random;

pub use dice::group::DiceGroup;
pub use dice::pool::{
    DicePool, MAX_POOL_DICE, add_dice_to_pool, calculate_average_total, format_dice_pool,
    group_dice_by_type, remove_last_die_from_pool,
};
pub use dice::roll::{
    DieRoll, RollResult, format_formula, format_roll_result, roll_dice_pool, roll_groups,
};
pub use dice::{DIE_FACES, Die};
pub use error::{DiceError, DiceResult};
pub use random::{roll_dice, roll_single_die};
