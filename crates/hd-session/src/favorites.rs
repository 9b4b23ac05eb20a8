//! Saved favorite rolls.

use serde::{Deserialize, Serialize};

use hd_dice::{DiceGroup, DicePool, MAX_POOL_DICE, calculate_average_total, format_formula};

use crate::error::FavoriteError;
use crate::state::MAX_MODIFIER;

/// Identifier of a saved favorite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteId(String);

impl FavoriteId {
    /// A fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FavoriteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for FavoriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, saved dice composition plus modifier.
///
/// Stored favorites are range-checked on load: the modifier must be within
/// [`MAX_MODIFIER`] and the groups may hold at most [`MAX_POOL_DICE`] dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFavorite")]
pub struct FavoriteRoll {
    /// Unique id.
    pub id: FavoriteId,
    /// Display name chosen by the user.
    pub name: String,
    /// Dice grouped by type.
    pub dice_pool: Vec<DiceGroup>,
    /// Modifier added to the dice.
    pub modifier: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFavorite {
    id: FavoriteId,
    name: String,
    dice_pool: Vec<DiceGroup>,
    modifier: i64,
}

impl TryFrom<RawFavorite> for FavoriteRoll {
    type Error = FavoriteError;

    fn try_from(raw: RawFavorite) -> Result<Self, Self::Error> {
        if raw.modifier.saturating_abs() > MAX_MODIFIER {
            return Err(FavoriteError::ModifierOutOfRange(raw.modifier));
        }
        let dice: u64 = raw.dice_pool.iter().map(|g| u64::from(g.quantity())).sum();
        if dice > u64::from(MAX_POOL_DICE) {
            return Err(FavoriteError::TooManyDice(dice));
        }
        Ok(Self {
            id: raw.id,
            name: raw.name,
            dice_pool: raw.dice_pool,
            modifier: raw.modifier,
        })
    }
}

impl FavoriteRoll {
    /// Snapshot a working pool and modifier under a name.
    pub fn new(name: &str, pool: &DicePool, modifier: i64) -> Self {
        Self {
            id: FavoriteId::generate(),
            name: name.to_string(),
            dice_pool: pool.groups(),
            modifier,
        }
    }

    /// The composition rendered as `2d20 + d8 -2`.
    pub fn formula(&self) -> String {
        format_formula(&self.dice_pool, self.modifier)
    }

    /// Expected total when rolled.
    pub fn average_total(&self) -> f64 {
        calculate_average_total(&self.dice_pool, self.modifier)
    }
}
