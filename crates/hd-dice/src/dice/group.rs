//! Dice groups: one or more dice of the same type.

use serde::{Deserialize, Serialize};

use super::Die;
use super::pool::MAX_POOL_DICE;
use crate::error::{DiceError, DiceResult};

/// A compact run of dice sharing one type, e.g. `3d6`.
///
/// [`DiceGroup::new`] and deserialization only accept quantities from one
/// to [`MAX_POOL_DICE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGroup")]
pub struct DiceGroup {
    #[serde(rename = "type")]
    die: Die,
    quantity: u32,
}

#[derive(Deserialize)]
struct RawGroup {
    #[serde(rename = "type")]
    die: Die,
    quantity: u32,
}

impl TryFrom<RawGroup> for DiceGroup {
    type Error = DiceError;

    fn try_from(raw: RawGroup) -> Result<Self, Self::Error> {
        Self::new(raw.die, raw.quantity)
    }
}

impl DiceGroup {
    /// Create a group of `quantity` dice of the given type.
    pub fn new(die: Die, quantity: u32) -> DiceResult<Self> {
        if quantity == 0 {
            return Err(DiceError::EmptyGroup(die.to_string()));
        }
        if quantity > MAX_POOL_DICE {
            return Err(DiceError::TooManyDice {
                die: die.to_string(),
                quantity,
                limit: MAX_POOL_DICE,
            });
        }
        Ok(Self { die, quantity })
    }

    /// A group holding exactly one die.
    pub fn single(die: Die) -> Self {
        Self { die, quantity: 1 }
    }

    /// The die type of this group.
    pub fn die(&self) -> Die {
        self.die
    }

    /// How many dice the group holds.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(crate) fn grow(&mut self, by: u32) {
        self.quantity = self.quantity.saturating_add(by);
    }
}

impl std::fmt::Display for DiceGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.quantity == 1 {
            write!(f, "{}", self.die)
        } else {
            write!(f, "{}{}", self.quantity, self.die)
        }
    }
}
