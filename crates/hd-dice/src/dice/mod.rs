//! Die types, groups, pools, and rolls.
//!
//! Only the seven standard polyhedral sizes exist. Anything else is rejected
//! when a tag is parsed, so the rest of the engine never sees an invalid die.

pub mod group;
pub mod pool;
pub mod roll;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DiceError;

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    #[serde(rename = "d4")]
    D4,
    /// Six-sided die.
    #[serde(rename = "d6")]
    D6,
    /// Eight-sided die.
    #[serde(rename = "d8")]
    D8,
    /// Ten-sided die.
    #[serde(rename = "d10")]
    D10,
    /// Twelve-sided die.
    #[serde(rename = "d12")]
    D12,
    /// Twenty-sided die.
    #[serde(rename = "d20")]
    D20,
    /// Percentile die (1-100).
    #[serde(rename = "d100")]
    D100,
}

/// Face count for every die, in ascending order.
pub const DIE_FACES: [(Die, u32); 7] = [
    (Die::D4, 4),
    (Die::D6, 6),
    (Die::D8, 8),
    (Die::D10, 10),
    (Die::D12, 12),
    (Die::D20, 20),
    (Die::D100, 100),
];

impl Die {
    /// All die types in ascending face order.
    pub const ALL: [Die; 7] = [
        Die::D4,
        Die::D6,
        Die::D8,
        Die::D10,
        Die::D12,
        Die::D20,
        Die::D100,
    ];

    /// Returns the number of faces on this die.
    pub fn faces(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
        }
    }

    /// Expected value of a single roll of this die.
    pub fn average(self) -> f64 {
        f64::from(1 + self.faces()) / 2.0
    }

    /// Look up a die by its face count.
    pub fn from_faces(faces: u32) -> Option<Self> {
        DIE_FACES
            .iter()
            .find(|(_, f)| *f == faces)
            .map(|(die, _)| *die)
    }
}

impl FromStr for Die {
    type Err = DiceError;

    /// Parse a die from a tag like "d20", "D6", or "d100".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        tag.strip_prefix('d')
            .and_then(|n| n.parse::<u32>().ok())
            .and_then(Self::from_faces)
            .ok_or_else(|| DiceError::UnknownDie(s.trim().to_string()))
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.faces())
    }
}
