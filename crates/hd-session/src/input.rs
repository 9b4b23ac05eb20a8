//! Atomic keyboard inputs recorded for undo.

use chrono::{DateTime, Utc};

use hd_dice::Die;

/// One atomic contribution to the pending roll.
///
/// Undo pops exactly one of these, whichever kind came last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// A single die was added to the pool.
    Die {
        /// The die that was added.
        die: Die,
        /// When it was added.
        timestamp: DateTime<Utc>,
    },
    /// One character was appended to the pending modifier text.
    ModifierDigit {
        /// A digit `0-9` or a leading `-`.
        ch: char,
        /// When it was typed.
        timestamp: DateTime<Utc>,
    },
}

impl InputAction {
    /// Record one added die.
    pub fn die(die: Die) -> Self {
        Self::Die {
            die,
            timestamp: Utc::now(),
        }
    }

    /// Record one modifier character, rejecting anything but `0-9` and `-`.
    pub fn modifier_digit(ch: char) -> Option<Self> {
        (ch.is_ascii_digit() || ch == '-').then(|| Self::ModifierDigit {
            ch,
            timestamp: Utc::now(),
        })
    }

    /// Whether this entry is a modifier character.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::ModifierDigit { .. })
    }
}
