//! The session state record read by renderers.

use hd_dice::{DicePool, Die, RollResult, format_formula};

use crate::favorites::{FavoriteId, FavoriteRoll};
use crate::history::RollHistory;
use crate::hotbar::Hotbar;
use crate::input::InputAction;

/// Largest modifier magnitude accepted from keyboard or direct entry.
pub const MAX_MODIFIER: i64 = 999_999;

/// Everything a renderer needs to draw the dice roller.
///
/// Only [`DiceSession`](crate::DiceSession) mutates this; everyone else gets
/// a shared reference.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Last die type added, used by the repeat-die shortcut.
    pub current_die_type: Die,
    /// Dice staged for the next roll, oldest first.
    pub dice_pool: DicePool,
    /// Numeric modifier for the next roll.
    pub modifier: i64,
    /// Raw modifier text as typed, so `-` and `-0` stay distinguishable.
    pub pending_modifier: String,
    /// Atomic inputs since the pending roll was last reset, oldest first.
    pub input_log: Vec<InputAction>,
    /// Most recent committed roll.
    pub last_roll: Option<RollResult>,
    /// Recent rolls, newest first.
    pub history: RollHistory,
    /// Saved favorites, most recently saved first.
    pub favorites: Vec<FavoriteRoll>,
    /// Hotbar slots.
    pub hotbar: Hotbar,
    /// Whether the history panel is shown.
    pub history_visible: bool,
    /// Whether the help overlay is shown.
    pub help_visible: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_die_type: Die::D20,
            dice_pool: DicePool::new(),
            modifier: 0,
            pending_modifier: String::new(),
            input_log: Vec::new(),
            last_roll: None,
            history: RollHistory::new(),
            favorites: Vec::new(),
            hotbar: Hotbar::new(),
            history_visible: false,
            help_visible: false,
        }
    }
}

impl SessionState {
    /// Quick mode: the pool is empty, so rolling means one d20 plus modifier.
    pub fn quick_mode(&self) -> bool {
        self.dice_pool.is_empty()
    }

    /// Whether there is anything worth saving as a favorite.
    pub fn has_pending_roll(&self) -> bool {
        !self.dice_pool.is_empty() || self.modifier != 0
    }

    /// The pending roll rendered as `2d20 + d8 -2`.
    pub fn formula(&self) -> String {
        format_formula(&self.dice_pool.groups(), self.modifier)
    }

    /// Expected total of the pending roll.
    pub fn average_total(&self) -> f64 {
        self.dice_pool.average_total(self.modifier)
    }

    /// Look up a favorite by id.
    pub fn favorite(&self, id: &FavoriteId) -> Option<&FavoriteRoll> {
        self.favorites.iter().find(|f| &f.id == id)
    }
}

/// Parse modifier text; `""` and `"-"` mean zero, overflow means `None`.
pub(crate) fn parse_modifier(text: &str) -> Option<i64> {
    match text {
        "" | "-" => Some(0),
        _ => text.parse::<i64>().ok(),
    }
}
