//! Key-to-action mapping for each focus.
//!
//! Classification is pure: it looks at the key and the session state and
//! names an [`Action`]. `None` means the key is not handled here and may
//! fall through to the global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use hd_dice::Die;
use hd_session::{HOTBAR_SLOTS, SessionState};

/// Hotbar slot keys, slot 0 first.
pub const HOTBAR_KEYS: [char; HOTBAR_SLOTS] = ['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o'];

/// Everything a key press can ask the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Key consumed with no effect.
    Noop,
    /// Add one die.
    AddDie(Die),
    /// Add one die of the current type.
    RepeatDie,
    /// Type one modifier character.
    AppendModifier(char),
    /// Roll a single d20 plus modifier.
    QuickRoll,
    /// Roll the working pool.
    RollPool,
    /// Empty the pool and modifier.
    Clear,
    /// Delete the last typed modifier character.
    RemoveModifierChar,
    /// Undo the last input.
    Undo,
    /// Roll the last composition again.
    Reroll,
    /// Show or hide the history panel.
    ToggleHistory,
    /// Show or hide the help overlay.
    ToggleHelp,
    /// Copy the last total to the clipboard.
    CopyTotal,
    /// Ask for a name and save the pending roll.
    OpenFavoritePrompt,
    /// Roll a hotbar slot.
    RollHotbar(usize),
    /// Move the list selection down.
    SelectNext,
    /// Move the list selection up.
    SelectPrev,
    /// Roll the selected favorite or history entry.
    RollSelected,
    /// Delete the selected favorite.
    DeleteSelected,
    /// Put the selected favorite in a hotbar slot.
    AssignSelected(usize),
    /// Empty a hotbar slot.
    ClearSlot(usize),
    /// Load the selected history entry into the pool.
    LoadSelected,
    /// Return focus to the roller.
    Back,
}

/// Die added by Ctrl+digit or the `d` chord. 8, 9 and 0 add nothing.
pub fn die_for_digit(ch: char) -> Option<Die> {
    match ch {
        '1' => Some(Die::D20),
        '2' => Some(Die::D12),
        '3' => Some(Die::D10),
        '4' => Some(Die::D8),
        '5' => Some(Die::D6),
        '6' => Some(Die::D4),
        '7' => Some(Die::D100),
        _ => None,
    }
}

/// Hotbar slot for a letter, either case.
pub fn hotbar_index(ch: char) -> Option<usize> {
    let lower = ch.to_ascii_lowercase();
    HOTBAR_KEYS.iter().position(|&k| k == lower)
}

/// Hotbar key label for a slot, e.g. `Q`.
pub fn hotbar_label(index: usize) -> char {
    HOTBAR_KEYS
        .get(index)
        .map_or('?', |k| k.to_ascii_uppercase())
}

fn is_command(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META)
}

/// Keys while the roller has focus.
pub fn roller_action(key: &KeyEvent, state: &SessionState) -> Option<Action> {
    let command = is_command(key.modifiers);
    let action = match key.code {
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            if command {
                die_for_digit(ch).map_or(Action::Noop, Action::AddDie)
            } else {
                Action::AppendModifier(ch)
            }
        }
        KeyCode::Char('-') => {
            if state.pending_modifier.starts_with('-') {
                Action::Noop
            } else {
                Action::AppendModifier('-')
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if state.quick_mode() && state.dice_pool.is_empty() {
                Action::QuickRoll
            } else {
                Action::RollPool
            }
        }
        KeyCode::Esc => Action::Clear,
        KeyCode::Backspace => {
            if state.quick_mode()
                && state.dice_pool.is_empty()
                && !state.pending_modifier.is_empty()
            {
                Action::RemoveModifierChar
            } else {
                Action::Undo
            }
        }
        _ if command => return None,
        KeyCode::Char('=' | '+') => Action::RepeatDie,
        KeyCode::Char('r') => Action::Reroll,
        KeyCode::Char('h') => Action::ToggleHistory,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('c') => Action::CopyTotal,
        KeyCode::Char('f') => Action::OpenFavoritePrompt,
        KeyCode::Char(ch) => return hotbar_index(ch).map(Action::RollHotbar),
        _ => return None,
    };
    Some(action)
}

/// Keys while the favorites list has focus.
pub fn favorites_action(key: &KeyEvent) -> Option<Action> {
    if is_command(key.modifiers) {
        return None;
    }
    let action = match key.code {
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrev,
        KeyCode::Enter => Action::RollSelected,
        KeyCode::Delete | KeyCode::Char('x') => Action::DeleteSelected,
        KeyCode::Esc => Action::Back,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char(ch) => {
            let slot = hotbar_index(ch)?;
            if ch.is_ascii_uppercase() {
                Action::ClearSlot(slot)
            } else {
                Action::AssignSelected(slot)
            }
        }
        _ => return None,
    };
    Some(action)
}

/// Keys while the history list has focus.
pub fn history_action(key: &KeyEvent) -> Option<Action> {
    if is_command(key.modifiers) {
        return None;
    }
    let action = match key.code {
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrev,
        KeyCode::Enter => Action::RollSelected,
        KeyCode::Char('l') => Action::LoadSelected,
        KeyCode::Esc => Action::Back,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use hd_session::{DiceSession, SessionConfig};

    use super::*;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn idle() -> SessionState {
        SessionState::default()
    }

    #[test]
    fn digit_map() {
        let expected = [
            ('1', Die::D20),
            ('2', Die::D12),
            ('3', Die::D10),
            ('4', Die::D8),
            ('5', Die::D6),
            ('6', Die::D4),
            ('7', Die::D100),
        ];
        for (ch, die) in expected {
            assert_eq!(die_for_digit(ch), Some(die));
        }
        for ch in ['8', '9', '0'] {
            assert_eq!(die_for_digit(ch), None);
        }
    }

    #[test]
    fn ctrl_digit_adds_die_plain_digit_types() {
        let state = idle();
        assert_eq!(roller_action(&ctrl('1'), &state), Some(Action::AddDie(Die::D20)));
        assert_eq!(roller_action(&ctrl('9'), &state), Some(Action::Noop));
        let meta = KeyEvent::new(KeyCode::Char('7'), KeyModifiers::META);
        assert_eq!(roller_action(&meta, &state), Some(Action::AddDie(Die::D100)));
        assert_eq!(
            roller_action(&plain(KeyCode::Char('1')), &state),
            Some(Action::AppendModifier('1'))
        );
    }

    #[test]
    fn minus_only_once() {
        let mut session = DiceSession::new(SessionConfig::default().with_seed(1));
        let minus = plain(KeyCode::Char('-'));
        assert_eq!(
            roller_action(&minus, session.state()),
            Some(Action::AppendModifier('-'))
        );
        session.append_modifier_digit('-');
        assert_eq!(roller_action(&minus, session.state()), Some(Action::Noop));
    }

    #[test]
    fn enter_and_backspace_depend_on_mode() {
        let mut session = DiceSession::new(SessionConfig::default().with_seed(1));
        assert_eq!(
            roller_action(&plain(KeyCode::Enter), session.state()),
            Some(Action::QuickRoll)
        );
        assert_eq!(
            roller_action(&plain(KeyCode::Backspace), session.state()),
            Some(Action::Undo)
        );
        session.append_modifier_digit('3');
        assert_eq!(
            roller_action(&plain(KeyCode::Backspace), session.state()),
            Some(Action::RemoveModifierChar)
        );
        session.add_dice(Die::D6, 1);
        assert_eq!(
            roller_action(&plain(KeyCode::Char(' ')), session.state()),
            Some(Action::RollPool)
        );
        assert_eq!(
            roller_action(&plain(KeyCode::Backspace), session.state()),
            Some(Action::Undo)
        );
    }

    #[test]
    fn letters() {
        let state = idle();
        let key = |ch| roller_action(&plain(KeyCode::Char(ch)), &state);
        assert_eq!(key('r'), Some(Action::Reroll));
        assert_eq!(key('h'), Some(Action::ToggleHistory));
        assert_eq!(key('?'), Some(Action::ToggleHelp));
        assert_eq!(key('c'), Some(Action::CopyTotal));
        assert_eq!(key('f'), Some(Action::OpenFavoritePrompt));
        assert_eq!(key('='), Some(Action::RepeatDie));
        assert_eq!(key('q'), Some(Action::RollHotbar(0)));
        assert_eq!(key('o'), Some(Action::RollHotbar(8)));
        assert_eq!(key('R'), Some(Action::RollHotbar(3)));
        assert_eq!(key('z'), None);
    }

    #[test]
    fn ctrl_letters_fall_through() {
        let state = idle();
        assert_eq!(roller_action(&ctrl('h'), &state), None);
        assert_eq!(roller_action(&plain(KeyCode::Tab), &state), None);
    }

    #[test]
    fn favorites_keys() {
        assert_eq!(
            favorites_action(&plain(KeyCode::Char('w'))),
            Some(Action::AssignSelected(1))
        );
        assert_eq!(
            favorites_action(&plain(KeyCode::Char('W'))),
            Some(Action::ClearSlot(1))
        );
        assert_eq!(
            favorites_action(&plain(KeyCode::Char('r'))),
            Some(Action::AssignSelected(3))
        );
        assert_eq!(
            favorites_action(&plain(KeyCode::Delete)),
            Some(Action::DeleteSelected)
        );
        assert_eq!(favorites_action(&plain(KeyCode::Tab)), None);
    }

    #[test]
    fn history_keys() {
        assert_eq!(
            history_action(&plain(KeyCode::Char('l'))),
            Some(Action::LoadSelected)
        );
        assert_eq!(history_action(&plain(KeyCode::Up)), Some(Action::SelectPrev));
        assert_eq!(history_action(&plain(KeyCode::Char('q'))), None);
    }

    #[test]
    fn labels() {
        assert_eq!(hotbar_label(0), 'Q');
        assert_eq!(hotbar_label(8), 'O');
        assert_eq!(hotbar_label(9), '?');
    }
}
