//! Top-level application state: the session plus focus, prompt and status.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use hd_session::DiceSession;

use crate::chord::{ChordDetector, ChordOutput};
use crate::clipboard::Clipboard;
use crate::keymap::{self, Action};
use crate::persist::Persister;

/// Poll interval while nothing is pending.
const IDLE_TICK: Duration = Duration::from_millis(250);

/// Which panel receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The dice roller (default).
    Roller,
    /// The favorites list.
    Favorites,
    /// The history list, only while visible.
    History,
}

/// Whether keys are commands or text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands.
    VimNav,
    /// A text field owns the keyboard.
    TextInput,
}

/// Severity of a status bar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Confirmation of something that happened.
    Info,
    /// Something went wrong but the app carries on.
    Warning,
}

/// A one-shot message shown in the status bar until the next key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Severity.
    pub level: StatusLevel,
    /// Text to show.
    pub text: String,
}

/// The save-favorite name field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePrompt {
    /// Text typed so far.
    pub text: String,
}

/// Main application state for the dice roller.
pub struct TuiApp {
    /// The dice session.
    pub session: DiceSession,
    /// Focused panel.
    pub focus: Focus,
    /// Open save-favorite prompt, if any.
    pub prompt: Option<NamePrompt>,
    /// Selected row in the favorites list.
    pub favorites_selected: usize,
    /// Selected row in the history list.
    pub history_selected: usize,
    /// Current status bar message.
    pub status: Option<StatusMessage>,
    /// Whether the app should quit.
    pub should_quit: bool,
    chord: ChordDetector,
    persister: Persister,
    clipboard: Box<dyn Clipboard>,
    ui_revision: u64,
}

impl TuiApp {
    /// Create an app around a hydrated session.
    pub fn new(
        session: DiceSession,
        persister: Persister,
        clipboard: Box<dyn Clipboard>,
        chord_timeout: Duration,
    ) -> Self {
        Self {
            session,
            focus: Focus::Roller,
            prompt: None,
            favorites_selected: 0,
            history_selected: 0,
            status: None,
            should_quit: false,
            chord: ChordDetector::new(chord_timeout),
            persister,
            clipboard,
            ui_revision: 0,
        }
    }

    /// Input mode for event routing.
    pub fn input_mode(&self) -> InputMode {
        if self.prompt.is_some() {
            InputMode::TextInput
        } else {
            InputMode::VimNav
        }
    }

    /// Changes whenever anything on screen may have changed.
    pub fn view_revision(&self) -> (u64, u64) {
        (self.session.revision(), self.ui_revision)
    }

    /// Whether a `d` is waiting for its digit.
    pub fn chord_pending(&self) -> bool {
        self.chord.is_pending()
    }

    /// How long the event loop may block before calling [`TuiApp::tick`].
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.chord
            .remaining(now)
            .map_or(IDLE_TICK, |left| left.min(IDLE_TICK))
    }

    /// Expire a stale chord.
    pub fn tick(&mut self, now: Instant) {
        if self.chord.check_timeout(now) {
            self.touch();
        }
    }

    /// Show load warnings in the status bar.
    pub fn show_warnings(&mut self, warnings: &[String]) {
        if let Some(first) = warnings.first() {
            let text = match warnings.len() {
                1 => first.clone(),
                n => format!("{first} (+{} more)", n - 1),
            };
            self.flash(StatusLevel::Warning, text);
        }
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.status.take().is_some() {
            self.touch();
        }

        if self.input_mode() == InputMode::TextInput {
            self.handle_prompt_key(key);
            self.flush_outbox();
            return;
        }

        if self.session.state().help_visible && key.code == KeyCode::Esc {
            self.session.toggle_help();
            return;
        }

        let action = match self.focus {
            Focus::Roller => self.roller_key(&key, now),
            Focus::Favorites => {
                self.chord.reset();
                keymap::favorites_action(&key)
            }
            Focus::History => {
                self.chord.reset();
                keymap::history_action(&key)
            }
        };

        match action {
            Some(action) => self.apply(action),
            None => self.handle_global_key(&key),
        }
        self.flush_outbox();
    }

    fn roller_key(&mut self, key: &KeyEvent, now: Instant) -> Option<Action> {
        let was_pending = self.chord.is_pending();
        let output = self.chord.feed(key, now);
        if was_pending != self.chord.is_pending() {
            self.touch();
        }
        match output {
            ChordOutput::Pending => Some(Action::Noop),
            ChordOutput::Digit(ch) => {
                Some(keymap::die_for_digit(ch).map_or(Action::Noop, Action::AddDie))
            }
            ChordOutput::PassThrough => keymap::roller_action(key, self.session.state()),
        }
    }

    fn handle_global_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                let name = prompt.text.clone();
                match self.session.save_favorite(&name) {
                    Some(_) => {
                        self.prompt = None;
                        self.favorites_selected = 0;
                        let saved = format!("Saved favorite \"{}\"", name.trim());
                        self.flash(StatusLevel::Info, saved);
                    }
                    None => self.flash(StatusLevel::Warning, "Name cannot be empty".to_string()),
                }
            }
            KeyCode::Backspace => {
                prompt.text.pop();
            }
            KeyCode::Char(ch) => prompt.text.push(ch),
            _ => {}
        }
        self.touch();
    }

    /// Carry out one action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Noop => {}
            Action::AddDie(die) => {
                self.session.add_dice(die, 1);
            }
            Action::RepeatDie => {
                self.session.repeat_current_die();
            }
            Action::AppendModifier(ch) => {
                self.session.append_modifier_digit(ch);
            }
            Action::QuickRoll => {
                self.session.roll_quick_d20(1);
                self.history_selected = 0;
            }
            Action::RollPool => {
                self.session.roll_dice_pool();
                self.history_selected = 0;
            }
            Action::Clear => self.session.clear_dice_pool(),
            Action::RemoveModifierChar => {
                self.session.remove_last_modifier_char();
            }
            Action::Undo => {
                self.session.remove_last_input();
            }
            Action::Reroll => {
                self.session.reroll_last();
            }
            Action::ToggleHistory => {
                self.session.toggle_history();
                self.normalize_focus();
            }
            Action::ToggleHelp => self.session.toggle_help(),
            Action::CopyTotal => self.copy_total(),
            Action::OpenFavoritePrompt => {
                if self.session.state().has_pending_roll() {
                    self.prompt = Some(NamePrompt::default());
                    self.touch();
                }
            }
            Action::RollHotbar(slot) => {
                if self.session.roll_from_hotbar_slot(slot).is_some() {
                    self.history_selected = 0;
                }
            }
            Action::SelectNext => self.move_selection(1),
            Action::SelectPrev => self.move_selection(-1),
            Action::RollSelected => self.roll_selected(),
            Action::DeleteSelected => self.delete_selected(),
            Action::AssignSelected(slot) => {
                if let Some(id) = self.selected_favorite().map(|f| f.id.clone()) {
                    self.session.assign_to_hotbar_slot(slot, &id);
                }
            }
            Action::ClearSlot(slot) => {
                self.session.clear_hotbar_slot(slot);
            }
            Action::LoadSelected => {
                if let Some(entry) = self.selected_history().cloned() {
                    self.session.load_history_roll(&entry);
                    self.focus = Focus::Roller;
                    self.touch();
                }
            }
            Action::Back => {
                self.focus = Focus::Roller;
                self.touch();
            }
        }
    }

    fn copy_total(&mut self) {
        let Some(total) = self.session.state().last_roll.as_ref().map(|r| r.total) else {
            return;
        };
        match self.clipboard.copy(&total.to_string()) {
            Ok(()) => self.flash(StatusLevel::Info, format!("Copied {total}")),
            Err(e) => debug!("clipboard copy failed: {e}"),
        }
    }

    fn roll_selected(&mut self) {
        match self.focus {
            Focus::Favorites => {
                if let Some(favorite) = self.selected_favorite().cloned() {
                    self.session.roll_from_favorite(&favorite);
                }
            }
            Focus::History => {
                if let Some(entry) = self.selected_history().cloned() {
                    self.session.reroll_from_history(&entry);
                    self.history_selected = 0;
                }
            }
            Focus::Roller => {}
        }
    }

    fn delete_selected(&mut self) {
        let Some(favorite) = self.selected_favorite().cloned() else {
            return;
        };
        if self.session.delete_favorite(&favorite.id) {
            self.flash(StatusLevel::Info, format!("Deleted \"{}\"", favorite.name));
            let len = self.session.state().favorites.len();
            self.favorites_selected = self.favorites_selected.min(len.saturating_sub(1));
        }
    }

    /// Favorite under the cursor.
    pub fn selected_favorite(&self) -> Option<&hd_session::FavoriteRoll> {
        self.session.state().favorites.get(self.favorites_selected)
    }

    /// History entry under the cursor.
    pub fn selected_history(&self) -> Option<&hd_session::RollHistoryEntry> {
        self.session.state().history.get(self.history_selected)
    }

    fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.focus {
            Focus::Favorites => (
                &mut self.favorites_selected,
                self.session.state().favorites.len(),
            ),
            Focus::History => (
                &mut self.history_selected,
                self.session.state().history.len(),
            ),
            Focus::Roller => return,
        };
        if len == 0 {
            return;
        }
        *selected = selected.saturating_add_signed(delta).min(len - 1);
        self.touch();
    }

    fn cycle_focus(&mut self, forward: bool) {
        let mut order = vec![Focus::Roller, Focus::Favorites];
        if self.session.state().history_visible {
            order.push(Focus::History);
        }
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % order.len()
        } else {
            (current + order.len() - 1) % order.len()
        };
        self.focus = order[next];
        self.chord.reset();
        self.touch();
    }

    fn normalize_focus(&mut self) {
        if self.focus == Focus::History && !self.session.state().history_visible {
            self.focus = Focus::Roller;
            self.touch();
        }
    }

    fn flash(&mut self, level: StatusLevel, text: String) {
        self.status = Some(StatusMessage { level, text });
        self.touch();
    }

    fn flush_outbox(&mut self) {
        for request in self.session.drain_outbox() {
            self.persister.send(request);
        }
    }

    /// Flush pending writes and stop the writer thread.
    pub fn shutdown(&mut self) {
        self.flush_outbox();
        self.persister.finish();
    }

    fn touch(&mut self) {
        self.ui_revision = self.ui_revision.wrapping_add(1);
    }
}
