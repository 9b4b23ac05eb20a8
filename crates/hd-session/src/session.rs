//! The dice session: every state transition of the roller.
//!
//! Each method is one atomic, synchronous transition. Invalid arguments are
//! no-ops reported through the return value, never errors. Changes to
//! favorites or the hotbar queue a [`PersistRequest`] for the host to drain.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use hd_dice::{DicePool, Die, MAX_POOL_DICE, RollResult, roll_dice_pool, roll_groups};

use crate::config::SessionConfig;
use crate::favorites::{FavoriteId, FavoriteRoll};
use crate::history::RollHistoryEntry;
use crate::hotbar::{HOTBAR_SLOTS, Hotbar};
use crate::input::InputAction;
use crate::outbox::PersistRequest;
use crate::state::{MAX_MODIFIER, SessionState, parse_modifier};

/// Owns the roller state, its random source and the persistence outbox.
#[derive(Debug)]
pub struct DiceSession {
    state: SessionState,
    rng: StdRng,
    outbox: Vec<PersistRequest>,
    revision: u64,
    next_entry: u64,
}

impl DiceSession {
    /// Create a session with empty state.
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = SessionState {
            history_visible: config.history_visible,
            ..SessionState::default()
        };
        Self {
            state,
            rng,
            outbox: Vec::new(),
            revision: 0,
            next_entry: 0,
        }
    }

    /// Current state, for rendering.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Bumped on every change; renderers redraw when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Take all queued persistence requests, oldest first.
    pub fn drain_outbox(&mut self) -> Vec<PersistRequest> {
        std::mem::take(&mut self.outbox)
    }

    /// Install loaded favorites and hotbar. Queues nothing.
    pub fn hydrate(&mut self, favorites: Vec<FavoriteRoll>, mut hotbar: Hotbar) {
        let dangling = hotbar.retain_known(&favorites);
        if dangling > 0 {
            debug!(dangling, "dropped hotbar slots with unknown favorites");
        }
        self.state.favorites = favorites;
        self.state.hotbar = hotbar;
        self.touch();
    }

    // -- Pending roll -----------------------------------------------------

    /// Append `quantity` dice of one type. Zero, or more than the pool
    /// has room for, is a no-op.
    pub fn add_dice(&mut self, die: Die, quantity: u32) -> bool {
        let room = (MAX_POOL_DICE as usize).saturating_sub(self.state.dice_pool.count());
        if quantity == 0 || quantity as usize > room {
            return false;
        }
        self.state.dice_pool.push(die, quantity);
        self.state.current_die_type = die;
        for _ in 0..quantity {
            self.state.input_log.push(InputAction::die(die));
        }
        self.touch();
        true
    }

    /// Make `die` the type used by the repeat shortcut.
    pub fn set_die_type(&mut self, die: Die) {
        if self.state.current_die_type != die {
            self.state.current_die_type = die;
            self.touch();
        }
    }

    /// Add one die of the current type.
    pub fn repeat_current_die(&mut self) -> bool {
        self.add_dice(self.state.current_die_type, 1)
    }

    /// Append one character to the modifier text.
    ///
    /// Accepts digits, and `-` only as the first character. A digit that
    /// would push the modifier past [`MAX_MODIFIER`] is rejected.
    pub fn append_modifier_digit(&mut self, ch: char) -> bool {
        if ch == '-' && !self.state.pending_modifier.is_empty() {
            return false;
        }
        let Some(action) = InputAction::modifier_digit(ch) else {
            return false;
        };
        let mut text = self.state.pending_modifier.clone();
        text.push(ch);
        let Some(value) = parse_modifier(&text).filter(|v| v.abs() <= MAX_MODIFIER) else {
            return false;
        };
        self.state.pending_modifier = text;
        self.state.modifier = value;
        self.state.input_log.push(action);
        self.touch();
        true
    }

    /// Undo the most recent atomic input, whichever kind it was.
    pub fn remove_last_input(&mut self) -> Option<InputAction> {
        let action = self.state.input_log.pop()?;
        match action {
            InputAction::Die { .. } => {
                self.state.dice_pool.remove_last();
            }
            InputAction::ModifierDigit { .. } => {
                self.state.pending_modifier.pop();
                self.recompute_modifier();
            }
        }
        self.touch();
        Some(action)
    }

    /// Delete the last modifier character, leaving dice alone.
    pub fn remove_last_modifier_char(&mut self) -> bool {
        if self.state.pending_modifier.pop().is_none() {
            return false;
        }
        if let Some(pos) = self.state.input_log.iter().rposition(InputAction::is_modifier) {
            self.state.input_log.remove(pos);
        }
        self.recompute_modifier();
        self.touch();
        true
    }

    /// Set the modifier directly. The typed text and its undo entries go.
    pub fn set_modifier(&mut self, value: i64, is_negative: bool) {
        let magnitude = value.saturating_abs().min(MAX_MODIFIER);
        self.state.modifier = if is_negative { -magnitude } else { magnitude };
        self.drop_modifier_text();
        self.touch();
    }

    /// Restart modifier entry, optionally with a leading minus.
    pub fn start_modifier_mode(&mut self, is_negative: bool) {
        self.drop_modifier_text();
        self.state.modifier = 0;
        if is_negative {
            self.append_modifier_digit('-');
        }
        self.touch();
    }

    /// Empty the pool and reset the modifier.
    pub fn clear_dice_pool(&mut self) {
        self.reset_pending();
        self.touch();
    }

    // -- Rolling ----------------------------------------------------------

    /// Roll `quantity` d20 plus the modifier, then reset the modifier.
    pub fn roll_quick_d20(&mut self, quantity: u32) -> Option<RollResult> {
        if quantity == 0 {
            return None;
        }
        let pool = DicePool::new().add(Die::D20, quantity);
        let result = roll_dice_pool(&pool, self.state.modifier, &mut self.rng);
        self.drop_modifier_text();
        self.state.modifier = 0;
        Some(self.commit(result))
    }

    /// Roll the working pool plus modifier and reset the pending roll.
    ///
    /// An empty pool rolls a single quick d20 instead.
    pub fn roll_dice_pool(&mut self) -> RollResult {
        if self.state.dice_pool.is_empty() {
            let result = roll_dice_pool(
                &DicePool::new().add(Die::D20, 1),
                self.state.modifier,
                &mut self.rng,
            );
            self.reset_pending();
            return self.commit(result);
        }
        let result = roll_dice_pool(&self.state.dice_pool, self.state.modifier, &mut self.rng);
        self.reset_pending();
        self.commit(result)
    }

    /// Roll the last committed composition again.
    pub fn reroll_last(&mut self) -> Option<RollResult> {
        let last = self.state.last_roll.as_ref()?;
        let result = roll_groups(&last.dice_pool, last.modifier, &mut self.rng);
        Some(self.commit(result))
    }

    /// Roll a history entry's composition again.
    pub fn reroll_from_history(&mut self, entry: &RollHistoryEntry) -> RollResult {
        let result = roll_groups(&entry.result.dice_pool, entry.result.modifier, &mut self.rng);
        self.commit(result)
    }

    /// Replace the pending roll with a history entry's composition.
    ///
    /// Each loaded die gets an undo entry, so undo peels them off newest
    /// first.
    pub fn load_history_roll(&mut self, entry: &RollHistoryEntry) {
        self.reset_pending();
        self.state.dice_pool = entry.result.to_pool();
        self.state.modifier = entry.result.modifier;
        let loaded = self.state.dice_pool.dice().iter().map(|&die| InputAction::die(die));
        self.state.input_log.extend(loaded);
        if let Some(&last) = self.state.dice_pool.dice().last() {
            self.state.current_die_type = last;
        }
        self.touch();
    }

    // -- Favorites and hotbar ---------------------------------------------

    /// Save the pending roll under a name. Blank names are rejected.
    pub fn save_favorite(&mut self, name: &str) -> Option<FavoriteId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let favorite = FavoriteRoll::new(name, &self.state.dice_pool, self.state.modifier);
        let id = favorite.id.clone();
        debug!(id = %id, name, formula = %favorite.formula(), "saved favorite");
        self.state.favorites.insert(0, favorite);
        self.queue_favorites();
        self.touch();
        Some(id)
    }

    /// Roll a favorite. The pending roll is untouched.
    pub fn roll_from_favorite(&mut self, favorite: &FavoriteRoll) -> RollResult {
        let result = roll_groups(&favorite.dice_pool, favorite.modifier, &mut self.rng);
        self.commit(result)
    }

    /// Delete a favorite and every hotbar slot holding it.
    pub fn delete_favorite(&mut self, id: &FavoriteId) -> bool {
        let before = self.state.favorites.len();
        self.state.favorites.retain(|f| &f.id != id);
        if self.state.favorites.len() == before {
            return false;
        }
        self.queue_favorites();
        if self.state.hotbar.clear_favorite(id) > 0 {
            self.queue_hotbar();
        }
        self.touch();
        true
    }

    /// Put a copy of a favorite in a hotbar slot.
    pub fn assign_to_hotbar_slot(&mut self, index: usize, id: &FavoriteId) -> bool {
        if index >= HOTBAR_SLOTS {
            return false;
        }
        let Some(favorite) = self.state.favorite(id).cloned() else {
            return false;
        };
        self.state.hotbar.assign(index, favorite);
        self.queue_hotbar();
        self.touch();
        true
    }

    /// Empty a hotbar slot.
    pub fn clear_hotbar_slot(&mut self, index: usize) -> bool {
        if index >= HOTBAR_SLOTS {
            return false;
        }
        self.state.hotbar.clear(index);
        self.queue_hotbar();
        self.touch();
        true
    }

    /// Roll the favorite in a hotbar slot, if any.
    pub fn roll_from_hotbar_slot(&mut self, index: usize) -> Option<RollResult> {
        let favorite = self.state.hotbar.get(index)?.clone();
        Some(self.roll_from_favorite(&favorite))
    }

    // -- Panels -----------------------------------------------------------

    /// Show or hide the history panel.
    pub fn toggle_history(&mut self) {
        self.state.history_visible = !self.state.history_visible;
        self.touch();
    }

    /// Show or hide the help overlay.
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
        self.touch();
    }

    // -- Internals --------------------------------------------------------

    fn commit(&mut self, result: RollResult) -> RollResult {
        self.next_entry += 1;
        let entry = RollHistoryEntry::new(result.clone(), self.next_entry);
        debug!(id = %entry.id, roll = %entry.display_text, "committed roll");
        self.state.history.push(entry);
        self.state.last_roll = Some(result.clone());
        self.touch();
        result
    }

    fn reset_pending(&mut self) {
        self.state.dice_pool.clear();
        self.state.modifier = 0;
        self.state.pending_modifier.clear();
        self.state.input_log.clear();
    }

    fn drop_modifier_text(&mut self) {
        self.state.pending_modifier.clear();
        self.state.input_log.retain(|a| !a.is_modifier());
    }

    fn recompute_modifier(&mut self) {
        self.state.modifier = parse_modifier(&self.state.pending_modifier).unwrap_or(0);
    }

    fn queue_favorites(&mut self) {
        self.outbox
            .push(PersistRequest::Favorites(self.state.favorites.clone()));
    }

    fn queue_hotbar(&mut self) {
        self.outbox.push(PersistRequest::Hotbar(self.state.hotbar.clone()));
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use hd_dice::DiceGroup;
    use proptest::prelude::*;

    use super::*;
    use crate::history::HISTORY_CAPACITY;

    fn session() -> DiceSession {
        DiceSession::new(SessionConfig::default().with_seed(7))
    }

    fn pending(s: &DiceSession) -> (DicePool, i64, String) {
        let st = s.state();
        (st.dice_pool.clone(), st.modifier, st.pending_modifier.clone())
    }

    #[test]
    fn build_pool_with_negative_modifier() {
        let mut s = session();
        assert!(s.add_dice(Die::D20, 2));
        assert!(s.add_dice(Die::D8, 1));
        assert!(s.append_modifier_digit('-'));
        assert!(s.append_modifier_digit('2'));

        let st = s.state();
        assert_eq!(
            st.dice_pool.groups(),
            vec![DiceGroup::new(Die::D20, 2).unwrap(), DiceGroup::single(Die::D8)]
        );
        assert_eq!(st.modifier, -2);
        assert!(!st.quick_mode());
        assert_eq!(st.dice_pool.to_string(), "2d20 + d8");
        assert_eq!(st.formula(), "2d20 + d8 -2");
        assert_eq!(st.current_die_type, Die::D8);
        assert_eq!(st.input_log.len(), 5);
    }

    #[test]
    fn add_zero_dice_is_noop() {
        let mut s = session();
        let rev = s.revision();
        assert!(!s.add_dice(Die::D6, 0));
        assert!(s.state().dice_pool.is_empty());
        assert_eq!(s.revision(), rev);
    }

    #[test]
    fn pool_size_capped() {
        let mut s = session();
        assert!(s.add_dice(Die::D6, MAX_POOL_DICE - 1));
        assert!(!s.add_dice(Die::D6, 2));
        assert!(s.repeat_current_die());
        assert!(!s.repeat_current_die());
        assert_eq!(s.state().dice_pool.count(), MAX_POOL_DICE as usize);
    }

    #[test]
    fn minus_only_leads() {
        let mut s = session();
        assert!(s.append_modifier_digit('3'));
        assert!(!s.append_modifier_digit('-'));
        assert!(!s.append_modifier_digit('x'));
        assert_eq!(s.state().pending_modifier, "3");
        assert_eq!(s.state().modifier, 3);
    }

    #[test]
    fn lone_minus_is_zero() {
        let mut s = session();
        s.append_modifier_digit('-');
        assert_eq!(s.state().modifier, 0);
        assert_eq!(s.state().pending_modifier, "-");
        s.append_modifier_digit('0');
        assert_eq!(s.state().modifier, 0);
        assert_eq!(s.state().pending_modifier, "-0");
    }

    #[test]
    fn modifier_capped() {
        let mut s = session();
        for ch in "999999".chars() {
            assert!(s.append_modifier_digit(ch));
        }
        assert!(!s.append_modifier_digit('9'));
        assert_eq!(s.state().modifier, MAX_MODIFIER);
    }

    #[test]
    fn undo_interleaved_inputs() {
        let mut s = session();
        s.add_dice(Die::D6, 1);
        s.append_modifier_digit('4');
        s.add_dice(Die::D8, 1);

        assert!(matches!(
            s.remove_last_input(),
            Some(InputAction::Die { die: Die::D8, .. })
        ));
        assert!(s.remove_last_input().is_some_and(|a| a.is_modifier()));
        assert_eq!(s.state().modifier, 0);
        assert_eq!(s.state().dice_pool.dice(), &[Die::D6]);
        assert!(s.remove_last_input().is_some());
        assert!(s.remove_last_input().is_none());
    }

    #[test]
    fn remove_last_modifier_char_keeps_dice() {
        let mut s = session();
        s.append_modifier_digit('1');
        s.add_dice(Die::D4, 1);
        s.append_modifier_digit('5');
        assert!(s.remove_last_modifier_char());
        assert_eq!(s.state().pending_modifier, "1");
        assert_eq!(s.state().modifier, 1);
        assert_eq!(s.state().dice_pool.count(), 1);
        assert_eq!(s.state().input_log.len(), 2);
        assert!(s.remove_last_modifier_char());
        assert!(!s.remove_last_modifier_char());
        assert_eq!(s.state().input_log.len(), 1);
    }

    #[test]
    fn set_modifier_replaces_typed_text() {
        let mut s = session();
        s.add_dice(Die::D10, 1);
        s.append_modifier_digit('7');
        s.set_modifier(5, true);
        assert_eq!(s.state().modifier, -5);
        assert!(s.state().pending_modifier.is_empty());
        assert_eq!(s.state().input_log.len(), 1);
        s.set_modifier(-3, false);
        assert_eq!(s.state().modifier, 3);
    }

    #[test]
    fn start_modifier_mode_resets_text() {
        let mut s = session();
        s.append_modifier_digit('8');
        s.start_modifier_mode(true);
        assert_eq!(s.state().pending_modifier, "-");
        assert_eq!(s.state().modifier, 0);
        s.append_modifier_digit('4');
        assert_eq!(s.state().modifier, -4);
        s.start_modifier_mode(false);
        assert_eq!(s.state().pending_modifier, "");
        assert!(s.state().input_log.is_empty());
    }

    #[test]
    fn repeat_uses_current_die() {
        let mut s = session();
        assert!(s.repeat_current_die());
        s.set_die_type(Die::D12);
        s.repeat_current_die();
        assert_eq!(s.state().dice_pool.dice(), &[Die::D20, Die::D12]);
    }

    #[test]
    fn pool_roll_resets_pending() {
        let mut s = session();
        s.add_dice(Die::D20, 2);
        s.append_modifier_digit('3');
        let result = s.roll_dice_pool();
        assert_eq!(result.dice.len(), 2);
        assert_eq!(result.modifier, 3);
        assert_eq!(result.total, result.subtotal + 3);

        let st = s.state();
        assert!(st.dice_pool.is_empty());
        assert_eq!(st.modifier, 0);
        assert!(st.pending_modifier.is_empty());
        assert!(st.input_log.is_empty());
        assert_eq!(st.last_roll.as_ref(), Some(&result));
        assert_eq!(st.history.len(), 1);
    }

    #[test]
    fn empty_pool_roll_is_quick_d20() {
        let mut s = session();
        s.append_modifier_digit('5');
        let result = s.roll_dice_pool();
        assert_eq!(result.dice.len(), 1);
        assert_eq!(result.dice[0].die, Die::D20);
        assert_eq!(result.modifier, 5);
        assert_eq!(s.state().modifier, 0);
    }

    #[test]
    fn quick_roll_resets_modifier() {
        let mut s = session();
        s.append_modifier_digit('-');
        s.append_modifier_digit('1');
        let result = s.roll_quick_d20(1).unwrap();
        assert_eq!(result.modifier, -1);
        assert_eq!(s.state().modifier, 0);
        assert!(s.state().pending_modifier.is_empty());
        assert!(s.roll_quick_d20(0).is_none());
        assert_eq!(s.state().history.len(), 1);
    }

    #[test]
    fn quick_roll_several_d20() {
        let mut s = session();
        let result = s.roll_quick_d20(3).unwrap();
        assert_eq!(result.dice.len(), 3);
        assert_eq!(result.dice_pool, vec![DiceGroup::new(Die::D20, 3).unwrap()]);
    }

    #[test]
    fn reroll_last_keeps_composition() {
        let mut s = session();
        assert!(s.reroll_last().is_none());
        s.add_dice(Die::D6, 3);
        s.append_modifier_digit('2');
        let first = s.roll_dice_pool();
        s.add_dice(Die::D4, 1);
        let again = s.reroll_last().unwrap();
        assert_eq!(again.dice_pool, first.dice_pool);
        assert_eq!(again.modifier, 2);
        assert_eq!(s.state().dice_pool.dice(), &[Die::D4]);
        assert_eq!(s.state().history.len(), 2);
    }

    #[test]
    fn history_capped_newest_first() {
        let mut s = session();
        for _ in 0..15 {
            s.roll_quick_d20(1);
        }
        let history = &s.state().history;
        assert_eq!(history.len(), HISTORY_CAPACITY);
        let last = s.state().last_roll.as_ref().unwrap();
        assert_eq!(&history.entries()[0].result, last);
        let ids: std::collections::HashSet<_> = history.entries().iter().map(|e| &e.id).collect();
        assert_eq!(ids.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn history_replay_leaves_pending_alone() {
        let mut s = session();
        s.add_dice(Die::D8, 2);
        s.roll_dice_pool();
        let entry = s.state().history.entries()[0].clone();

        s.add_dice(Die::D12, 1);
        s.append_modifier_digit('4');
        let before = pending(&s);
        let result = s.reroll_from_history(&entry);
        assert_eq!(result.dice_pool, entry.result.dice_pool);
        assert_eq!(pending(&s), before);
        assert_eq!(s.state().history.len(), 2);
    }

    #[test]
    fn load_history_replaces_pending() {
        let mut s = session();
        s.add_dice(Die::D10, 2);
        s.append_modifier_digit('-');
        s.append_modifier_digit('1');
        s.roll_dice_pool();
        let entry = s.state().history.entries()[0].clone();

        s.add_dice(Die::D4, 1);
        s.append_modifier_digit('9');
        s.load_history_roll(&entry);
        let st = s.state();
        assert_eq!(st.dice_pool.dice(), &[Die::D10, Die::D10]);
        assert_eq!(st.modifier, -1);
        assert!(st.pending_modifier.is_empty());
        assert_eq!(st.input_log.len(), 2);
        assert_eq!(st.history.len(), 1);
    }

    #[test]
    fn undo_after_load_removes_newest_loaded_die() {
        let mut s = session();
        s.add_dice(Die::D20, 1);
        s.add_dice(Die::D6, 2);
        s.append_modifier_digit('4');
        s.roll_dice_pool();
        let entry = s.state().history.entries()[0].clone();

        s.load_history_roll(&entry);
        let undone = s.remove_last_input();
        assert!(matches!(undone, Some(InputAction::Die { die: Die::D6, .. })));
        assert_eq!(s.state().dice_pool.dice(), &[Die::D20, Die::D6]);
        assert_eq!(s.state().modifier, 4);

        s.remove_last_input();
        s.remove_last_input();
        assert!(s.state().dice_pool.is_empty());
        assert!(s.remove_last_input().is_none());
    }

    #[test]
    fn save_favorite_snapshots_and_queues() {
        let mut s = session();
        assert!(s.save_favorite("  ").is_none());
        s.add_dice(Die::D20, 1);
        s.append_modifier_digit('5');
        let id = s.save_favorite("  Attack ").unwrap();

        let fav = s.state().favorite(&id).unwrap();
        assert_eq!(fav.name, "Attack");
        assert_eq!(fav.formula(), "d20 +5");
        // Saving does not consume the pending roll.
        assert_eq!(s.state().dice_pool.count(), 1);

        let outbox = s.drain_outbox();
        assert!(matches!(&outbox[..], [PersistRequest::Favorites(f)] if f.len() == 1));
        assert!(s.drain_outbox().is_empty());
    }

    #[test]
    fn favorites_newest_first() {
        let mut s = session();
        s.add_dice(Die::D4, 1);
        s.save_favorite("one");
        s.save_favorite("two");
        let names: Vec<_> = s.state().favorites.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["two", "one"]);
    }

    #[test]
    fn favorite_roll_leaves_pending_alone() {
        let mut s = session();
        s.add_dice(Die::D100, 1);
        s.set_modifier(3, false);
        let id = s.save_favorite("Percent").unwrap();
        let fav = s.state().favorite(&id).cloned().unwrap();

        s.add_dice(Die::D6, 1);
        s.append_modifier_digit('2');
        let before = pending(&s);
        let result = s.roll_from_favorite(&fav);
        assert_eq!(result.modifier, 3);
        assert_eq!(result.dice_pool, fav.dice_pool);
        assert_eq!(pending(&s), before);
        assert_eq!(s.state().last_roll.as_ref(), Some(&result));
    }

    #[test]
    fn delete_favorite_clears_exact_slots() {
        let mut s = session();
        s.add_dice(Die::D6, 1);
        let a = s.save_favorite("a").unwrap();
        let b = s.save_favorite("b").unwrap();
        s.assign_to_hotbar_slot(0, &a);
        s.assign_to_hotbar_slot(2, &b);
        s.assign_to_hotbar_slot(5, &a);
        s.drain_outbox();

        assert!(s.delete_favorite(&a));
        let bar = &s.state().hotbar;
        assert!(bar.get(0).is_none());
        assert!(bar.get(5).is_none());
        assert_eq!(bar.get(2).map(|f| &f.id), Some(&b));
        assert!(s.state().favorite(&a).is_none());

        let outbox = s.drain_outbox();
        assert_eq!(outbox.len(), 2);
        assert!(!s.delete_favorite(&a));
        assert!(s.drain_outbox().is_empty());
    }

    #[test]
    fn hotbar_bounds_and_unknown_ids() {
        let mut s = session();
        s.add_dice(Die::D8, 1);
        let id = s.save_favorite("x").unwrap();
        s.drain_outbox();
        assert!(!s.assign_to_hotbar_slot(HOTBAR_SLOTS, &id));
        assert!(!s.assign_to_hotbar_slot(0, &FavoriteId::from("nope")));
        assert!(!s.clear_hotbar_slot(9));
        assert!(s.roll_from_hotbar_slot(0).is_none());
        assert!(s.roll_from_hotbar_slot(99).is_none());
        assert!(s.drain_outbox().is_empty());
    }

    #[test]
    fn hotbar_roll_and_clear() {
        let mut s = session();
        s.add_dice(Die::D12, 2);
        let id = s.save_favorite("Greataxe").unwrap();
        assert!(s.assign_to_hotbar_slot(4, &id));
        let result = s.roll_from_hotbar_slot(4).unwrap();
        assert_eq!(result.dice.len(), 2);
        assert!(s.clear_hotbar_slot(4));
        assert!(s.roll_from_hotbar_slot(4).is_none());
        let outbox = s.drain_outbox();
        assert!(matches!(outbox.last(), Some(PersistRequest::Hotbar(h)) if h.occupied() == 0));
    }

    #[test]
    fn hydrate_drops_dangling_slots() {
        let mut s = session();
        let kept = FavoriteRoll::new("kept", &DicePool::new().add(Die::D4, 1), 0);
        let gone = FavoriteRoll::new("gone", &DicePool::new().add(Die::D4, 1), 0);
        let mut bar = Hotbar::new();
        bar.assign(0, kept.clone());
        bar.assign(1, gone);
        s.hydrate(vec![kept.clone()], bar);
        assert_eq!(s.state().hotbar.get(0), Some(&kept));
        assert!(s.state().hotbar.get(1).is_none());
        assert!(s.drain_outbox().is_empty());
    }

    #[test]
    fn toggles_and_config() {
        let mut s = DiceSession::new(SessionConfig::default().with_history_visible(true));
        assert!(s.state().history_visible);
        s.toggle_history();
        s.toggle_help();
        assert!(!s.state().history_visible);
        assert!(s.state().help_visible);
    }

    #[test]
    fn clear_resets_everything_pending() {
        let mut s = session();
        s.add_dice(Die::D6, 4);
        s.append_modifier_digit('2');
        s.clear_dice_pool();
        assert_eq!(pending(&s), (DicePool::new(), 0, String::new()));
        assert!(s.state().input_log.is_empty());
    }

    #[test]
    fn seeded_sessions_agree() {
        let mut a = session();
        let mut b = session();
        a.add_dice(Die::D20, 4);
        b.add_dice(Die::D20, 4);
        assert_eq!(a.roll_dice_pool().dice, b.roll_dice_pool().dice);
    }

    #[derive(Debug, Clone)]
    enum Input {
        Dice(Die, u32),
        Digit(char),
    }

    fn arb_input() -> impl Strategy<Value = Input> {
        prop_oneof![
            (prop::sample::select(Die::ALL.to_vec()), 1u32..4).prop_map(|(d, n)| Input::Dice(d, n)),
            prop::sample::select(vec!['-', '0', '1', '5', '9']).prop_map(Input::Digit),
        ]
    }

    proptest! {
        #[test]
        fn undo_restores_empty_pending(inputs in prop::collection::vec(arb_input(), 0..30)) {
            let mut s = session();
            for input in &inputs {
                match *input {
                    Input::Dice(die, n) => { s.add_dice(die, n); }
                    Input::Digit(ch) => { s.append_modifier_digit(ch); }
                }
            }
            let logged = s.state().input_log.len();
            for _ in 0..logged {
                prop_assert!(s.remove_last_input().is_some());
            }
            prop_assert!(s.remove_last_input().is_none());
            prop_assert_eq!(pending(&s), (DicePool::new(), 0, String::new()));
        }

        #[test]
        fn modifier_text_matches_log(inputs in prop::collection::vec(arb_input(), 0..30)) {
            let mut s = session();
            for input in &inputs {
                match *input {
                    Input::Dice(die, n) => { s.add_dice(die, n); }
                    Input::Digit(ch) => { s.append_modifier_digit(ch); }
                }
            }
            let st = s.state();
            let typed = st.input_log.iter().filter(|a| a.is_modifier()).count();
            prop_assert_eq!(typed, st.pending_modifier.chars().count());
            let dice = st.input_log.len() - typed;
            prop_assert_eq!(dice, st.dice_pool.count());
        }
    }
}
