//! Nine-slot hotbar of favorite copies.

use serde::{Deserialize, Serialize};

use crate::favorites::{FavoriteId, FavoriteRoll};

/// Number of hotbar slots.
pub const HOTBAR_SLOTS: usize = 9;

/// Fixed row of slots, each empty or holding a copy of a favorite.
///
/// Slots hold values, not links: deleting a favorite has to clear the slots
/// holding its id explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hotbar {
    slots: [Option<FavoriteRoll>; HOTBAR_SLOTS],
}

impl Hotbar {
    /// Create an empty hotbar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored slots; `None` if the slot count is wrong.
    pub fn from_slots(slots: Vec<Option<FavoriteRoll>>) -> Option<Self> {
        let slots: [Option<FavoriteRoll>; HOTBAR_SLOTS] = slots.try_into().ok()?;
        Some(Self { slots })
    }

    /// All slots in order.
    pub fn slots(&self) -> &[Option<FavoriteRoll>] {
        &self.slots
    }

    /// The favorite in a slot, if the index is valid and the slot occupied.
    pub fn get(&self, index: usize) -> Option<&FavoriteRoll> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Put a copy of a favorite in a slot. Returns false if out of range.
    pub fn assign(&mut self, index: usize, favorite: FavoriteRoll) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(favorite);
                true
            }
            None => false,
        }
    }

    /// Empty a slot, returning what it held.
    pub fn clear(&mut self, index: usize) -> Option<FavoriteRoll> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Empty every slot holding the given favorite. Returns how many.
    pub fn clear_favorite(&mut self, id: &FavoriteId) -> usize {
        let mut cleared = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|f| &f.id == id) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Empty every slot whose favorite is not in `favorites`. Returns how many.
    pub fn retain_known(&mut self, favorites: &[FavoriteRoll]) -> usize {
        let mut cleared = 0;
        for slot in &mut self.slots {
            if slot
                .as_ref()
                .is_some_and(|f| !favorites.iter().any(|known| known.id == f.id))
            {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
