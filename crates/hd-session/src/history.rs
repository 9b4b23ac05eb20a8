//! Most-recent-first roll history.

use chrono::{DateTime, Utc};

use hd_dice::{RollResult, format_roll_result};

/// Maximum number of entries kept; the oldest is evicted first.
pub const HISTORY_CAPACITY: usize = 10;

/// Unique, time-derived identifier of a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryId(String);

impl HistoryId {
    /// Build an id from the roll time and a per-session sequence number.
    pub fn new(timestamp: DateTime<Utc>, sequence: u64) -> Self {
        Self(format!("{}-{sequence}", timestamp.timestamp_millis()))
    }

    /// The id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HistoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One committed roll as shown in the history panel.
#[derive(Debug, Clone, PartialEq)]
pub struct RollHistoryEntry {
    /// Unique id of this entry.
    pub id: HistoryId,
    /// The committed roll.
    pub result: RollResult,
    /// Formula and total, e.g. `2d20 + d8 -2 = 17`.
    pub display_text: String,
}

impl RollHistoryEntry {
    /// Wrap a committed roll.
    pub fn new(result: RollResult, sequence: u64) -> Self {
        Self {
            id: HistoryId::new(result.timestamp, sequence),
            display_text: format_roll_result(&result),
            result,
        }
    }
}

/// Ring of the most recent committed rolls, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollHistory {
    entries: Vec<RollHistoryEntry>,
}

impl RollHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry at the front, evicting the oldest past capacity.
    pub fn push(&mut self, entry: RollHistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[RollHistoryEntry] {
        &self.entries
    }

    /// Entry at a position, 0 being the newest.
    pub fn get(&self, index: usize) -> Option<&RollHistoryEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use hd_dice::{DicePool, Die, roll_dice_pool};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn entry(rng: &mut StdRng, modifier: i64, sequence: u64) -> RollHistoryEntry {
        let pool = DicePool::new().add(Die::D6, 1);
        RollHistoryEntry::new(roll_dice_pool(&pool, modifier, rng), sequence)
    }

    #[test]
    fn newest_first_and_capped() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut history = RollHistory::new();
        for i in 0..15 {
            history.push(entry(&mut rng, i, i as u64));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.get(0).map(|e| e.result.modifier), Some(14));
        assert_eq!(history.get(9).map(|e| e.result.modifier), Some(5));
        assert!(history.get(10).is_none());
    }

    #[test]
    fn ids_are_unique_within_a_millisecond() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = entry(&mut rng, 0, 1);
        let mut b = entry(&mut rng, 0, 2);
        b.result.timestamp = a.result.timestamp;
        let b = RollHistoryEntry::new(b.result, 2);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn display_text_matches_result() {
        let mut rng = StdRng::seed_from_u64(3);
        let e = entry(&mut rng, -1, 1);
        assert_eq!(e.display_text, format!("d6 -1 = {}", e.result.total));
    }
}
