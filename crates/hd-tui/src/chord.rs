//! `d` then digit chord, the portable way to add a die.
//!
//! Many terminals never deliver Ctrl+digit, so `d` followed by a digit within
//! the timeout adds one die as well.
//!
//! ```text
//! ┌──────┐   d    ┌──────────────────┐  digit   ┌─────────────┐
//! │ Idle │──────▶│ AwaitingDieDigit │────────▶│ Digit(ch)   │
//! └──────┘        └──────────────────┘          └─────────────┘
//!    ▲                  │ timeout / other key
//!    └──────────────────┘
//! ```

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Default window between `d` and the digit.
pub const DEFAULT_CHORD_TIMEOUT: Duration = Duration::from_millis(1000);

/// What the detector made of one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordOutput {
    /// `d` was pressed; waiting for the digit.
    Pending,
    /// The chord completed with this digit.
    Digit(char),
    /// Not part of a chord; handle the key normally.
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChordState {
    Idle,
    AwaitingDieDigit { since: Instant },
}

/// Two-state detector for the `d`-digit chord.
#[derive(Debug, Clone)]
pub struct ChordDetector {
    state: ChordState,
    timeout: Duration,
}

impl Default for ChordDetector {
    fn default() -> Self {
        Self::new(DEFAULT_CHORD_TIMEOUT)
    }
}

impl ChordDetector {
    /// Create an idle detector with the given window.
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: ChordState::Idle,
            timeout,
        }
    }

    /// Feed one key event.
    ///
    /// A key other than a digit while waiting abandons the chord and passes
    /// through, so nothing typed is lost.
    pub fn feed(&mut self, key: &KeyEvent, now: Instant) -> ChordOutput {
        if key.kind != KeyEventKind::Press {
            return ChordOutput::PassThrough;
        }
        self.check_timeout(now);

        match self.state {
            ChordState::Idle => {
                if key.code == KeyCode::Char('d') && key.modifiers == KeyModifiers::NONE {
                    self.state = ChordState::AwaitingDieDigit { since: now };
                    ChordOutput::Pending
                } else {
                    ChordOutput::PassThrough
                }
            }
            ChordState::AwaitingDieDigit { .. } => {
                self.state = ChordState::Idle;
                match key.code {
                    KeyCode::Char(ch) if ch.is_ascii_digit() => ChordOutput::Digit(ch),
                    _ => ChordOutput::PassThrough,
                }
            }
        }
    }

    /// Drop a stale `d`. Returns true if the chord expired just now.
    pub fn check_timeout(&mut self, now: Instant) -> bool {
        if let ChordState::AwaitingDieDigit { since } = self.state
            && now.saturating_duration_since(since) > self.timeout
        {
            self.state = ChordState::Idle;
            return true;
        }
        false
    }

    /// Whether a `d` is waiting for its digit.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, ChordState::AwaitingDieDigit { .. })
    }

    /// Abandon any pending chord.
    pub fn reset(&mut self) {
        self.state = ChordState::Idle;
    }

    /// Time left before a pending chord expires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            ChordState::Idle => None,
            ChordState::AwaitingDieDigit { since } => {
                Some(self.timeout.saturating_sub(now.saturating_duration_since(since)))
            }
        }
    }
}
