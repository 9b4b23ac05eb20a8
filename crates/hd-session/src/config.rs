//! Configuration for a dice session.

/// Configuration for a dice session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// RNG seed for reproducible rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Whether the history panel starts open.
    pub history_visible: bool,
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set whether the history panel starts open.
    pub fn with_history_visible(mut self, visible: bool) -> Self {
        self.history_visible = visible;
        self
    }
}
