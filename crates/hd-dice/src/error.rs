//! Error types for the dice engine.

/// Errors that can occur while constructing dice values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// A die tag did not name one of the supported die sizes.
    #[error("unknown die: {0}")]
    UnknownDie(String),

    /// A dice group was constructed with a quantity of zero.
    #[error("dice group for {0} must hold at least one die")]
    EmptyGroup(String),

    /// A dice group holds more dice than a pool may.
    #[error("dice group for {die} holds {quantity} dice, limit is {limit}")]
    TooManyDice {
        /// The die tag.
        die: String,
        /// The rejected quantity.
        quantity: u32,
        /// The largest accepted quantity.
        limit: u32,
    },
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
