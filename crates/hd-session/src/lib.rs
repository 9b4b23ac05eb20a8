//! Interaction state machine for Hotdice.
//!
//! [`DiceSession`] owns the whole session state: the working dice pool, the
//! pending modifier text and its undo log, the last roll, a ten-entry roll
//! history, saved favorites, and the nine-slot hotbar. Every mutation goes
//! through one of its actions. Changes to favorites and hotbar are emitted
//! as [`PersistRequest`]s for the host to hand to a [`Store`].

pub mod config;
pub mod error;
pub mod favorites;
pub mod history;
pub mod hotbar;
pub mod input;
pub mod outbox;
pub mod session;
pub mod state;
pub mod store;

pub use config::SessionConfig;
pub use error::{FavoriteError, StoreError, StoreResult};
pub use favorites::{FavoriteId, FavoriteRoll};
pub use history::{HISTORY_CAPACITY, HistoryId, RollHistory, RollHistoryEntry};
pub use hotbar::{HOTBAR_SLOTS, Hotbar};
pub use input::InputAction;
pub use outbox::PersistRequest;
pub use session::DiceSession;
pub use state::{MAX_MODIFIER, SessionState};
pub use store::{FAVORITES_KEY, FileStore, HOTBAR_KEY, Hydration, MemoryStore, Store, load_saved};
