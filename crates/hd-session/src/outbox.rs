//! Fire-and-forget persistence requests emitted by the session.

use crate::error::{StoreError, StoreResult};
use crate::favorites::FavoriteRoll;
use crate::hotbar::Hotbar;
use crate::store::{FAVORITES_KEY, HOTBAR_KEY};

/// A snapshot of one persisted collection that should be written out.
///
/// The session pushes one after every change to favorites or hotbar. The
/// host drains them and owns all failure handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistRequest {
    /// The full favorites list, newest first.
    Favorites(Vec<FavoriteRoll>),
    /// The full hotbar.
    Hotbar(Hotbar),
}

impl PersistRequest {
    /// Storage key this request writes.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Favorites(_) => FAVORITES_KEY,
            Self::Hotbar(_) => HOTBAR_KEY,
        }
    }

    /// Encode the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> StoreResult<String> {
        let encoded = match self {
            Self::Favorites(favorites) => serde_json::to_string_pretty(favorites),
            Self::Hotbar(hotbar) => serde_json::to_string_pretty(hotbar),
        };
        encoded.map_err(|source| StoreError::Encode {
            key: self.key().to_string(),
            source,
        })
    }
}
