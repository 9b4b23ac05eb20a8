//! Best-effort key-value storage for favorites and hotbar.
//!
//! Two keys are used, each holding UTF-8 JSON. Loading never fails: bad or
//! unreadable data falls back to empty defaults and comes back as warnings.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::favorites::FavoriteRoll;
use crate::hotbar::{HOTBAR_SLOTS, Hotbar};

/// Key holding the favorites list.
pub const FAVORITES_KEY: &str = "favorites";

/// Key holding the hotbar slots.
pub const HOTBAR_KEY: &str = "hotbar";

/// A key-value blob store.
pub trait Store: Send {
    /// Read the text stored under a key, `None` if nothing is stored.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the text stored under a key.
    fn save(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store files under the given directory, created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path for a key. Keys are limited to `[A-Za-z0-9_-]`.
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Store for FileStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        // Write beside the target and rename so a crash never leaves half a file.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key, e.g. with fixture data.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    /// Current text under a key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.insert(key, value);
        Ok(())
    }
}

/// Favorites and hotbar recovered from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hydration {
    /// Saved favorites, newest first.
    pub favorites: Vec<FavoriteRoll>,
    /// Saved hotbar, with slots for unknown favorites already cleared.
    pub hotbar: Hotbar,
    /// Problems found while loading, for the user's attention.
    pub warnings: Vec<String>,
}

/// Load favorites and hotbar, degrading to defaults on any problem.
pub fn load_saved(store: &dyn Store) -> Hydration {
    let mut hydration = Hydration::default();

    let warnings = &mut hydration.warnings;
    if let Some(favorites) = load_key::<Vec<FavoriteRoll>>(store, FAVORITES_KEY, warnings) {
        hydration.favorites = favorites;
    }

    if let Some(slots) = load_key::<Vec<Option<FavoriteRoll>>>(store, HOTBAR_KEY, warnings) {
        let found = slots.len();
        match Hotbar::from_slots(slots) {
            Some(hotbar) => hydration.hotbar = hotbar,
            None => note(
                warnings,
                format!("ignored saved hotbar: expected {HOTBAR_SLOTS} slots, found {found}"),
            ),
        }
    }

    let dangling = hydration.hotbar.retain_known(&hydration.favorites);
    if dangling > 0 {
        note(
            warnings,
            format!("cleared {dangling} hotbar slot(s) pointing at missing favorites"),
        );
    }

    hydration
}

fn load_key<T: serde::de::DeserializeOwned>(
    store: &dyn Store,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let text = match store.load(key) {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(e) => {
            note(warnings, format!("could not read saved {key}: {e}"));
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(source) => {
            let e = StoreError::Malformed {
                key: key.to_string(),
                source,
            };
            note(warnings, format!("ignored saved {key}: {e}"));
            None
        }
    }
}

fn note(warnings: &mut Vec<String>, message: String) {
    warn!("{message}");
    warnings.push(message);
}
