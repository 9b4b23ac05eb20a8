//! Host-level settings for the terminal app.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use hd_session::SessionConfig;

use crate::chord::DEFAULT_CHORD_TIMEOUT;

/// Name of the log file inside the data directory.
pub const LOG_FILE: &str = "hotdice.log";

/// Settings for one run of the app.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Where favorites, hotbar and the log live.
    pub data_dir: PathBuf,
    /// Whether favorites and hotbar are read from and written to disk.
    pub persist: bool,
    /// Window between `d` and its digit.
    pub chord_timeout: Duration,
    /// Settings passed to the session.
    pub session: SessionConfig,
}

impl TuiConfig {
    /// Defaults with the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            persist: true,
            chord_timeout: DEFAULT_CHORD_TIMEOUT,
            session: SessionConfig::default(),
        }
    }

    /// Turn disk persistence on or off.
    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Set the chord window.
    pub fn with_chord_timeout(mut self, timeout: Duration) -> Self {
        self.chord_timeout = timeout;
        self
    }

    /// Set the session settings.
    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// Path of the log file.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

/// Pick the data directory from the process environment.
pub fn default_data_dir() -> PathBuf {
    data_dir_from(|name| std::env::var_os(name))
}

/// Pick the data directory using `env` to read variables.
///
/// Order: `$HOTDICE_DATA_DIR`, `$XDG_DATA_HOME/hotdice`,
/// `$HOME/.local/share/hotdice`, then `./.hotdice`.
pub fn data_dir_from(env: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    let set = |name: &str| env(name).filter(|v| !v.is_empty()).map(PathBuf::from);
    if let Some(dir) = set("HOTDICE_DATA_DIR") {
        return dir;
    }
    if let Some(xdg) = set("XDG_DATA_HOME") {
        return xdg.join("hotdice");
    }
    if let Some(home) = set("HOME") {
        return home.join(".local").join("share").join("hotdice");
    }
    PathBuf::from(".hotdice")
}
