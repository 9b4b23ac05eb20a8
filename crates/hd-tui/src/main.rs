//! Hotdice: a keyboard-driven dice roller for the terminal.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use hd_session::{DiceSession, FileStore, MemoryStore, SessionConfig, Store, load_saved};
use hd_tui::app::TuiApp;
use hd_tui::clipboard::Osc52Clipboard;
use hd_tui::config::{TuiConfig, default_data_dir};
use hd_tui::persist::Persister;

#[derive(Parser)]
#[command(
    name = "hotdice",
    about = "Keyboard-driven dice roller for tabletop games",
    version
)]
struct Args {
    /// RNG seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for favorites, hotbar and the log
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep favorites and hotbar in memory only
    #[arg(long)]
    no_persist: bool,

    /// Milliseconds allowed between `d` and its digit
    #[arg(long, default_value = "1000")]
    chord_timeout_ms: u64,

    /// Start with the history panel open
    #[arg(long)]
    show_history: bool,
}

impl Args {
    fn into_config(self) -> TuiConfig {
        let mut session = SessionConfig::default().with_history_visible(self.show_history);
        if let Some(seed) = self.seed {
            session = session.with_seed(seed);
        }
        TuiConfig::new(self.data_dir.unwrap_or_else(default_data_dir))
            .with_persist(!self.no_persist)
            .with_chord_timeout(Duration::from_millis(self.chord_timeout_ms))
            .with_session(session)
    }
}

fn main() {
    let config = Args::parse().into_config();

    if let Err(e) = hd_tui::logging::init(&config.log_path()) {
        eprintln!("warning: logging disabled: {e}");
    }
    info!(data_dir = %config.data_dir.display(), persist = config.persist, "starting");

    let store: Box<dyn Store> = if config.persist {
        Box::new(FileStore::new(&config.data_dir))
    } else {
        Box::new(MemoryStore::new())
    };
    let hydration = load_saved(store.as_ref());

    let mut session = DiceSession::new(config.session.clone());
    session.hydrate(hydration.favorites, hydration.hotbar);

    let mut app = TuiApp::new(
        session,
        Persister::spawn(store),
        Box::new(Osc52Clipboard::stdout()),
        config.chord_timeout,
    );
    app.show_warnings(&hydration.warnings);

    if let Err(e) = hd_tui::terminal::run(app) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
