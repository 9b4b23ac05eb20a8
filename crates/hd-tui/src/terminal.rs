//! Terminal setup, teardown, and main event loop.

use std::io;
use std::time::Instant;

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use crate::app::TuiApp;
use crate::views;

/// Launch the TUI application. Pending writes are flushed before returning.
pub fn run(mut app: TuiApp) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    app.shutdown();
    result
}

/// Main event loop. Redraws only when something visible changed.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
) -> Result<(), String> {
    let mut drawn = None;
    loop {
        let revision = app.view_revision();
        if drawn != Some(revision) {
            terminal
                .draw(|frame| views::draw(frame, app))
                .map_err(|e| format!("draw error: {e}"))?;
            drawn = Some(revision);
        }

        if app.should_quit {
            return Ok(());
        }

        let timeout = app.poll_timeout(Instant::now());
        if event::poll(timeout).map_err(|e| format!("event error: {e}"))? {
            let event = event::read().map_err(|e| format!("event error: {e}"))?;
            match event {
                Event::Key(key) => app.handle_key(key, Instant::now()),
                Event::Resize(..) => drawn = None,
                _ => {}
            }
        }
        app.tick(Instant::now());
    }
}
