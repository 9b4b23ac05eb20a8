//! Screen layout and rendering.

pub mod hotbar;
pub mod lists;
pub mod pool;
pub mod prompt;
pub mod result;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Focus, StatusLevel, TuiApp};
use crate::shared;

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Panels
            Constraint::Length(3), // Hotbar
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(columns[0]);

    pool::draw(frame, app, left[0]);
    result::draw(frame, app.session.state().last_roll.as_ref(), left[1]);

    let state = app.session.state();
    if state.history_visible {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);
        lists::draw_favorites(frame, app, right[0]);
        lists::draw_history(frame, app, right[1]);
    } else {
        lists::draw_favorites(frame, app, columns[1]);
    }

    hotbar::draw(frame, &state.hotbar, chunks[1]);
    draw_status(frame, app, chunks[2]);

    if let Some(prompt) = &app.prompt {
        prompt::draw(frame, prompt);
    }
    if state.help_visible {
        shared::draw_help_popup(frame);
    }
}

fn draw_status(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let status = match &app.status {
        Some(message) => {
            let style = match message.level {
                StatusLevel::Info => Style::default().fg(Color::Black).bg(Color::Green),
                StatusLevel::Warning => Style::default().fg(Color::Black).bg(Color::Yellow),
            };
            Paragraph::new(message.text.clone()).style(style)
        }
        None => Paragraph::new(status_hint(app))
            .style(Style::default().fg(Color::Black).bg(Color::White)),
    };
    frame.render_widget(status, area);
}

/// Context-sensitive key hints.
pub fn status_hint(app: &TuiApp) -> &'static str {
    if app.prompt.is_some() {
        return "Enter:save  Esc:cancel";
    }
    match app.focus {
        Focus::Roller if app.chord_pending() => "d: press 1-7 for d20 d12 d10 d8 d6 d4 d100",
        Focus::Roller => {
            "Ctrl/d+1..7:add die  0-9/-:modifier  Enter:roll  r:reroll  f:save  Tab:lists  ?:help"
        }
        Focus::Favorites => "j/k:select  Enter:roll  q..o:assign  Q..O:clear  x:delete  Esc:back",
        Focus::History => "j/k:select  Enter:reroll  l:load  Esc:back",
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use hd_session::{DiceSession, MemoryStore, SessionConfig};

    use super::*;
    use crate::clipboard::RecordingClipboard;
    use crate::persist::Persister;

    fn app() -> TuiApp {
        TuiApp::new(
            DiceSession::new(SessionConfig::default().with_seed(3)),
            Persister::spawn(Box::new(MemoryStore::new())),
            Box::new(RecordingClipboard::default()),
            Duration::from_millis(1000),
        )
    }

    fn keys(app: &mut TuiApp, text: &str) {
        let now = Instant::now();
        for ch in text.chars() {
            let code = match ch {
                '\n' => KeyCode::Enter,
                '\t' => KeyCode::Tab,
                c => KeyCode::Char(c),
            };
            app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
        }
    }

    fn render(app: &TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_screen() {
        let screen = render(&app());
        assert!(screen.contains("Dice Pool"));
        assert!(screen.contains("Quick d20"));
        assert!(screen.contains("No rolls yet"));
        assert!(screen.contains("No favorites"));
        assert!(screen.contains("Q:"));
        assert!(screen.contains("Hotbar 0/9"));
        assert!(!screen.contains("History"));
    }

    #[test]
    fn pool_and_average() {
        let mut app = app();
        keys(&mut app, "d1d1d4-2");
        let screen = render(&app);
        assert!(screen.contains("2d20 + d8 -2"));
        assert!(screen.contains("Avg 23.5"));
    }

    #[test]
    fn result_groups_dice() {
        let mut app = app();
        keys(&mut app, "d1d5d1\n");
        let screen = render(&app);
        let roll = app.session.state().last_roll.clone().unwrap();
        assert!(screen.contains(&format!("Total: {}", roll.total)));
        assert!(screen.contains("d20:"));
        assert!(screen.contains("d6:"));
    }

    #[test]
    fn history_panel_when_visible() {
        let mut app = app();
        keys(&mut app, "\nh");
        let screen = render(&app);
        assert!(screen.contains("History"));
        let entry = app.session.state().history.entries()[0].display_text.clone();
        assert!(screen.contains(&entry));
    }

    #[test]
    fn prompt_and_help_overlays() {
        let mut app = app();
        keys(&mut app, "d1fSneak");
        let screen = render(&app);
        assert!(screen.contains("Save Favorite"));
        assert!(screen.contains("Sneak"));

        keys(&mut app, "\n?");
        let screen = render(&app);
        assert!(screen.contains("Keyboard Shortcuts"));
        assert!(!screen.contains("Save Favorite"));
    }

    #[test]
    fn hints_follow_focus() {
        let mut app = app();
        assert!(status_hint(&app).contains("Enter:roll"));
        keys(&mut app, "\t");
        assert!(status_hint(&app).contains("assign"));
        keys(&mut app, "d");
        assert!(!app.chord_pending());
    }
}
