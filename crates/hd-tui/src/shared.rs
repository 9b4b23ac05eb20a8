//! Shared view helpers: layout, styles, and the help popup.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Bordered panel, highlighted when focused.
pub fn panel(title: &str, focused: bool) -> Block<'static> {
    let color = if focused { Color::Yellow } else { Color::Magenta };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Dim label style.
pub fn label() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Draw the help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(70, 80, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("Roller:"),
        Line::from("  Ctrl+1..7   Add d20 d12 d10 d8 d6 d4 d100"),
        Line::from("  d then 1..7 Same, for terminals without Ctrl+digit"),
        Line::from("  = / +       Add another die of the last type"),
        Line::from("  0-9 / -     Type modifier"),
        Line::from("  Enter/Space Roll (d20 when the pool is empty)"),
        Line::from("  Backspace   Undo last input"),
        Line::from("  Esc         Clear pool"),
        Line::from("  r           Reroll last"),
        Line::from("  c           Copy last total"),
        Line::from("  f           Save as favorite"),
        Line::from("  h           Toggle history"),
        Line::from("  q..o / Q..O Roll hotbar slot (R for slot 4)"),
        Line::from(""),
        Line::from("Favorites / History (Tab to focus):"),
        Line::from("  j / k       Move down / up"),
        Line::from("  Enter       Roll selection"),
        Line::from("  q..o        Assign favorite to slot"),
        Line::from("  Q..O        Clear slot"),
        Line::from("  x / Del     Delete favorite"),
        Line::from("  l           Load history entry into pool"),
        Line::from("  Esc         Back to roller"),
        Line::from(""),
        Line::from("  ?           Toggle this help"),
        Line::from("  Ctrl+C      Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
