//! The save-favorite name prompt.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::NamePrompt;
use crate::shared::centered_rect;

/// Draw the prompt as a small centered popup with a cursor.
pub fn draw(frame: &mut Frame, prompt: &NamePrompt) {
    let outer = centered_rect(50, 20, frame.area());
    let area = Rect::new(outer.x, outer.y, outer.width, 3).intersection(frame.area());

    let input = Paragraph::new(format!("> {}", prompt.text)).block(
        Block::default()
            .title(" Save Favorite ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(input, area);

    // Offset by 2 for "> ", plus 1 for the left border
    let cursor_x = area.x + 1 + 2 + prompt.text.chars().count() as u16;
    if cursor_x < area.x + area.width.saturating_sub(1) {
        frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}
