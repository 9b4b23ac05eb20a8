//! The hotbar row.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use hd_session::{HOTBAR_SLOTS, Hotbar};

use crate::keymap::hotbar_label;
use crate::shared::{label, panel};

/// Draw the nine hotbar slots on one line.
pub fn draw(frame: &mut Frame, hotbar: &Hotbar, area: Rect) {
    let title = format!("Hotbar {}/{HOTBAR_SLOTS}", hotbar.occupied());
    let block = panel(&title, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let spans: Vec<Span<'static>> = hotbar
        .slots()
        .iter()
        .enumerate()
        .flat_map(|(i, slot)| {
            let key = Span::styled(
                format!("{}:", hotbar_label(i)),
                Style::default().fg(Color::Cyan).bold(),
            );
            let name = match slot {
                Some(favorite) => {
                    Span::styled(favorite.name.clone(), Style::default().fg(Color::White))
                }
                None => Span::styled("-", label()),
            };
            [key, name, Span::raw("  ")]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
