//! Favorites and history lists.

use ratatui::prelude::*;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use hd_session::FavoriteRoll;

use crate::app::{Focus, TuiApp};
use crate::keymap::hotbar_label;
use crate::shared::{label, panel};

fn highlight() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn slot_tags(app: &TuiApp, favorite: &FavoriteRoll) -> String {
    app.session
        .state()
        .hotbar
        .slots()
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.as_ref().is_some_and(|f| f.id == favorite.id))
        .map(|(i, _)| hotbar_label(i).to_string())
        .collect::<Vec<_>>()
        .join("")
}

/// Draw saved favorites, newest first.
pub fn draw_favorites(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let focused = app.focus == Focus::Favorites;
    let block = panel("Favorites", focused);
    let favorites = &app.session.state().favorites;

    if favorites.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Span::styled("No favorites. Press f to save one.", label())),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = favorites
        .iter()
        .map(|f| {
            let tags = slot_tags(app, f);
            let mut spans = vec![
                Span::styled(f.name.clone(), Style::default().fg(Color::White).bold()),
                Span::styled(format!("  {}", f.formula()), label()),
            ];
            if !tags.is_empty() {
                spans.push(Span::styled(format!("  [{tags}]"), Style::default().fg(Color::Cyan)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.favorites_selected.min(favorites.len() - 1)));
    }
    let list = List::new(items).block(block).highlight_style(highlight());
    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw recent rolls, newest first.
pub fn draw_history(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let focused = app.focus == Focus::History;
    let block = panel("History", focused);
    let history = &app.session.state().history;

    let items: Vec<ListItem> = history
        .entries()
        .iter()
        .map(|entry| {
            let time = entry.result.timestamp.format("%H:%M:%S").to_string();
            ListItem::new(Line::from(vec![
                Span::styled(format!("{time} "), label()),
                Span::raw(entry.display_text.clone()),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    if focused && !history.is_empty() {
        state.select(Some(app.history_selected.min(history.len() - 1)));
    }
    let list = List::new(items).block(block).highlight_style(highlight());
    frame.render_stateful_widget(list, area, &mut state);
}
