//! The working dice pool panel.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use hd_dice::{DiceGroup, Die, format_formula};

use crate::app::{Focus, TuiApp};
use crate::shared::{label, panel};

/// Draw the pool, modifier and expected total.
pub fn draw(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let block = panel("Dice Pool", app.focus == Focus::Roller);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = app.session.state();
    let (formula, average) = if state.quick_mode() {
        let quick = format_formula(&[DiceGroup::single(Die::D20)], state.modifier);
        (
            format!("Quick {quick}"),
            Die::D20.average() + state.modifier as f64,
        )
    } else {
        (state.formula(), state.average_total())
    };

    let mut modifier = vec![
        Span::styled("Modifier: ", label()),
        Span::styled(
            format!("{:+}", state.modifier),
            Style::default().fg(Color::White).bold(),
        ),
    ];
    if !state.pending_modifier.is_empty() {
        modifier.push(Span::styled(
            format!("  typed \"{}\"", state.pending_modifier),
            label(),
        ));
    }
    if app.chord_pending() {
        modifier.push(Span::styled("  d…", Style::default().fg(Color::Cyan).bold()));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled("Pool: ", label()),
            Span::styled(formula, Style::default().fg(Color::Yellow).bold()),
        ]),
        Line::from(vec![
            Span::styled(format!("Avg {average:.1}"), Style::default().fg(Color::Green)),
            Span::styled(format!("   Next die: {}", state.current_die_type), label()),
            Span::styled(format!("   {} dice", state.dice_pool.count()), label()),
        ]),
        Line::from(modifier),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
