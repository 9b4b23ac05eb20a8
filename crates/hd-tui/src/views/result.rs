//! The last roll, grouped by die type.

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use hd_dice::{DieRoll, RollResult, format_roll_result};

use crate::shared::{label, panel};

fn die_style(roll: &DieRoll) -> Style {
    if roll.is_crit {
        Style::default().fg(Color::Green).bold()
    } else if roll.is_fail {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::Yellow).bold()
    }
}

/// Draw the result panel.
pub fn draw(frame: &mut Frame, result: Option<&RollResult>, area: Rect) {
    let block = panel("Result", false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(result) = result else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No rolls yet. Press Enter to roll a d20.",
            label(),
        )));
        frame.render_widget(hint, inner);
        return;
    };

    let mut lines: Vec<Line<'static>> = Vec::new();
    lines.push(Line::from(Span::styled(
        format_roll_result(result),
        Style::default().fg(Color::White),
    )));
    lines.push(Line::from(""));

    for (die, rolls) in result.rolls_by_type() {
        let tag = format!("{die}:");
        let mut spans = vec![Span::styled(format!("{tag:<5}"), label())];
        for roll in &rolls {
            spans.push(Span::styled(format!(" [{}] ", roll.value), die_style(roll)));
        }
        lines.push(Line::from(spans));
    }

    if result.modifier != 0 {
        lines.push(Line::from(vec![
            Span::styled("mod: ", label()),
            Span::raw(format!("{:+}", result.modifier)),
        ]));
    }
    lines.push(Line::from(""));

    let mut total = vec![
        Span::styled("Total: ", label()),
        Span::styled(
            result.total.to_string(),
            Style::default().fg(Color::Green).bold(),
        ),
    ];
    if result.has_crit() {
        total.push(Span::styled("  CRIT", Style::default().fg(Color::Green)));
    }
    if result.has_fail() {
        total.push(Span::styled("  FAIL", Style::default().fg(Color::Red)));
    }
    lines.push(Line::from(total));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
