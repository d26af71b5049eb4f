//! Step progress indicator

use crate::state::FormStep;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Marker for a step relative to the current one
pub fn step_marker(step: FormStep, current: FormStep) -> String {
    if step.number() < current.number() {
        "✓".to_string()
    } else {
        step.number().to_string()
    }
}

pub fn draw(frame: &mut Frame, area: Rect, current: FormStep) {
    let mut spans = Vec::new();
    for (i, step) in FormStep::ALL.iter().enumerate() {
        if i > 0 {
            let connector_color = if step.number() <= current.number() {
                Color::Magenta
            } else {
                Color::DarkGray
            };
            spans.push(Span::styled(" ──── ", Style::default().fg(connector_color)));
        }

        let style = if *step == current {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else if step.number() < current.number() {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("({}) {}", step_marker(*step, current), step.label()),
            style,
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}
