//! FAQ panel

use crate::app::App;
use crate::state::{Focus, FAQ_ITEMS};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.focus == Focus::Faq;
    let mut lines = Vec::new();

    for (index, item) in FAQ_ITEMS.iter().enumerate() {
        let expanded = app.state.faq_expanded == Some(index);
        let selected = focused && app.state.faq_cursor == index;
        let arrow = if expanded { "▾" } else { "▸" };

        let mut style = Style::default().fg(Color::White);
        if selected {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(
            format!("{arrow} {}", item.question),
            style,
        )));
        if expanded {
            lines.push(Line::from(Span::styled(
                format!("  {}", item.answer),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.push(Line::from(""));
    }

    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" FAQ (F1) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(paragraph, area);
}
