//! Step 1: feedback kind selector

use crate::app::App;
use crate::state::{FeedbackKind, Focus, FormSnapshot, FormStep};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Accent color per kind
pub fn kind_color(kind: FeedbackKind) -> Color {
    match kind {
        FeedbackKind::Complaint => Color::Red,
        FeedbackKind::Suggestion => Color::Yellow,
        FeedbackKind::Report => Color::Magenta,
        FeedbackKind::Praise => Color::Green,
    }
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App, form: &FormSnapshot) {
    let selected = form.submission.kind;
    let focused = app.state.focus == Focus::Form;

    let items: Vec<ListItem> = FeedbackKind::ALL
        .iter()
        .map(|kind| {
            let marker = if selected == Some(*kind) { "(•)" } else { "( )" };
            let color = kind_color(*kind);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{marker} "), Style::default().fg(color)),
                    Span::styled(
                        kind.label(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("    {}", kind.description()),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} ", FormStep::SelectKind.heading()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));

    // Highlight follows the cursor, independent of the selected kind
    let mut list_state = ListState::default().with_selected(Some(app.state.kind_cursor));
    frame.render_stateful_widget(list, area, &mut list_state);
}
