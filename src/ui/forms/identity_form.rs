//! Step 2: identity form

use super::field_renderer::draw_field;
use crate::app::App;
use crate::state::{Focus, FormSnapshot, FormStep, IdentityField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App, form: &FormSnapshot) {
    let submission = &form.submission;
    let focused = app.state.focus == Focus::Form;
    let active = |field: IdentityField| focused && app.state.identity_field == field;

    let block = Block::default()
        .title(format!(" {} ", FormStep::Identity.heading()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Anonymous toggle
            Constraint::Length(3), // Name
            Constraint::Length(3), // E-mail
            Constraint::Length(1), // Hint
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    draw_anonymous_toggle(
        frame,
        chunks[0],
        submission.is_anonymous,
        active(IdentityField::Anonymous),
    );

    if submission.is_anonymous {
        let note = Paragraph::new(Line::from(Span::styled(
            "Your identity will be protected. Name and e-mail are not sent.",
            Style::default().fg(Color::Gray),
        )));
        frame.render_widget(note, chunks[1]);
        return;
    }

    draw_field(
        frame,
        chunks[1],
        "Name",
        &submission.name,
        "Your name",
        active(IdentityField::Name),
        false,
    );
    draw_field(
        frame,
        chunks[2],
        "E-mail",
        &submission.email,
        "Your e-mail (optional)",
        active(IdentityField::Email),
        false,
    );

    let hint = Paragraph::new("Leave an e-mail to receive updates about your case.")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, chunks[3]);
}

fn draw_anonymous_toggle(frame: &mut Frame, area: Rect, is_anonymous: bool, is_active: bool) {
    let (switch, switch_color) = if is_anonymous {
        ("[ ON ]", Color::Green)
    } else {
        ("[ OFF]", Color::DarkGray)
    };
    let border_color = if is_active { Color::Cyan } else { Color::DarkGray };

    let line = Line::from(vec![
        Span::styled(
            switch,
            Style::default()
                .fg(switch_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  Send anonymously"),
    ]);
    let toggle = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(toggle, area);
}
