//! Step 3: message body with summary and character counter

use super::field_renderer::draw_field;
use super::kind_selector::kind_color;
use crate::app::App;
use crate::state::{
    body_char_count, Focus, FormSnapshot, FormStep, Submission, MAX_BODY_CHARS, MIN_BODY_CHARS,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Counter shown under the message, e.g. `42/2000`, and whether the
/// minimum is met. Both count the trimmed body, which is what gets sent.
pub fn counter(body: &str) -> (String, bool) {
    let count = body_char_count(body.trim());
    (
        format!("{count}/{MAX_BODY_CHARS}"),
        count >= MIN_BODY_CHARS,
    )
}

/// One-line summary of the choices made in earlier steps
pub fn summary_spans(submission: &Submission) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled("Summary: ", Style::default().fg(Color::Gray))];
    if let Some(kind) = submission.kind {
        spans.push(Span::styled(
            kind.label(),
            Style::default().fg(kind_color(kind)),
        ));
        spans.push(Span::raw(" · "));
    }
    let identity = if submission.is_anonymous {
        "Anonymous".to_string()
    } else {
        submission.name.trim().to_string()
    };
    spans.push(Span::raw(identity));
    spans
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App, form: &FormSnapshot) {
    let submission = &form.submission;
    let focused = app.state.focus == Focus::Form && !form.is_submitting;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Summary
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Counter
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(summary_spans(submission))),
        chunks[0],
    );

    draw_field(
        frame,
        chunks[1],
        FormStep::Message.heading(),
        &submission.body,
        "Tell us the details. The more information, the better we can help...",
        focused,
        true,
    );

    let (text, meets_minimum) = counter(&submission.body);
    let counter_color = if meets_minimum {
        Color::Green
    } else {
        Color::DarkGray
    };
    let counter = Paragraph::new(text)
        .style(Style::default().fg(counter_color))
        .alignment(Alignment::Right);
    frame.render_widget(counter, chunks[2]);
}
