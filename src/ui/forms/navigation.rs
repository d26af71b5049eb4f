//! Back / continue / submit row under the current step

use super::field_renderer::draw_help_text;
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{FeedbackForm, FormStep};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    Frame,
};

/// Split the form area into step content and the navigation row
pub fn split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(BUTTON_HEIGHT + 1), // Buttons + help line
        ])
        .split(area);
    (chunks[0], chunks[1])
}

/// Label of the primary button for the current state
pub fn primary_label(form: &FeedbackForm) -> &'static str {
    match form.step() {
        FormStep::Message if form.is_submitting() => "Sending...",
        FormStep::Message => "Send",
        _ => "Continue",
    }
}

/// Key hints for the current step
pub fn help_text(step: FormStep) -> String {
    match step {
        FormStep::SelectKind => {
            "↑/↓: choose | Space: select | Enter: select & continue | F1: FAQ | Esc: quit".to_string()
        }
        FormStep::Identity => {
            "Tab: next field | Space: toggle anonymous | Enter: continue | Esc: back".to_string()
        }
        FormStep::Message => format!("Type your message | {SUBMIT_SHORTCUT}: send | Esc: back"),
    }
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(BUTTON_HEIGHT), Constraint::Length(1)])
        .split(area);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Back
            Constraint::Min(0),
            Constraint::Length(16), // Continue / Send
        ])
        .split(rows[0]);

    let can_go_back = form.step() != FormStep::SelectKind && !form.is_submitting();
    render_button(frame, buttons[0], "← Back", Color::Gray, can_go_back);

    let primary_enabled = form.can_proceed() && !form.is_submitting();
    let primary_color = if form.step() == FormStep::Message {
        Color::Green
    } else {
        Color::Cyan
    };
    render_button(
        frame,
        buttons[2],
        primary_label(form),
        primary_color,
        primary_enabled,
    );

    draw_help_text(frame, rows[1], &help_text(form.step()));
}
