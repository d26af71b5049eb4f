//! Success dialog shown after a submission is stored

use super::base::{dismiss_hint, render_dialog, DialogConfig};
use crate::state::StoredSubmission;
use ratatui::{style::Color, Frame};

/// Body text for the success dialog
pub fn success_message(stored: &StoredSubmission) -> String {
    let mut message = format!(
        "Your {} was received and will be reviewed by the board.",
        stored.record.kind.label().to_lowercase()
    );
    if let Some(id) = &stored.id {
        message.push_str(&format!("\nProtocol: {id}"));
    }
    if let Some(created_at) = stored.created_at {
        message.push_str(&format!(
            "\nReceived: {}",
            created_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    if stored.record.email.is_some() {
        message.push_str("\nUpdates will be sent to your e-mail.");
    }
    message
}

/// Render the success overlay
pub fn render_success_dialog(frame: &mut Frame, stored: &StoredSubmission) {
    let message = success_message(stored);
    render_dialog(
        frame,
        DialogConfig {
            title: "Sent successfully!",
            title_color: Color::Green,
            border_color: Color::Green,
            message: &message,
            hint: Some(dismiss_hint("start over")),
            max_width: 64,
        },
    );
}
