//! UI module for rendering the TUI

mod components;
mod faq;
mod forms;
mod layout;
mod progress;

use crate::app::App;
use components::{render_error_dialog, render_success_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area(), app.state.show_faq);

    layout::draw_header(frame, areas.header);
    progress::draw(frame, areas.progress, app.state.form.step());
    forms::draw_step(frame, areas.form, app);
    if let Some(faq_area) = areas.faq {
        faq::draw(frame, faq_area, app);
    }
    layout::draw_status_bar(frame, areas.status, app);

    // Dialogs go on top; errors first so a late failure is never hidden
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message);
    } else if let Some(stored) = &app.state.success {
        render_success_dialog(frame, stored);
    }
}
