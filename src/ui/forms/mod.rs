//! Wizard step rendering
//!
//! - `kind_selector`: step 1, feedback kind
//! - `identity_form`: step 2, anonymity, name and e-mail
//! - `message_form`: step 3, message body and summary
//! - `navigation`: back / continue / submit buttons

mod field_renderer;
mod identity_form;
mod kind_selector;
mod message_form;
mod navigation;

use crate::app::App;
use crate::state::FormStep;
use ratatui::{layout::Rect, Frame};

/// Draw the current step and the navigation row below it
pub fn draw_step(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.state.form.state();
    let (step_area, nav_area) = navigation::split(area);
    match form.step {
        FormStep::SelectKind => kind_selector::draw(frame, step_area, app, &form),
        FormStep::Identity => identity_form::draw(frame, step_area, app, &form),
        FormStep::Message => message_form::draw(frame, step_area, app, &form),
    }
    navigation::draw(frame, nav_area, app);
}
