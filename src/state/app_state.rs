//! Application state definitions

use super::catalog::{toggle_faq, FAQ_ITEMS};
use super::submission::{FeedbackKind, FormFieldId, StoredSubmission};
use super::wizard::{FeedbackForm, FormStep, Transition};
use std::collections::VecDeque;

/// Which panel receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    Faq,
}

impl Focus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Form => Self::Faq,
            Self::Faq => Self::Form,
        };
    }
}

/// Input focused on the identity step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityField {
    #[default]
    Anonymous,
    Name,
    Email,
}

impl IdentityField {
    /// Next field; name and email are hidden while anonymous
    pub fn next(self, is_anonymous: bool) -> Self {
        match (self, is_anonymous) {
            (_, true) => Self::Anonymous,
            (Self::Anonymous, false) => Self::Name,
            (Self::Name, false) => Self::Email,
            (Self::Email, false) => Self::Anonymous,
        }
    }

    pub fn prev(self, is_anonymous: bool) -> Self {
        match (self, is_anonymous) {
            (_, true) => Self::Anonymous,
            (Self::Anonymous, false) => Self::Email,
            (Self::Name, false) => Self::Anonymous,
            (Self::Email, false) => Self::Name,
        }
    }
}

/// Everything the views render from
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub form: FeedbackForm,
    pub focus: Focus,

    // Step 1
    pub kind_cursor: usize,

    // Step 2
    pub identity_field: IdentityField,

    // FAQ panel
    pub show_faq: bool,
    pub faq_cursor: usize,
    pub faq_expanded: Option<usize>,

    // Dialogs
    pub success: Option<StoredSubmission>,
    pub error_queue: VecDeque<String>,
}

impl AppState {
    pub fn new(show_faq: bool) -> Self {
        Self {
            show_faq,
            ..Default::default()
        }
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error_queue.push_back(message.into());
    }

    /// Error shown in the dialog, if any
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn has_modal(&self) -> bool {
        self.success.is_some() || !self.error_queue.is_empty()
    }

    /// Kind under the selector cursor
    pub fn highlighted_kind(&self) -> Option<FeedbackKind> {
        FeedbackKind::from_index(self.kind_cursor)
    }

    pub fn kind_cursor_down(&mut self) {
        self.kind_cursor = (self.kind_cursor + 1) % FeedbackKind::ALL.len();
    }

    pub fn kind_cursor_up(&mut self) {
        let len = FeedbackKind::ALL.len();
        self.kind_cursor = (self.kind_cursor + len - 1) % len;
    }

    /// Select the highlighted kind
    pub fn choose_highlighted_kind(&mut self) -> Transition {
        let kind = self.highlighted_kind().unwrap_or(FeedbackKind::Complaint);
        self.form.select_kind(kind)
    }

    pub fn next_identity_field(&mut self) {
        let anonymous = self.form.submission().is_anonymous;
        self.identity_field = self.identity_field.next(anonymous);
    }

    pub fn prev_identity_field(&mut self) {
        let anonymous = self.form.submission().is_anonymous;
        self.identity_field = self.identity_field.prev(anonymous);
    }

    /// Toggle anonymity and keep focus on a visible field
    pub fn toggle_anonymous(&mut self) -> Transition {
        let result = self.form.toggle_anonymous();
        if self.form.submission().is_anonymous {
            self.identity_field = IdentityField::Anonymous;
        }
        result
    }

    /// Advance the wizard and place focus on the new step's first input
    pub fn advance(&mut self) -> Transition {
        let result = self.form.advance();
        if result.is_applied() && self.form.step() == FormStep::Identity {
            self.identity_field = IdentityField::Anonymous;
        }
        result
    }

    pub fn retreat(&mut self) -> Transition {
        let result = self.form.retreat();
        if result.is_applied() && self.form.step() == FormStep::SelectKind {
            if let Some(kind) = self.form.submission().kind {
                self.kind_cursor = kind.index();
            }
        }
        result
    }

    /// Walk back to the step owning `field` and focus its input
    pub fn focus_field(&mut self, field: FormFieldId) {
        let target = match field {
            FormFieldId::Kind => FormStep::SelectKind,
            FormFieldId::Name | FormFieldId::Email => FormStep::Identity,
            FormFieldId::Body => FormStep::Message,
        };
        while self.form.step().number() > target.number() {
            if !self.retreat().is_applied() {
                return;
            }
        }
        match field {
            FormFieldId::Name => self.identity_field = IdentityField::Name,
            FormFieldId::Email => self.identity_field = IdentityField::Email,
            FormFieldId::Kind | FormFieldId::Body => {}
        }
    }

    /// Append pasted text to the focused input. Identity fields are
    /// single-line, so line breaks become spaces there.
    pub fn paste(&mut self, text: &str) {
        let submission = self.form.submission().clone();
        match self.form.step() {
            FormStep::SelectKind => {}
            FormStep::Identity => {
                let single_line = text.lines().collect::<Vec<_>>().join(" ");
                let (mut name, mut email) = (submission.name, submission.email);
                match self.identity_field {
                    IdentityField::Anonymous => return,
                    IdentityField::Name => name.push_str(&single_line),
                    IdentityField::Email => email.push_str(single_line.trim()),
                }
                self.form
                    .set_identity(submission.is_anonymous, &name, &email);
            }
            FormStep::Message => {
                let body = format!("{}{}", submission.body, text);
                self.form.set_body(&body);
            }
        }
    }

    /// Reset the form and all per-step cursors
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.kind_cursor = 0;
        self.identity_field = IdentityField::Anonymous;
    }

    pub fn faq_cursor_down(&mut self) {
        self.faq_cursor = (self.faq_cursor + 1).min(FAQ_ITEMS.len() - 1);
    }

    pub fn faq_cursor_up(&mut self) {
        self.faq_cursor = self.faq_cursor.saturating_sub(1);
    }

    pub fn toggle_faq_entry(&mut self) {
        self.faq_expanded = toggle_faq(self.faq_expanded, self.faq_cursor);
    }

    /// Close the success modal; the form was already cleared on success
    pub fn close_success(&mut self) {
        self.success = None;
        self.reset_form();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MAX_BODY_CHARS;

    fn state_at_identity() -> AppState {
        let mut state = AppState::default();
        state.kind_cursor = 1;
        state.choose_highlighted_kind();
        state.advance();
        state
    }

    #[test]
    fn test_kind_cursor_wraps() {
        let mut state = AppState::default();
        state.kind_cursor_up();
        assert_eq!(state.kind_cursor, 3);
        state.kind_cursor_down();
        assert_eq!(state.kind_cursor, 0);
    }

    #[test]
    fn test_choose_highlighted_kind_selects_kind() {
        let mut state = AppState::default();
        state.kind_cursor_down();
        assert!(state.choose_highlighted_kind().is_applied());
        assert_eq!(
            state.form.submission().kind,
            Some(FeedbackKind::Suggestion)
        );
    }

    #[test]
    fn test_identity_fields_cycle_when_identified() {
        let mut state = state_at_identity();
        assert_eq!(state.identity_field, IdentityField::Anonymous);
        state.next_identity_field();
        assert_eq!(state.identity_field, IdentityField::Name);
        state.next_identity_field();
        assert_eq!(state.identity_field, IdentityField::Email);
        state.next_identity_field();
        assert_eq!(state.identity_field, IdentityField::Anonymous);
        state.prev_identity_field();
        assert_eq!(state.identity_field, IdentityField::Email);
    }

    #[test]
    fn test_anonymous_hides_name_and_email() {
        let mut state = state_at_identity();
        state.next_identity_field();
        state.toggle_anonymous();
        assert_eq!(state.identity_field, IdentityField::Anonymous);
        state.next_identity_field();
        assert_eq!(state.identity_field, IdentityField::Anonymous);
    }

    #[test]
    fn test_retreat_restores_kind_cursor() {
        let mut state = state_at_identity();
        state.kind_cursor = 3;
        state.retreat();
        assert_eq!(state.form.step(), FormStep::SelectKind);
        assert_eq!(state.kind_cursor, 1);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        assert!(!state.has_modal());
        state.push_error("first");
        state.push_error("second");
        assert!(state.has_modal());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(state.current_error().is_none());
    }

    #[test]
    fn test_faq_cursor_is_clamped() {
        let mut state = AppState::default();
        state.faq_cursor_up();
        assert_eq!(state.faq_cursor, 0);
        for _ in 0..10 {
            state.faq_cursor_down();
        }
        assert_eq!(state.faq_cursor, FAQ_ITEMS.len() - 1);
    }

    #[test]
    fn test_faq_entry_toggles() {
        let mut state = AppState::default();
        state.faq_cursor_down();
        state.toggle_faq_entry();
        assert_eq!(state.faq_expanded, Some(1));
        state.toggle_faq_entry();
        assert_eq!(state.faq_expanded, None);
    }

    #[test]
    fn test_focus_toggle() {
        let mut focus = Focus::default();
        focus.toggle();
        assert_eq!(focus, Focus::Faq);
        focus.toggle();
        assert_eq!(focus, Focus::Form);
    }

    #[test]
    fn test_focus_field_walks_back_to_identity() {
        let mut state = state_at_identity();
        state.form.set_identity(false, "Maria", "maria@");
        state.advance();
        assert_eq!(state.form.step(), FormStep::Message);
        state.focus_field(FormFieldId::Email);
        assert_eq!(state.form.step(), FormStep::Identity);
        assert_eq!(state.identity_field, IdentityField::Email);
    }

    #[test]
    fn test_focus_field_body_stays_on_message() {
        let mut state = state_at_identity();
        state.toggle_anonymous();
        state.advance();
        state.focus_field(FormFieldId::Body);
        assert_eq!(state.form.step(), FormStep::Message);
    }

    #[test]
    fn test_paste_into_name_flattens_lines() {
        let mut state = state_at_identity();
        state.next_identity_field();
        state.paste("Maria\nSilva");
        assert_eq!(state.form.submission().name, "Maria Silva");
        assert_eq!(state.form.submission().email, "");
    }

    #[test]
    fn test_paste_on_anonymous_toggle_is_ignored() {
        let mut state = state_at_identity();
        state.paste("Maria");
        assert_eq!(state.form.submission().name, "");
    }

    #[test]
    fn test_paste_into_body_is_truncated() {
        let mut state = state_at_identity();
        state.toggle_anonymous();
        state.advance();
        state.paste(&"x".repeat(MAX_BODY_CHARS + 50));
        assert_eq!(state.form.submission().body.chars().count(), MAX_BODY_CHARS);
    }

    #[test]
    fn test_reset_form_clears_cursors() {
        let mut state = state_at_identity();
        state.next_identity_field();
        state.reset_form();
        assert_eq!(state.kind_cursor, 0);
        assert_eq!(state.identity_field, IdentityField::Anonymous);
        assert_eq!(state.form.step(), FormStep::SelectKind);
    }
}
