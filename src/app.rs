//! Application state and core logic

use crate::gateway::{SubmissionGateway, SubmitError};
use crate::platform::SUBMIT_MODIFIER;
use crate::state::{AppState, Focus, FormStep, IdentityField, StoredSubmission};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::oneshot;

type SubmissionOutcome = Result<StoredSubmission, SubmitError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Validation and persistence boundary
    gateway: SubmissionGateway,
    /// Result of the submission in flight, if any
    pending: Option<oneshot::Receiver<SubmissionOutcome>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(gateway: SubmissionGateway, show_faq: bool) -> Self {
        Self {
            state: AppState::new(show_faq),
            gateway,
            pending: None,
            quit: false,
        }
    }

    /// Where submissions go, for the status bar
    pub fn store_label(&self) -> String {
        self.gateway.store_description()
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Modal dialogs swallow input until dismissed
        if self.state.has_modal() {
            self.handle_modal_key(key);
            return Ok(());
        }

        if key.code == KeyCode::F(1) && self.state.show_faq {
            self.state.focus.toggle();
            return Ok(());
        }

        match self.state.focus {
            Focus::Faq => self.handle_faq_key(key),
            Focus::Form => match self.state.form.step() {
                FormStep::SelectKind => self.handle_kind_key(key),
                FormStep::Identity => self.handle_identity_key(key),
                FormStep::Message => self.handle_message_key(key),
            },
        }
        Ok(())
    }

    /// Handle bracketed paste; only the form accepts text
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.has_modal() || self.state.focus != Focus::Form {
            return;
        }
        self.state.paste(text);
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            return;
        }
        if self.state.current_error().is_some() {
            self.state.dismiss_error();
        } else if self.state.success.is_some() {
            self.state.close_success();
        }
    }

    fn handle_faq_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.faq_cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.faq_cursor_down(),
            KeyCode::Enter | KeyCode::Char(' ') => self.state.toggle_faq_entry(),
            KeyCode::Esc => self.state.focus = Focus::Form,
            _ => {}
        }
    }

    /// Step 1: pick the feedback kind
    fn handle_kind_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.state.kind_cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => self.state.kind_cursor_down(),
            KeyCode::Char(' ') => {
                self.state.choose_highlighted_kind();
            }
            KeyCode::Enter => {
                if self.state.choose_highlighted_kind().is_applied() {
                    self.state.advance();
                }
            }
            KeyCode::Right | KeyCode::Tab => {
                self.state.advance();
            }
            KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Step 2: anonymity toggle, name, e-mail
    fn handle_identity_key(&mut self, key: KeyEvent) {
        let field = self.state.identity_field;
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.next_identity_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_identity_field(),
            KeyCode::Esc => {
                self.state.retreat();
            }
            KeyCode::Enter => {
                self.state.advance();
            }
            KeyCode::Char(' ') if field == IdentityField::Anonymous => {
                self.state.toggle_anonymous();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => match field {
                IdentityField::Name => {
                    self.state.form.push_name_char(c);
                }
                IdentityField::Email => {
                    self.state.form.push_email_char(c);
                }
                IdentityField::Anonymous => {}
            },
            KeyCode::Backspace => match field {
                IdentityField::Name => {
                    self.state.form.pop_name_char();
                }
                IdentityField::Email => {
                    self.state.form.pop_email_char();
                }
                IdentityField::Anonymous => {}
            },
            _ => {}
        }
    }

    /// Step 3: message body and submit
    fn handle_message_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('s')
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | SUBMIT_MODIFIER) =>
            {
                self.start_submit();
            }
            KeyCode::Esc => {
                self.state.retreat();
            }
            KeyCode::Enter => {
                self.state.form.push_body_char('\n');
            }
            KeyCode::Backspace => {
                self.state.form.pop_body_char();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.form.push_body_char(c);
            }
            _ => {}
        }
    }

    /// Raise the submitting flag and hand the submission to the gateway
    /// on a background task so the UI keeps drawing
    fn start_submit(&mut self) {
        if !self.state.form.begin_submit().is_applied() {
            return;
        }

        let submission = self.state.form.submission().clone();
        let gateway = self.gateway.clone();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let outcome = gateway.submit(&submission).await;
            // Receiver is gone only when the app is shutting down
            let _ = tx.send(outcome);
        });
        self.pending = Some(rx);
    }

    /// Check whether the submission in flight has finished
    pub fn poll_submission(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                self.finish_submit(outcome);
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending = None;
                tracing::error!("Submission task ended without a result");
                self.finish_submit(Err(SubmitError::Persistence {
                    message: crate::gateway::PERSISTENCE_FAILURE_MESSAGE.to_string(),
                }));
            }
        }
    }

    fn finish_submit(&mut self, outcome: SubmissionOutcome) {
        match outcome {
            Ok(stored) => {
                self.state.form.finish_submit(true);
                self.state.success = Some(stored);
            }
            Err(err) => {
                self.state.form.finish_submit(false);
                self.state.push_error(err.user_message());
                if let Some(field) = err.field() {
                    self.state.focus_field(field);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FeedbackKind, FormSnapshot};
    use crate::store::{MemoryStore, MockSubmissionStore, SubmissionStore};
    use anyhow::anyhow;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    fn app_with(store: Arc<dyn SubmissionStore>) -> App {
        App::new(SubmissionGateway::new(store), true)
    }

    impl App {
        /// Block until the submission in flight has been applied
        async fn settle_submission(&mut self) {
            if let Some(rx) = self.pending.take() {
                let outcome = rx.await.expect("submission task dropped its sender");
                self.finish_submit(outcome);
            }
        }
    }

    #[tokio::test]
    async fn test_anonymous_suggestion_through_keys() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with(store.clone());

        // Step 1: Suggestion is the second entry
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.form.step(), FormStep::Identity);

        // Step 2: toggle anonymous and continue
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.form.step(), FormStep::Message);

        // Step 3: type and submit
        type_text(&mut app, "Please add more bike racks near the main building.").await;
        app.handle_key(ctrl('s')).await.unwrap();
        assert!(app.state.form.is_submitting());
        app.settle_submission().await;

        let stored = app.state.success.clone().expect("success modal");
        assert_eq!(stored.record.kind, FeedbackKind::Suggestion);
        assert!(stored.record.is_anonymous);
        assert_eq!(stored.record.name, None);
        assert_eq!(store.records().len(), 1);
        assert_eq!(app.state.form.state(), FormSnapshot::default());

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert!(app.state.success.is_none());
    }

    #[tokio::test]
    async fn test_platform_modifier_submits() {
        let store = Arc::new(MemoryStore::new());
        let mut app = app_with(store.clone());
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_text(&mut app, "The lab printer jams every morning.").await;

        app.handle_key(KeyEvent::new(KeyCode::Char('s'), SUBMIT_MODIFIER))
            .await
            .unwrap();
        assert!(app.state.form.is_submitting());
        app.settle_submission().await;
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_step_one_without_kind_stays() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.handle_key(key(KeyCode::Right)).await.unwrap();
        assert_eq!(app.state.form.step(), FormStep::SelectKind);
    }

    #[tokio::test]
    async fn test_identified_without_name_cannot_continue() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.form.step(), FormStep::Identity);

        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "Maria").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.form.step(), FormStep::Message);
        assert_eq!(app.state.form.submission().name, "Maria");
    }

    #[tokio::test]
    async fn test_short_message_does_not_submit() {
        let mut mock = MockSubmissionStore::new();
        mock.expect_describe().return_const("mock".to_string());
        mock.expect_insert().never();
        let mut app = app_with(Arc::new(mock));

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_text(&mut app, "short").await;
        app.handle_key(ctrl('s')).await.unwrap();

        assert!(!app.state.form.is_submitting());
        assert!(app.pending.is_none());
    }

    #[tokio::test]
    async fn test_store_failure_shows_generic_error_and_keeps_form() {
        let mut mock = MockSubmissionStore::new();
        mock.expect_describe().return_const("mock".to_string());
        mock.expect_insert()
            .times(1)
            .returning(|_| Err(anyhow!("connection reset by peer")));
        let mut app = app_with(Arc::new(mock));

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_text(&mut app, "The printer on floor two is broken.").await;
        app.handle_key(ctrl('s')).await.unwrap();
        app.settle_submission().await;

        assert_eq!(
            app.state.current_error(),
            Some(crate::gateway::PERSISTENCE_FAILURE_MESSAGE)
        );
        assert!(!app.state.form.is_submitting());
        assert_eq!(app.state.form.step(), FormStep::Message);
        assert_eq!(
            app.state.form.submission().body,
            "The printer on floor two is broken."
        );

        // Dismissing the dialog allows typing again
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(app.state.current_error().is_none());
    }

    #[tokio::test]
    async fn test_invalid_email_reported() {
        let mut mock = MockSubmissionStore::new();
        mock.expect_describe().return_const("mock".to_string());
        mock.expect_insert().never();
        let mut app = app_with(Arc::new(mock));

        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "Maria").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "not-an-email").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        type_text(&mut app, "The cafeteria needs vegetarian options.").await;
        app.handle_key(ctrl('s')).await.unwrap();
        app.settle_submission().await;

        assert_eq!(app.state.current_error(), Some("Invalid e-mail address"));
        assert_eq!(app.state.form.step(), FormStep::Identity);
        assert_eq!(app.state.identity_field, IdentityField::Email);
    }

    #[tokio::test]
    async fn test_paste_fills_message() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_paste("Line one\nLine two");
        assert_eq!(app.state.form.submission().body, "Line one\nLine two");
    }

    #[tokio::test]
    async fn test_paste_ignored_while_faq_focused() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        app.handle_key(key(KeyCode::F(1))).await.unwrap();
        app.handle_paste("Maria");
        assert_eq!(app.state.form.submission().name, "");
    }

    #[tokio::test]
    async fn test_store_label_tracks_memory_store() {
        let store = Arc::new(MemoryStore::new());
        let app = app_with(store.clone());
        assert_eq!(app.store_label(), "offline (in-memory, 0 kept)");
    }

    #[tokio::test]
    async fn test_escape_goes_back_and_quits_at_first_step() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.form.step(), FormStep::SelectKind);
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_faq_focus_takes_navigation_keys() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.handle_key(key(KeyCode::F(1))).await.unwrap();
        assert_eq!(app.state.focus, Focus::Faq);
        app.handle_key(key(KeyCode::Down)).await.unwrap();
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.faq_expanded, Some(1));
        assert_eq!(app.state.kind_cursor, 0);
        app.handle_key(key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state.focus, Focus::Form);
    }

    #[tokio::test]
    async fn test_poll_without_pending_is_noop() {
        let mut app = app_with(Arc::new(MemoryStore::new()));
        app.poll_submission();
        assert!(!app.state.has_modal());
    }
}
