//! Multi-step feedback form state machine
//!
//! The form walks through three steps (kind, identity, message). Every
//! mutator returns a [`Transition`]; a rejected transition leaves the state
//! untouched, so callers that only gate buttons on [`FeedbackForm::can_proceed`]
//! can ignore the result.

use super::submission::{FeedbackKind, Submission};
use super::validation::{is_body_length_valid, is_identity_complete, MAX_BODY_CHARS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormStep {
    #[default]
    SelectKind,
    Identity,
    Message,
}

impl FormStep {
    pub const ALL: [FormStep; 3] = [FormStep::SelectKind, FormStep::Identity, FormStep::Message];

    /// 1-based step number shown in the progress indicator
    pub fn number(self) -> u8 {
        match self {
            Self::SelectKind => 1,
            Self::Identity => 2,
            Self::Message => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::SelectKind),
            2 => Some(Self::Identity),
            3 => Some(Self::Message),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SelectKind => "Type",
            Self::Identity => "Details",
            Self::Message => "Message",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Self::SelectKind => "What kind of feedback?",
            Self::Identity => "How do you want to identify yourself?",
            Self::Message => "Describe your feedback",
        }
    }
}

/// Why a transition was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Operation belongs to another step
    WrongStep { expected: FormStep, actual: FormStep },
    /// Gate of the current step does not hold
    GateClosed(FormStep),
    AtFirstStep,
    AtLastStep,
    /// A submission is in flight
    Submitting,
    /// `finish_submit` without a matching `begin_submit`
    NotSubmitting,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongStep { expected, actual } => write!(
                f,
                "only allowed at step {}, form is at step {}",
                expected.number(),
                actual.number()
            ),
            Self::GateClosed(step) => write!(f, "step {} is not complete", step.number()),
            Self::AtFirstStep => write!(f, "already at the first step"),
            Self::AtLastStep => write!(f, "already at the last step"),
            Self::Submitting => write!(f, "a submission is in flight"),
            Self::NotSubmitting => write!(f, "no submission in flight"),
        }
    }
}

/// Outcome of a state machine operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Rejected(RejectReason),
}

impl Transition {
    pub fn is_applied(self) -> bool {
        matches!(self, Transition::Applied)
    }
}

/// Serializable view of the form handed to renderers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub step: FormStep,
    pub submission: Submission,
    pub is_submitting: bool,
}

/// The feedback wizard
#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    step: FormStep,
    submission: Submission,
    is_submitting: bool,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Owned copy of the current state, what the step views render from
    pub fn state(&self) -> FormSnapshot {
        FormSnapshot {
            step: self.step,
            submission: self.submission.clone(),
            is_submitting: self.is_submitting,
        }
    }

    fn reject(&self, reason: RejectReason) -> Transition {
        tracing::debug!(step = ?self.step, %reason, "form transition rejected");
        Transition::Rejected(reason)
    }

    /// Common guard for field edits: right step, nothing in flight
    fn guard_edit(&self, expected: FormStep) -> Option<Transition> {
        if self.is_submitting {
            return Some(self.reject(RejectReason::Submitting));
        }
        if self.step != expected {
            return Some(self.reject(RejectReason::WrongStep {
                expected,
                actual: self.step,
            }));
        }
        None
    }

    pub fn select_kind(&mut self, kind: FeedbackKind) -> Transition {
        if let Some(rejected) = self.guard_edit(FormStep::SelectKind) {
            return rejected;
        }
        self.submission.kind = Some(kind);
        Transition::Applied
    }

    pub fn set_identity(&mut self, is_anonymous: bool, name: &str, email: &str) -> Transition {
        if let Some(rejected) = self.guard_edit(FormStep::Identity) {
            return rejected;
        }
        self.submission.is_anonymous = is_anonymous;
        self.submission.name = name.to_string();
        self.submission.email = email.to_string();
        Transition::Applied
    }

    pub fn toggle_anonymous(&mut self) -> Transition {
        if let Some(rejected) = self.guard_edit(FormStep::Identity) {
            return rejected;
        }
        self.submission.is_anonymous = !self.submission.is_anonymous;
        Transition::Applied
    }

    pub fn push_name_char(&mut self, c: char) -> Transition {
        if let Some(rejected) = self.guard_edit(FormStep::Identity) {
            return rejected;
        }
        self.submission.name.push(c);
        Transition::Applied
    }

    pub fn pop_name_char(&mut self) -> Transition {
        if let Some(rejected) = self.guard_edit(FormStep::Identity) {
            return rejected;
        }
        self.submission.name.pop();
        Transition::Applied
    }

    pub fn push_email_char(&mut self, c: char) -> Transition {
        if let Some(rejected) = self.guard_edit(FormStep::Identity) {
            return rejected;
        }
        self.submission.email.push(c);
        Transition::Applied
    }

    pub fn pop_email_char(&mut self) -> Transition {
        if let Some(rejected) = self.guard_edit(FormStep::Identity) {
            return rejected;
        }
        self.submission.email.pop();
        Transition::Applied
    }

    /// Replace the body, silently truncated to the character ceiling
    pub fn set_body(&mut self, text: &str) -> Transition {
        if let Some(rejected) = self.guard_edit(FormStep::Message) {
            return rejected;
        }
        self.submission.body = text.chars().take(MAX_BODY_CHARS).collect();
        Transition::Applied
    }

    /// Append one character; ignored once the body is full
    pub fn push_body_char(&mut self, c: char) -> Transition {
        if let Some(rejected) = self.guard_edit(FormStep::Message) {
            return rejected;
        }
        if self.submission.body.chars().count() < MAX_BODY_CHARS {
            self.submission.body.push(c);
        }
        Transition::Applied
    }

    pub fn pop_body_char(&mut self) -> Transition {
        if let Some(rejected) = self.guard_edit(FormStep::Message) {
            return rejected;
        }
        self.submission.body.pop();
        Transition::Applied
    }

    /// Gate for leaving `step` forward (or submitting, for the last step)
    pub fn can_advance(&self, step: FormStep) -> bool {
        let s = &self.submission;
        match step {
            FormStep::SelectKind => s.kind.is_some(),
            FormStep::Identity => is_identity_complete(s.is_anonymous, &s.name),
            FormStep::Message => is_body_length_valid(s.body.trim()),
        }
    }

    /// Gate of the current step
    pub fn can_proceed(&self) -> bool {
        self.can_advance(self.step)
    }

    pub fn advance(&mut self) -> Transition {
        if self.is_submitting {
            return self.reject(RejectReason::Submitting);
        }
        let Some(next) = self.step.next() else {
            return self.reject(RejectReason::AtLastStep);
        };
        if !self.can_advance(self.step) {
            return self.reject(RejectReason::GateClosed(self.step));
        }
        self.step = next;
        Transition::Applied
    }

    pub fn retreat(&mut self) -> Transition {
        if self.is_submitting {
            return self.reject(RejectReason::Submitting);
        }
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                Transition::Applied
            }
            None => self.reject(RejectReason::AtFirstStep),
        }
    }

    /// Clear every field and return to the first step
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Raise the in-flight flag before handing the submission to the gateway
    pub fn begin_submit(&mut self) -> Transition {
        if self.is_submitting {
            return self.reject(RejectReason::Submitting);
        }
        if self.step != FormStep::Message {
            return self.reject(RejectReason::WrongStep {
                expected: FormStep::Message,
                actual: self.step,
            });
        }
        if !self.can_advance(FormStep::Message) {
            return self.reject(RejectReason::GateClosed(FormStep::Message));
        }
        self.is_submitting = true;
        Transition::Applied
    }

    /// Drop the in-flight flag. A successful submission clears the form.
    pub fn finish_submit(&mut self, succeeded: bool) -> Transition {
        if !self.is_submitting {
            return self.reject(RejectReason::NotSubmitting);
        }
        if succeeded {
            self.reset();
        } else {
            self.is_submitting = false;
        }
        Transition::Applied
    }
}
