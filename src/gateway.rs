//! Submission gateway: validates a finished form and forwards it to the store
//!
//! Validation failures are answered locally and never reach the store. Store
//! failures are logged with their cause and reported to the caller with a
//! generic message only.

use crate::state::{
    is_body_length_valid, is_identity_complete, is_valid_email, FeedbackKind, FormFieldId,
    NewSubmission, StoredSubmission, Submission, MAX_BODY_CHARS, MIN_BODY_CHARS,
};
use crate::store::SubmissionStore;
use std::sync::Arc;
use thiserror::Error;

/// Message shown for any store failure
pub const PERSISTENCE_FAILURE_MESSAGE: &str =
    "Could not send your feedback. Please try again later.";

/// Why a submission was not stored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("invalid {}: {reason}", .field.label())]
    Validation { field: FormFieldId, reason: String },

    #[error("{message}")]
    Persistence { message: String },
}

impl SubmitError {
    fn validation(field: FormFieldId, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Text the UI displays
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation { reason, .. } => reason,
            Self::Persistence { message } => message,
        }
    }

    pub fn field(&self) -> Option<FormFieldId> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            Self::Persistence { .. } => None,
        }
    }
}

/// Check a submission in order and build the normalized record
pub fn validate(submission: &Submission) -> Result<NewSubmission, SubmitError> {
    let kind: FeedbackKind = submission
        .kind
        .ok_or_else(|| SubmitError::validation(FormFieldId::Kind, "Choose the kind of feedback"))?;

    let body = submission.body.trim();
    if body.is_empty() {
        return Err(SubmitError::validation(
            FormFieldId::Body,
            "A message is required",
        ));
    }

    if !is_body_length_valid(body) {
        let reason = if body.chars().count() < MIN_BODY_CHARS {
            format!("The message must have at least {MIN_BODY_CHARS} characters")
        } else {
            format!("The message cannot have more than {MAX_BODY_CHARS} characters")
        };
        return Err(SubmitError::validation(FormFieldId::Body, reason));
    }

    if !is_identity_complete(submission.is_anonymous, &submission.name) {
        return Err(SubmitError::validation(
            FormFieldId::Name,
            "Name is required unless you submit anonymously",
        ));
    }

    if let Some(email) = submission.effective_email() {
        if !is_valid_email(email) {
            return Err(SubmitError::validation(
                FormFieldId::Email,
                "Invalid e-mail address",
            ));
        }
    }

    Ok(NewSubmission::normalize(kind, submission))
}

/// Boundary between the form and the persistence collaborator
#[derive(Clone)]
pub struct SubmissionGateway {
    store: Arc<dyn SubmissionStore>,
}

impl SubmissionGateway {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }

    pub fn store_description(&self) -> String {
        self.store.describe()
    }

    /// Validate and store one submission. A single attempt, no retries.
    pub async fn submit(&self, submission: &Submission) -> Result<StoredSubmission, SubmitError> {
        let record = validate(submission).inspect_err(|e| {
            tracing::debug!("Submission rejected: {}", e);
        })?;

        match self.store.insert(&record).await {
            Ok(stored) => {
                tracing::info!(
                    id = ?stored.id,
                    kind = record.kind.as_wire_value(),
                    anonymous = record.is_anonymous,
                    "Submission stored"
                );
                Ok(stored)
            }
            Err(cause) => {
                tracing::error!("Failed to store submission: {:#}", cause);
                Err(SubmitError::Persistence {
                    message: PERSISTENCE_FAILURE_MESSAGE.to_string(),
                })
            }
        }
    }
}
